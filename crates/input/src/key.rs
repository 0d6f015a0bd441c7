//! Key and modifier model for shortcut matching.
//!
//! Responsibilities:
//! - Define the key symbols ([`Key`]) bindings are declared against.
//! - Define live modifier state ([`ModifierState`]) and per-binding
//!   modifier requirements ([`ModifierRules`]).
//! - Define the dispatcher's event record ([`KeyInput`]) and the focus
//!   context that drives text-entry suppression.
//!
//! Does NOT handle:
//! - Parsing human-readable combo strings (see `keybind` module).
//! - Registry lookup or dispatch (see `dispatcher` module).
//!
//! Invariants:
//! - Character keys compare case-insensitively; every other variant
//!   compares by identity.
//! - A modifier requirement left unset never influences a match.

use std::fmt;

/// A key symbol a shortcut can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key (e.g., 'z', '7', '?').
    Char(char),
    /// Function key F1-F20.
    F(u8),
    /// Escape key. The one key that stays eligible while a text-entry
    /// surface has focus.
    Esc,
    /// Enter/Return key.
    Enter,
    /// Space key.
    Space,
    /// Tab key.
    Tab,
    /// BackTab (Shift+Tab) key.
    BackTab,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
}

impl Key {
    /// Key equality as the dispatcher sees it: character keys compare
    /// case-insensitively, everything else by identity.
    pub fn matches(&self, other: Key) -> bool {
        match (*self, other) {
            (Self::Char(a), Self::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{}", c),
            Self::F(n) => write!(f, "F{}", n),
            Self::Esc => write!(f, "Esc"),
            Self::Enter => write!(f, "Enter"),
            Self::Space => write!(f, "Space"),
            Self::Tab => write!(f, "Tab"),
            Self::BackTab => write!(f, "BackTab"),
            Self::Backspace => write!(f, "Backspace"),
            Self::Delete => write!(f, "Delete"),
            Self::Insert => write!(f, "Insert"),
            Self::Home => write!(f, "Home"),
            Self::End => write!(f, "End"),
            Self::PageUp => write!(f, "PageUp"),
            Self::PageDown => write!(f, "PageDown"),
            Self::Up => write!(f, "Up"),
            Self::Down => write!(f, "Down"),
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
        }
    }
}

/// Modifier keys held when an input event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ModifierState {
    /// Control key held.
    pub ctrl: bool,
    /// Alt/Option key held.
    pub alt: bool,
    /// Shift key held.
    pub shift: bool,
    /// Meta/Command/Super key held.
    pub meta: bool,
}

impl ModifierState {
    /// No modifiers held.
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };
}

/// Per-modifier requirements of a binding.
///
/// Each modifier is required held (`Some(true)`), required released
/// (`Some(false)`), or ignored (`None`). An event matches only when every
/// stated requirement agrees exactly with the event's modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ModifierRules {
    /// Requirement on the Control key.
    pub ctrl: Option<bool>,
    /// Requirement on the Alt/Option key.
    pub alt: Option<bool>,
    /// Requirement on the Shift key.
    pub shift: Option<bool>,
    /// Requirement on the Meta/Command/Super key.
    pub meta: Option<bool>,
}

impl ModifierRules {
    /// No requirements; any modifier state matches.
    pub fn any() -> Self {
        Self::default()
    }

    /// Pin all four modifiers to the given state exactly.
    pub fn exact(state: ModifierState) -> Self {
        Self {
            ctrl: Some(state.ctrl),
            alt: Some(state.alt),
            shift: Some(state.shift),
            meta: Some(state.meta),
        }
    }

    /// Require the Control key held (or released).
    pub fn ctrl(mut self, required: bool) -> Self {
        self.ctrl = Some(required);
        self
    }

    /// Require the Alt/Option key held (or released).
    pub fn alt(mut self, required: bool) -> Self {
        self.alt = Some(required);
        self
    }

    /// Require the Shift key held (or released).
    pub fn shift(mut self, required: bool) -> Self {
        self.shift = Some(required);
        self
    }

    /// Require the Meta/Command/Super key held (or released).
    pub fn meta(mut self, required: bool) -> Self {
        self.meta = Some(required);
        self
    }

    /// True when the event's modifier state satisfies every stated
    /// requirement.
    pub fn admits(&self, state: &ModifierState) -> bool {
        fn check(rule: Option<bool>, actual: bool) -> bool {
            rule.is_none_or(|required| required == actual)
        }
        check(self.ctrl, state.ctrl)
            && check(self.alt, state.alt)
            && check(self.shift, state.shift)
            && check(self.meta, state.meta)
    }
}

impl fmt::Display for ModifierRules {
    /// Renders the required-held modifiers as a legend prefix,
    /// e.g. "Ctrl+Shift+".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl == Some(true) {
            write!(f, "Ctrl+")?;
        }
        if self.shift == Some(true) {
            write!(f, "Shift+")?;
        }
        if self.alt == Some(true) {
            write!(f, "Alt+")?;
        }
        if self.meta == Some(true) {
            write!(f, "Meta+")?;
        }
        Ok(())
    }
}

/// Where input focus sat when an event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusContext {
    /// No text-entry surface focused; all bindings are eligible.
    #[default]
    General,
    /// A text field, text area, or other editable region held focus.
    /// Only Escape bindings stay eligible.
    TextEntry,
}

/// A single key-press as the dispatcher consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    /// The key symbol pressed.
    pub key: Key,
    /// Modifier keys held at the time.
    pub modifiers: ModifierState,
    /// Focus context the event originated in.
    pub focus: FocusContext,
}

impl KeyInput {
    /// An event with no modifiers, outside any text-entry surface.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: ModifierState::NONE,
            focus: FocusContext::General,
        }
    }

    /// Set the modifier state.
    pub fn modifiers(mut self, modifiers: ModifierState) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the focus context.
    pub fn focus(mut self, focus: FocusContext) -> Self {
        self.focus = focus;
        self
    }
}
