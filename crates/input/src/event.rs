//! Crossterm event adaptation.
//!
//! Responsibilities:
//! - Convert `crossterm` key events into the dispatcher's [`KeyInput`].
//!
//! Does NOT handle:
//! - Focus classification; the host knows which of its widgets holds
//!   focus and stamps the [`FocusContext`] itself.
//! - Key release events; the dispatcher consumes presses only.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::key::{FocusContext, Key, KeyInput, ModifierState};

impl KeyInput {
    /// Convert a crossterm key event.
    ///
    /// Returns `None` for key releases and for codes the shortcut model
    /// has no symbol for (media keys, lock keys); those events pass
    /// through to the host untouched.
    pub fn from_key_event(event: &KeyEvent, focus: FocusContext) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let key = key_from_code(event.code)?;
        Some(Self {
            key,
            modifiers: modifier_state(event.modifiers),
            focus,
        })
    }
}

fn key_from_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::F(n) => Some(Key::F(n)),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::BackTab => Some(Key::BackTab),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Insert => Some(Key::Insert),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        _ => None,
    }
}

fn modifier_state(modifiers: KeyModifiers) -> ModifierState {
    ModifierState {
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
        shift: modifiers.contains(KeyModifiers::SHIFT),
        meta: modifiers.contains(KeyModifiers::SUPER) || modifiers.contains(KeyModifiers::META),
    }
}
