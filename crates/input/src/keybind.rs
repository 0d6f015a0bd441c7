//! Combo parsing and legend formatting.
//!
//! Responsibilities:
//! - Parse human-readable combo strings ("Ctrl+z", "Shift+Tab", "F5") into
//!   a [`KeyCombo`].
//! - Render combos back into their canonical legend form.
//!
//! Does NOT handle:
//! - Registry state or dispatch (see `dispatcher` module).
//! - Host event conversion (see `event` module).
//!
//! Invariants:
//! - A parsed combo pins all four modifiers exactly: listed modifiers are
//!   required held, unlisted ones required released.
//! - Modifier tokens are case-insensitive; character keys keep their case
//!   (matching is case-insensitive anyway).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::key::{Key, ModifierRules, ModifierState};

/// Errors from parsing a combo string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeybindError {
    /// The string is empty, has several key tokens, or names no key.
    #[error("invalid key combo: '{combo}'. Expected format like 'z', 'Ctrl+z', 'Shift+Tab', 'F5'")]
    InvalidSyntax {
        /// The offending combo string.
        combo: String,
    },

    /// A token that is neither a modifier nor a known key name.
    #[error("unknown key name: '{name}'")]
    UnknownKey {
        /// The unknown token.
        name: String,
    },
}

/// A key plus fully-pinned modifier requirements, as read from a combo
/// string or built in code for legend display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// The key symbol.
    pub key: Key,
    /// The modifier requirements. Parsed combos pin all four.
    pub rules: ModifierRules,
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rules, self.key)
    }
}

impl FromStr for KeyCombo {
    type Err = KeybindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_combo(s)
    }
}

/// Parse a combo string like "Ctrl+z", "meta+d", or "Shift+Tab".
///
/// Listed modifiers become required-held, unlisted ones required-released,
/// so the combo matches exactly the chord it names. "Shift+Tab" normalizes
/// to the BackTab key the way terminals report it.
pub fn parse_combo(combo: &str) -> Result<KeyCombo, KeybindError> {
    let trimmed = combo.trim();
    if trimmed.is_empty() {
        return Err(KeybindError::InvalidSyntax {
            combo: combo.to_string(),
        });
    }

    let mut held = ModifierState::NONE;
    let mut key_token: Option<&str> = None;

    for part in trimmed.split('+').map(str::trim) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => held.ctrl = true,
            "alt" | "option" => held.alt = true,
            "shift" => held.shift = true,
            "meta" | "cmd" | "command" | "super" | "win" => held.meta = true,
            _ => {
                if key_token.replace(part).is_some() {
                    // Two non-modifier tokens.
                    return Err(KeybindError::InvalidSyntax {
                        combo: combo.to_string(),
                    });
                }
            }
        }
    }

    let Some(name) = key_token else {
        return Err(KeybindError::InvalidSyntax {
            combo: combo.to_string(),
        });
    };

    let mut key = parse_key_name(name)?;
    // Terminals report Shift+Tab as its own key.
    if key == Key::Tab && held.shift {
        key = Key::BackTab;
    }

    Ok(KeyCombo {
        key,
        rules: ModifierRules::exact(held),
    })
}

/// Parse a single key token (no modifiers).
fn parse_key_name(name: &str) -> Result<Key, KeybindError> {
    match name.to_ascii_lowercase().as_str() {
        "esc" | "escape" => return Ok(Key::Esc),
        "enter" | "return" => return Ok(Key::Enter),
        "space" => return Ok(Key::Space),
        "tab" => return Ok(Key::Tab),
        "backtab" => return Ok(Key::BackTab),
        "backspace" => return Ok(Key::Backspace),
        "delete" | "del" => return Ok(Key::Delete),
        "insert" | "ins" => return Ok(Key::Insert),
        "home" => return Ok(Key::Home),
        "end" => return Ok(Key::End),
        "pageup" | "pgup" => return Ok(Key::PageUp),
        "pagedown" | "pgdn" => return Ok(Key::PageDown),
        "up" => return Ok(Key::Up),
        "down" => return Ok(Key::Down),
        "left" => return Ok(Key::Left),
        "right" => return Ok(Key::Right),
        lower => {
            if let Some(num) = lower.strip_prefix('f')
                && let Ok(n) = num.parse::<u8>()
                && (1..=20).contains(&n)
            {
                return Ok(Key::F(n));
            }
        }
    }

    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(Key::Char(c));
    }

    Err(KeybindError::UnknownKey {
        name: name.to_string(),
    })
}
