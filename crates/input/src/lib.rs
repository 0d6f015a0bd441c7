//! Global keyboard-shortcut dispatch for the Drover TUI.
//!
//! This crate translates the host's raw key-press stream into at most one
//! handler invocation per event. Independent UI features register named
//! [`ShortcutBinding`]s into a shared [`ShortcutDispatcher`]; the first
//! binding registered wins among several that match the same chord, and
//! bindings other than Escape go quiet while a text-entry surface has
//! focus.
//!
//! # Example
//!
//! ```
//! use drover_input::{
//!     Key, KeyInput, ModifierRules, NullSource, ShortcutBinding, ShortcutDispatcher,
//! };
//!
//! let mut dispatcher = ShortcutDispatcher::new();
//! let mut source = NullSource::new();
//! dispatcher.register(
//!     "help",
//!     ShortcutBinding::new(Key::F(1), "Show help", || println!("help!")),
//! );
//! dispatcher.start(&mut source);
//!
//! assert!(dispatcher.handle_event(&KeyInput::plain(Key::F(1))));
//! ```

pub mod dispatcher;
pub mod event;
pub mod key;
pub mod keybind;
pub mod source;

pub use dispatcher::{ShortcutBinding, ShortcutDispatcher, ShortcutInfo};
pub use key::{FocusContext, Key, KeyInput, ModifierRules, ModifierState};
pub use keybind::{KeyCombo, KeybindError, parse_combo};
pub use source::{InputSource, NullSource, SubscriptionId};
