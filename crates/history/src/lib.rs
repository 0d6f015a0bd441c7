//! Reversible-action history for the Drover TUI.
//!
//! This crate provides the single source of truth for "what can be undone or
//! redone right now": features record reversible actions as [`Command`]s and
//! push them through a shared [`CommandHistory`], which enforces strict LIFO
//! discipline and redo invalidation.
//!
//! # Example
//!
//! ```
//! use drover_history::{Command, CommandHistory};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut history = CommandHistory::new();
//! let online = Rc::new(Cell::new(false));
//!
//! let flag = online.clone();
//! let unflag = online.clone();
//! history.add(Command::from_fns(
//!     "driver-status-toggle",
//!     "Went offline",
//!     move || Ok(flag.set(true)),
//!     move || Ok(unflag.set(false)),
//! ));
//!
//! let undone = history.undo().unwrap();
//! assert_eq!(undone.description, "Went offline");
//! assert!(online.get());
//! ```

pub mod command;
pub mod history;

pub use command::{Command, CommandError, CommandRecord, Reversible};
pub use history::{CommandHistory, DEFAULT_MAX_HISTORY};
