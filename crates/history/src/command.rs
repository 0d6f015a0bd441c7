//! Reversible command records.
//!
//! Responsibilities:
//! - Define the [`Reversible`] contract that undoable actions implement.
//! - Define the immutable [`Command`] record held by the history stacks.
//! - Define [`CommandRecord`], the owned snapshot surfaced to callers.
//!
//! Does NOT handle:
//! - Stack ordering or eviction (see `history` module).
//! - Rendering of notices; callers decide how a record is displayed.
//!
//! Invariants:
//! - A `Command` is immutable once constructed; its fields are private.
//! - Capabilities are invoked at most once per undo/redo cycle and must not
//!   reach back into the history stacks.

use std::fmt;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;

/// Error raised by a failed undo or redo capability.
///
/// The history never propagates this as a panic; a failed capability leaves
/// its command on the originating stack so the action can be retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CommandError {
    message: String,
}

impl CommandError {
    /// Create an error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for CommandError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for CommandError {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// A reversible action: something that knows how to take its effect back and
/// how to re-apply it.
///
/// Implementations complete synchronously. Any asynchronous work they kick
/// off is the caller's concern and outside the history's guarantees.
pub trait Reversible {
    /// Reverse the action's effect.
    fn apply_undo(&self) -> Result<(), CommandError>;

    /// Re-apply the action's effect after it was undone.
    fn apply_redo(&self) -> Result<(), CommandError>;
}

/// Adapter turning a pair of closures into a [`Reversible`].
struct FnReversible<U, R> {
    undo: U,
    redo: R,
}

impl<U, R> Reversible for FnReversible<U, R>
where
    U: Fn() -> Result<(), CommandError>,
    R: Fn() -> Result<(), CommandError>,
{
    fn apply_undo(&self) -> Result<(), CommandError> {
        (self.undo)()
    }

    fn apply_redo(&self) -> Result<(), CommandError> {
        (self.redo)()
    }
}

/// A recorded reversible action.
///
/// Created by a feature at the moment a reversible action occurs and handed
/// to [`CommandHistory::add`](crate::CommandHistory::add). The `id` is a
/// caller-supplied stable identifier used only for diagnostics; the stacks
/// are keyed by position, never by id.
pub struct Command {
    id: String,
    description: String,
    action: Box<dyn Reversible>,
    recorded_at: Instant,
}

impl Command {
    /// Create a command from an id, a description, and a reversible action.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        action: impl Reversible + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            action: Box::new(action),
            recorded_at: Instant::now(),
        }
    }

    /// Create a command from a pair of closures.
    ///
    /// Convenience for features that do not want to hand-write a
    /// [`Reversible`] impl.
    pub fn from_fns<U, R>(
        id: impl Into<String>,
        description: impl Into<String>,
        undo: U,
        redo: R,
    ) -> Self
    where
        U: Fn() -> Result<(), CommandError> + 'static,
        R: Fn() -> Result<(), CommandError> + 'static,
    {
        Self::new(id, description, FnReversible { undo, redo })
    }

    /// Caller-supplied identifier, for diagnostics only.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable label surfaced to the user.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Creation time. Informational only; stack order is authoritative.
    pub fn recorded_at(&self) -> Instant {
        self.recorded_at
    }

    /// Invoke the undo capability.
    pub fn apply_undo(&self) -> Result<(), CommandError> {
        self.action.apply_undo()
    }

    /// Invoke the redo capability.
    pub fn apply_redo(&self) -> Result<(), CommandError> {
        self.action.apply_redo()
    }

    /// Owned snapshot of this command's identifying fields.
    pub fn record(&self) -> CommandRecord {
        CommandRecord {
            id: self.id.clone(),
            description: self.description.clone(),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("recorded_at", &self.recorded_at)
            .finish_non_exhaustive()
    }
}

/// Owned snapshot of a command, returned by undo/redo and suitable for
/// notices like "Undone: Went offline".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRecord {
    /// Caller-supplied identifier.
    pub id: String,
    /// Human-readable label.
    pub description: String,
}

impl fmt::Display for CommandRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}
