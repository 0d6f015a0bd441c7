//! Bounded undo/redo stacks.
//!
//! Responsibilities:
//! - Own the undo and redo stacks with strict LIFO discipline.
//! - Invalidate the redo stack whenever a new action is recorded.
//! - Keep a failed command on its originating stack so nothing is lost.
//!
//! Does NOT handle:
//! - What a command actually does (see `command` module).
//! - User-facing notices; callers render the returned records.
//!
//! Invariants:
//! - Redo is only reachable via a prior undo; history is linear, never a
//!   branching command log.
//! - Neither stack exceeds `max_size`; eviction drops the oldest entry.

use std::collections::VecDeque;

use crate::command::{Command, CommandRecord};

/// Maximum number of commands kept on each stack by default.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Ordered history of reversible commands.
///
/// One instance is constructed by the application's composition root and
/// shared with every feature that records reversible actions. All mutation
/// happens on the UI control thread; the type is deliberately not `Sync`.
#[derive(Debug)]
pub struct CommandHistory {
    /// Commands that can be undone, newest at the back.
    undo_stack: VecDeque<Command>,
    /// Commands that were undone and can be re-applied, newest at the back.
    redo_stack: VecDeque<Command>,
    /// Bound applied to both stacks.
    max_size: usize,
}

impl CommandHistory {
    /// Create a history bounded at [`DEFAULT_MAX_HISTORY`] entries.
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_MAX_HISTORY)
    }

    /// Create a history with a custom bound. A bound of zero is treated
    /// as one; a history that can hold nothing would make every `add` a
    /// silent drop.
    pub fn with_max_size(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(max_size),
            redo_stack: VecDeque::new(),
            max_size,
        }
    }

    /// Record a new reversible action.
    ///
    /// Clears the redo stack: a new action invalidates any previously
    /// undone-then-redoable branch. Evicts the oldest entries once the
    /// undo stack exceeds its bound. Always succeeds.
    pub fn add(&mut self, command: Command) {
        tracing::debug!(id = command.id(), "recording command");
        self.undo_stack.push_back(command);
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Undo the most recent command.
    ///
    /// Returns `None` when the undo stack is empty or the command's undo
    /// capability failed. On failure the command is restored to the top of
    /// the undo stack, so a subsequent `undo` retries it.
    pub fn undo(&mut self) -> Option<CommandRecord> {
        let command = self.undo_stack.pop_back()?;
        match command.apply_undo() {
            Ok(()) => {
                tracing::debug!(id = command.id(), "undone");
                let record = command.record();
                self.push_redo(command);
                Some(record)
            }
            Err(e) => {
                tracing::warn!(id = command.id(), error = %e, "undo capability failed");
                self.undo_stack.push_back(command);
                None
            }
        }
    }

    /// Re-apply the most recently undone command.
    ///
    /// Symmetric with [`undo`](Self::undo): `None` on an empty redo stack or
    /// a failed redo capability, with the command restored on failure.
    pub fn redo(&mut self) -> Option<CommandRecord> {
        let command = self.redo_stack.pop_back()?;
        match command.apply_redo() {
            Ok(()) => {
                tracing::debug!(id = command.id(), "redone");
                let record = command.record();
                self.push_undo(command);
                Some(record)
            }
            Err(e) => {
                tracing::warn!(id = command.id(), error = %e, "redo capability failed");
                self.redo_stack.push_back(command);
                None
            }
        }
    }

    /// True when at least one command can be undone.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// True when at least one command can be redone.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Description of the next command `undo` would reverse, for menu
    /// labels like "Undo: Went offline".
    pub fn last_action(&self) -> Option<&str> {
        self.undo_stack.back().map(|c| c.description())
    }

    /// Empty both stacks. Used on logout or a full state reset.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Number of commands currently undoable.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of commands currently redoable.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    fn push_undo(&mut self, command: Command) {
        self.undo_stack.push_back(command);
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }
    }

    fn push_redo(&mut self, command: Command) {
        self.redo_stack.push_back(command);
        while self.redo_stack.len() > self.max_size {
            self.redo_stack.pop_front();
        }
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, CommandError};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn noop_command(id: &str, description: &str) -> Command {
        Command::from_fns(id, description, || Ok(()), || Ok(()))
    }

    /// Command whose capabilities append their invocations to a shared log.
    fn logging_command(id: &str, log: &Rc<RefCell<Vec<String>>>) -> Command {
        let undo_log = log.clone();
        let redo_log = log.clone();
        let undo_tag = format!("undo:{id}");
        let redo_tag = format!("redo:{id}");
        Command::from_fns(
            id,
            id,
            move || {
                undo_log.borrow_mut().push(undo_tag.clone());
                Ok(())
            },
            move || {
                redo_log.borrow_mut().push(redo_tag.clone());
                Ok(())
            },
        )
    }

    #[test]
    fn test_undo_yields_commands_newest_first() {
        let mut history = CommandHistory::new();
        for i in 1..=5 {
            history.add(noop_command(&format!("c{i}"), &format!("step {i}")));
        }

        let order: Vec<String> = std::iter::from_fn(|| history.undo())
            .map(|r| r.id)
            .collect();
        assert_eq!(order, ["c5", "c4", "c3", "c2", "c1"]);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_redo_round_trip() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut history = CommandHistory::new();
        history.add(logging_command("toggle", &log));

        assert!(history.undo().is_some());
        assert!(history.redo().is_some());

        assert!(history.can_undo());
        assert!(!history.can_redo());
        // Undo then redo, each exactly once, in that order.
        assert_eq!(*log.borrow(), ["undo:toggle", "redo:toggle"]);
    }

    #[test]
    fn test_new_action_invalidates_redo() {
        let mut history = CommandHistory::new();
        history.add(noop_command("c1", "first"));
        history.undo();
        assert!(history.can_redo());

        history.add(noop_command("c2", "second"));
        assert!(!history.can_redo());
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_bounded_eviction_drops_oldest() {
        let mut history = CommandHistory::new();
        for i in 1..=(DEFAULT_MAX_HISTORY + 1) {
            history.add(noop_command(&format!("c{i}"), &format!("step {i}")));
        }
        assert_eq!(history.undo_count(), DEFAULT_MAX_HISTORY);

        // The newest command is the first popped; the very first command
        // fell off the bottom and is unreachable.
        assert_eq!(history.undo().unwrap().id, "c51");
        let mut last = String::new();
        while let Some(record) = history.undo() {
            last = record.id;
        }
        assert_eq!(last, "c2");
    }

    #[test]
    fn test_failed_undo_preserves_the_command() {
        let attempts = Rc::new(Cell::new(0u32));
        let counter = attempts.clone();
        let mut history = CommandHistory::new();
        history.add(noop_command("older", "older"));
        history.add(Command::from_fns(
            "flaky",
            "flaky",
            move || {
                counter.set(counter.get() + 1);
                if counter.get() == 1 {
                    Err(CommandError::new("load already departed"))
                } else {
                    Ok(())
                }
            },
            || Ok(()),
        ));

        // First attempt fails: nothing moves to the redo stack.
        assert_eq!(history.undo(), None);
        assert_eq!(history.undo_count(), 2);
        assert_eq!(history.redo_count(), 0);

        // Retry pops the same command, not the older one.
        let record = history.undo().unwrap();
        assert_eq!(record.id, "flaky");
        assert_eq!(attempts.get(), 2);
        assert_eq!(history.undo_count(), 1);
    }

    #[test]
    fn test_failed_redo_preserves_the_command() {
        let fail_next = Rc::new(Cell::new(false));
        let flag = fail_next.clone();
        let mut history = CommandHistory::new();
        history.add(Command::from_fns(
            "flaky",
            "flaky",
            || Ok(()),
            move || {
                if flag.get() {
                    Err(CommandError::new("slot taken"))
                } else {
                    Ok(())
                }
            },
        ));

        history.undo().unwrap();
        fail_next.set(true);
        assert_eq!(history.redo(), None);
        assert_eq!(history.redo_count(), 1);
        assert_eq!(history.undo_count(), 0);

        fail_next.set(false);
        assert_eq!(history.redo().unwrap().id, "flaky");
        assert_eq!(history.undo_count(), 1);
    }

    #[test]
    fn test_empty_stacks_are_silent_noops() {
        let mut history = CommandHistory::new();
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.last_action(), None);
    }

    #[test]
    fn test_last_action_tracks_the_top() {
        let mut history = CommandHistory::new();
        assert_eq!(history.last_action(), None);

        history.add(noop_command("c1", "Went offline"));
        history.add(noop_command("c2", "Accepted load #17"));
        assert_eq!(history.last_action(), Some("Accepted load #17"));

        history.undo();
        assert_eq!(history.last_action(), Some("Went offline"));
    }

    #[test]
    fn test_clear_empties_both_stacks() {
        let mut history = CommandHistory::new();
        history.add(noop_command("c1", "first"));
        history.add(noop_command("c2", "second"));
        history.undo();

        history.clear();
        assert_eq!(history.undo_count(), 0);
        assert_eq!(history.redo_count(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_zero_max_size_is_clamped() {
        let mut history = CommandHistory::with_max_size(0);
        history.add(noop_command("c1", "first"));
        assert_eq!(history.undo_count(), 1);

        history.add(noop_command("c2", "second"));
        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.last_action(), Some("second"));
    }

    #[test]
    fn test_duplicate_ids_do_not_corrupt_order() {
        // Stacks are keyed by position, not id.
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut history = CommandHistory::new();
        history.add(logging_command("same", &log));
        history.add(logging_command("same", &log));

        history.undo();
        history.undo();
        assert_eq!(*log.borrow(), ["undo:same", "undo:same"]);
        assert_eq!(history.redo_count(), 2);
    }
}
