//! Shortcut registry and event dispatch.
//!
//! Responsibilities:
//! - Own the registry of named shortcut bindings in registration order.
//! - Translate each key-press into at most one handler invocation,
//!   honoring text-entry focus and enable/disable flags.
//! - Manage the attach/detach lifecycle against a host [`InputSource`].
//!
//! Does NOT handle:
//! - What handlers do; they are opaque callbacks owned by the registry.
//! - Focus classification; the host stamps each event's [`FocusContext`].
//!
//! Invariants:
//! - First-registered-wins: bindings are evaluated in registration order
//!   and evaluation stops at the first match.
//! - Re-registering an id replaces the binding in place, keeping its
//!   original position so shortcut precedence stays stable.
//! - While a text-entry surface has focus, only Escape bindings are
//!   eligible.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::key::{FocusContext, Key, KeyInput, ModifierRules};
use crate::keybind::KeyCombo;
use crate::source::{InputSource, SubscriptionId};

/// A registered association between a key chord and a handler.
pub struct ShortcutBinding {
    key: Key,
    modifiers: ModifierRules,
    description: String,
    handler: Box<dyn FnMut()>,
    enabled: bool,
}

impl ShortcutBinding {
    /// Create a binding on a bare key with no modifier requirements.
    pub fn new(
        key: Key,
        description: impl Into<String>,
        handler: impl FnMut() + 'static,
    ) -> Self {
        Self {
            key,
            modifiers: ModifierRules::any(),
            description: description.into(),
            handler: Box::new(handler),
            enabled: true,
        }
    }

    /// Create a binding from a parsed combo, pinning its exact chord.
    pub fn from_combo(
        combo: KeyCombo,
        description: impl Into<String>,
        handler: impl FnMut() + 'static,
    ) -> Self {
        Self::new(combo.key, description, handler).modifiers(combo.rules)
    }

    /// Set the modifier requirements.
    pub fn modifiers(mut self, modifiers: ModifierRules) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Register the binding in a disabled state; it is skipped during
    /// matching until re-enabled.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// The key this binding triggers on.
    pub fn key(&self) -> Key {
        self.key
    }

    /// Human-readable label for help legends.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the binding currently participates in matching.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn combo_label(&self) -> String {
        format!("{}{}", self.modifiers, self.key)
    }
}

impl fmt::Debug for ShortcutBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutBinding")
            .field("key", &self.key)
            .field("modifiers", &self.modifiers)
            .field("description", &self.description)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Owned snapshot of one registered binding, for help/legend UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortcutInfo {
    /// Registry id.
    pub id: String,
    /// Formatted chord, e.g. "Ctrl+Shift+z".
    pub combo: String,
    /// Human-readable label.
    pub description: String,
    /// Whether the binding currently participates in matching.
    pub enabled: bool,
}

struct Entry {
    id: String,
    binding: ShortcutBinding,
}

/// Global keyboard-shortcut dispatcher.
///
/// Two lifecycle states: stopped (initial) and listening. [`start`]
/// transitions stopped to listening by subscribing to the host source,
/// [`stop`] the reverse; both are no-ops when already in the target state.
/// Events are only dispatched while listening.
///
/// [`start`]: Self::start
/// [`stop`]: Self::stop
pub struct ShortcutDispatcher {
    /// Bindings in registration order; the order is the match precedence.
    entries: Vec<Entry>,
    /// id -> position in `entries`.
    index: HashMap<String, usize>,
    /// Dispatcher-wide kill switch.
    enabled: bool,
    /// Present exactly while listening.
    subscription: Option<SubscriptionId>,
}

impl ShortcutDispatcher {
    /// Create a stopped dispatcher with an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            enabled: true,
            subscription: None,
        }
    }

    /// Insert or replace the binding under `id`.
    ///
    /// A new id is appended to the match order; replacing an existing id
    /// keeps its original position.
    pub fn register(&mut self, id: impl Into<String>, binding: ShortcutBinding) {
        let id = id.into();
        match self.index.get(&id) {
            Some(&position) => {
                tracing::debug!(id = %id, combo = %binding.combo_label(), "replacing shortcut");
                self.entries[position].binding = binding;
            }
            None => {
                tracing::debug!(id = %id, combo = %binding.combo_label(), "registering shortcut");
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push(Entry { id, binding });
            }
        }
    }

    /// Remove the binding under `id`. Absent ids are a no-op.
    pub fn unregister(&mut self, id: &str) {
        let Some(position) = self.index.remove(id) else {
            return;
        };
        self.entries.remove(position);
        for entry in &self.entries[position..] {
            if let Some(slot) = self.index.get_mut(&entry.id) {
                *slot -= 1;
            }
        }
        tracing::debug!(id = %id, "unregistered shortcut");
    }

    /// Dispatcher-wide kill switch; when off, `handle_event` ignores
    /// everything while the registry stays intact.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the kill switch is on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable a single binding without disturbing its position
    /// in the match order. Returns false for an unknown id.
    pub fn set_binding_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.index.get(id) {
            Some(&position) => {
                self.entries[position].binding.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Attach to the host event source. Idempotent: a listening dispatcher
    /// does not subscribe a second time.
    pub fn start(&mut self, source: &mut dyn InputSource) {
        if self.subscription.is_none() {
            self.subscription = Some(source.subscribe());
            tracing::debug!("shortcut dispatcher listening");
        }
    }

    /// Detach from the host event source. Idempotent: a stopped dispatcher
    /// does not unsubscribe.
    pub fn stop(&mut self, source: &mut dyn InputSource) {
        if let Some(subscription) = self.subscription.take() {
            source.unsubscribe(subscription);
            tracing::debug!("shortcut dispatcher stopped");
        }
    }

    /// Whether the dispatcher is attached and handling events.
    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    /// Snapshot of all registered bindings in match order.
    pub fn shortcuts(&self) -> Vec<ShortcutInfo> {
        self.entries
            .iter()
            .map(|entry| ShortcutInfo {
                id: entry.id.clone(),
                combo: entry.binding.combo_label(),
                description: entry.binding.description.clone(),
                enabled: entry.binding.enabled,
            })
            .collect()
    }

    /// Dispatch one key-press.
    ///
    /// Returns true exactly when a binding's handler ran; the host should
    /// then suppress its default behavior for the event. At most one
    /// handler runs per event: the first registered binding that matches.
    pub fn handle_event(&mut self, event: &KeyInput) -> bool {
        if !self.enabled || self.subscription.is_none() {
            return false;
        }

        let text_entry = event.focus == FocusContext::TextEntry;
        for entry in &mut self.entries {
            let binding = &mut entry.binding;
            if !binding.enabled {
                continue;
            }
            if text_entry && binding.key != Key::Esc {
                continue;
            }
            if !binding.key.matches(event.key) {
                continue;
            }
            if !binding.modifiers.admits(&event.modifiers) {
                continue;
            }
            tracing::debug!(id = %entry.id, "shortcut matched");
            (binding.handler)();
            return true;
        }
        false
    }
}

impl Default for ShortcutDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
