//! The complete, post-build machine topology.

use std::collections::HashMap;
use std::fmt;

use super::id::{StateId, TriggerId};
use super::state::{ChangeHandler, StateChange, StateNode};

/// The assembled topology of a machine plus its current-state pointer.
///
/// States are kept in registration order; a hash index maps identifiers to
/// their position. The topology — states, transitions, triggers, guards —
/// is fixed once building completes. At runtime only the current-state
/// pointer moves, and the only permitted registrations are change handlers
/// and diagram notes.
pub struct MachineDefinition<S: StateId, T: TriggerId> {
    states: Vec<StateNode<S, T>>,
    index: HashMap<S, usize>,
    initial: usize,
    current: usize,
    on_change: Vec<ChangeHandler<S, T>>,
}

impl<S: StateId, T: TriggerId> MachineDefinition<S, T> {
    /// `initial` must be a valid position into `states`; the builder
    /// validates this before construction.
    pub(crate) fn new(states: Vec<StateNode<S, T>>, index: HashMap<S, usize>, initial: usize) -> Self {
        MachineDefinition {
            states,
            index,
            initial,
            current: initial,
            on_change: Vec::new(),
        }
    }

    /// All declared states, in registration order.
    pub fn states(&self) -> &[StateNode<S, T>] {
        &self.states
    }

    /// Look up a state by identifier.
    pub fn state(&self, id: &S) -> Option<&StateNode<S, T>> {
        self.index.get(id).map(|&position| &self.states[position])
    }

    /// Whether `id` names a declared state.
    pub fn contains(&self, id: &S) -> bool {
        self.index.contains_key(id)
    }

    /// The state the machine started in.
    pub fn initial_state(&self) -> &StateNode<S, T> {
        &self.states[self.initial]
    }

    /// The state the machine is currently in.
    pub fn current_state(&self) -> &StateNode<S, T> {
        &self.states[self.current]
    }

    pub(crate) fn position(&self, id: &S) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn current_position(&self) -> usize {
        self.current
    }

    pub(crate) fn set_current(&mut self, position: usize) {
        self.current = position;
    }

    pub(crate) fn state_at_mut(&mut self, position: usize) -> &mut StateNode<S, T> {
        &mut self.states[position]
    }

    pub(crate) fn push_on_change(&mut self, handler: ChangeHandler<S, T>) {
        self.on_change.push(handler);
    }

    /// Run all change handlers, in registration order.
    pub(crate) fn notify(&mut self, change: &StateChange<S, T>) {
        for handler in &mut self.on_change {
            handler(change);
        }
    }
}

impl<S: StateId, T: TriggerId> fmt::Debug for MachineDefinition<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineDefinition")
            .field("states", &self.states)
            .field("initial", self.initial_state().id())
            .field("current", self.current_state().id())
            .field("on_change", &self.on_change.len())
            .finish()
    }
}
