//! State stage of the machine builder.

use crate::builder::error::BuildError;
use crate::builder::machine::MachineBuilder;
use crate::builder::transition::TransitionBuilder;
use crate::core::id::{StateId, TriggerId};
use crate::core::state::{Note, NoteDirection, StateChange};
use crate::machine::Machine;

/// Builder stage with a state selected.
///
/// Notes and lifecycle handlers registered here append to the selected
/// state; [`to`](Self::to) opens a transition towards a destination and
/// moves to the transition stage.
pub struct StateBuilder<S: StateId, T: TriggerId> {
    inner: MachineBuilder<S, T>,
    state: usize,
}

impl<S: StateId, T: TriggerId> StateBuilder<S, T> {
    pub(crate) fn new(inner: MachineBuilder<S, T>, state: usize) -> Self {
        StateBuilder { inner, state }
    }

    /// Declare or re-select another state.
    pub fn state(self, id: S) -> StateBuilder<S, T> {
        self.inner.state(id)
    }

    /// Attach a diagram note to the selected state.
    pub fn note(mut self, message: impl Into<String>, direction: NoteDirection) -> Self {
        self.inner.push_note(self.state, Note::new(message, direction));
        self
    }

    /// Append an enter handler to the selected state.
    ///
    /// Handlers accumulate: every registered handler runs, in registration
    /// order, each time the state is entered.
    pub fn on_enter(mut self, handler: impl FnMut(&StateChange<S, T>) + 'static) -> Self {
        self.inner.push_enter(self.state, Box::new(handler));
        self
    }

    /// Append an exit handler to the selected state.
    pub fn on_exit(mut self, handler: impl FnMut(&StateChange<S, T>) + 'static) -> Self {
        self.inner.push_exit(self.state, Box::new(handler));
        self
    }

    /// Select or create the transition from the selected state towards
    /// `destination`, moving to the transition stage.
    ///
    /// Like state declaration, this is idempotent: re-selecting an existing
    /// destination appends to the same transition.
    pub fn to(mut self, destination: S) -> TransitionBuilder<S, T> {
        let transition = self.inner.ensure_transition(self.state, destination);
        TransitionBuilder::new(self.inner, self.state, transition)
    }

    /// Build the machine without a change handler.
    pub fn build(self) -> Result<Machine<S, T>, BuildError> {
        self.inner.build()
    }

    /// Build the machine with a change handler.
    pub fn build_with(
        self,
        on_change: impl FnMut(&StateChange<S, T>) + 'static,
    ) -> Result<Machine<S, T>, BuildError> {
        self.inner.build_with(on_change)
    }
}
