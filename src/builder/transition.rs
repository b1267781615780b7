//! Transition stage of the machine builder.

use crate::builder::error::BuildError;
use crate::builder::machine::MachineBuilder;
use crate::builder::state::StateBuilder;
use crate::core::guard::Guard;
use crate::core::id::{StateId, TriggerId};
use crate::core::state::{NoteDirection, StateChange};
use crate::machine::Machine;

/// Builder stage with a transition selected.
///
/// Triggers and guards registered here append to the selected transition.
/// State-stage calls (`state`, `note`, `on_enter`, `on_exit`, another `to`)
/// remain available and drop back to the owning state, mirroring the
/// progressively narrowing capability views of the fluent API.
pub struct TransitionBuilder<S: StateId, T: TriggerId> {
    inner: MachineBuilder<S, T>,
    state: usize,
    transition: usize,
}

impl<S: StateId, T: TriggerId> TransitionBuilder<S, T> {
    pub(crate) fn new(inner: MachineBuilder<S, T>, state: usize, transition: usize) -> Self {
        TransitionBuilder {
            inner,
            state,
            transition,
        }
    }

    /// Register `trigger` on the selected transition.
    ///
    /// The trigger list is a set: registering the same trigger twice has no
    /// effect. A transition with no triggers can never fire via
    /// [`Machine::fire`].
    ///
    /// [`Machine::fire`]: crate::Machine::fire
    pub fn on(mut self, trigger: T) -> Self {
        self.inner.push_trigger(self.state, self.transition, trigger);
        self
    }

    /// Append a guard predicate over `(source, destination)`.
    ///
    /// All guards on a transition must pass for it to be taken.
    pub fn guard(mut self, predicate: impl Fn(&S, &S) -> bool + 'static) -> Self {
        self.inner
            .push_guard(self.state, self.transition, Guard::new(predicate));
        self
    }

    /// Open another transition from the same source state.
    pub fn to(mut self, destination: S) -> TransitionBuilder<S, T> {
        let transition = self.inner.ensure_transition(self.state, destination);
        TransitionBuilder::new(self.inner, self.state, transition)
    }

    /// Declare or re-select a state, dropping back to the state stage.
    pub fn state(self, id: S) -> StateBuilder<S, T> {
        self.inner.state(id)
    }

    /// Attach a note to the owning state, dropping back to the state stage.
    pub fn note(self, message: impl Into<String>, direction: NoteDirection) -> StateBuilder<S, T> {
        StateBuilder::new(self.inner, self.state).note(message, direction)
    }

    /// Append an enter handler to the owning state, dropping back to the
    /// state stage.
    pub fn on_enter(
        self,
        handler: impl FnMut(&StateChange<S, T>) + 'static,
    ) -> StateBuilder<S, T> {
        StateBuilder::new(self.inner, self.state).on_enter(handler)
    }

    /// Append an exit handler to the owning state, dropping back to the
    /// state stage.
    pub fn on_exit(self, handler: impl FnMut(&StateChange<S, T>) + 'static) -> StateBuilder<S, T> {
        StateBuilder::new(self.inner, self.state).on_exit(handler)
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
