//! Entry stage of the machine builder.

use std::collections::HashMap;
use std::sync::Arc;

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::core::guard::Guard;
use crate::core::id::{StateId, TriggerId};
use crate::core::state::{ChangeHandler, Note, StateChange, StateNode};
use crate::core::MachineDefinition;
use crate::diagnostics::{default_sink, DiagnosticSink};
use crate::machine::Machine;

/// Builder for assembling a machine declaratively.
///
/// Obtained from [`Machine::builder`]. Selecting a state with
/// [`state`](Self::state) moves to the state stage; from there,
/// [`to`](StateBuilder::to) moves to the transition stage. Each stage is a
/// distinct type exposing only the operations valid at that point, so
/// out-of-order calls fail to compile rather than at runtime. Builders are
/// single-use: `build` consumes the chain.
///
/// # Example
///
/// ```rust
/// use machina::Machine;
///
/// machina::id_enum! {
///     enum Door { Open, Closed }
/// }
/// machina::id_enum! {
///     enum Push { Toggle }
/// }
///
/// let mut door = Machine::builder(Door::Closed)
///     .state(Door::Closed)
///     .to(Door::Open)
///     .on(Push::Toggle)
///     .state(Door::Open)
///     .to(Door::Closed)
///     .on(Push::Toggle)
///     .build()
///     .unwrap();
///
/// assert!(door.fire(Push::Toggle));
/// assert_eq!(door.current_state().id(), &Door::Open);
/// ```
pub struct MachineBuilder<S: StateId, T: TriggerId> {
    states: Vec<StateNode<S, T>>,
    index: HashMap<S, usize>,
    initial: S,
    sink: Arc<dyn DiagnosticSink>,
}

impl<S: StateId, T: TriggerId> MachineBuilder<S, T> {
    /// Start a builder whose machine begins in `initial`.
    ///
    /// The initial state still has to be declared with
    /// [`state`](Self::state) before `build` succeeds.
    pub fn new(initial: S) -> Self {
        MachineBuilder {
            states: Vec::new(),
            index: HashMap::new(),
            initial,
            sink: default_sink(),
        }
    }

    /// Inject the diagnostic sink. Defaults to [`NullSink`].
    ///
    /// [`NullSink`]: crate::diagnostics::NullSink
    pub fn sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Declare `id`, or re-select it if already declared.
    ///
    /// Re-declaration is idempotent and additive: subsequent handler, note,
    /// and transition calls append to the existing state.
    pub fn state(mut self, id: S) -> StateBuilder<S, T> {
        let position = self.ensure_state(id);
        StateBuilder::new(self, position)
    }

    /// Build the machine without a change handler.
    pub fn build(self) -> Result<Machine<S, T>, BuildError> {
        self.finish(None)
    }

    /// Build the machine, registering `on_change` to run after every
    /// executed transition.
    pub fn build_with(
        self,
        on_change: impl FnMut(&StateChange<S, T>) + 'static,
    ) -> Result<Machine<S, T>, BuildError> {
        self.finish(Some(Box::new(on_change)))
    }

    pub(crate) fn finish(
        self,
        on_change: Option<ChangeHandler<S, T>>,
    ) -> Result<Machine<S, T>, BuildError> {
        let Some(&initial) = self.index.get(&self.initial) else {
            self.sink.error(&format!(
                "cannot build: initial state `{}` was never declared",
                self.initial
            ));
            return Err(BuildError::UndeclaredInitial {
                state: self.initial.to_string(),
            });
        };

        let mut definition = MachineDefinition::new(self.states, self.index, initial);
        if let Some(handler) = on_change {
            definition.push_on_change(handler);
        }
        Ok(Machine::from_parts(definition, self.sink))
    }

    fn ensure_state(&mut self, id: S) -> usize {
        if let Some(&position) = self.index.get(&id) {
            return position;
        }
        self.states.push(StateNode::new(id.clone()));
        let position = self.states.len() - 1;
        self.index.insert(id, position);
        position
    }

    pub(crate) fn push_note(&mut self, state: usize, note: Note) {
        self.states[state].push_note(note);
    }

    pub(crate) fn push_enter(&mut self, state: usize, handler: ChangeHandler<S, T>) {
        self.states[state].push_enter(handler);
    }

    pub(crate) fn push_exit(&mut self, state: usize, handler: ChangeHandler<S, T>) {
        self.states[state].push_exit(handler);
    }

    pub(crate) fn ensure_transition(&mut self, state: usize, destination: S) -> usize {
        self.states[state].ensure_transition(destination)
    }

    pub(crate) fn push_trigger(&mut self, state: usize, transition: usize, trigger: T) {
        self.states[state]
            .transition_at_mut(transition)
            .push_trigger(trigger);
    }

    pub(crate) fn push_guard(&mut self, state: usize, transition: usize, guard: Guard<S>) {
        self.states[state]
            .transition_at_mut(transition)
            .push_guard(guard);
    }
}
