//! The runtime engine: trigger resolution and transition execution.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::builder::MachineBuilder;
use crate::core::history::{History, TransitionRecord};
use crate::core::id::{StateId, TriggerId};
use crate::core::state::{Note, NoteDirection, StateChange, StateNode};
use crate::core::MachineDefinition;
use crate::diagnostics::DiagnosticSink;
use crate::uml::{UmlDirection, UmlGenerator};

/// Errors from runtime operations against a built machine.
#[derive(Debug, Error)]
pub enum MachineError {
    /// The referenced state is not part of this machine's definition.
    #[error("state `{state}` is not part of this machine")]
    UnknownState { state: String },
}

/// A finite state machine driven by triggers and direct transitions.
///
/// Built once from a [`MachineBuilder`]; afterwards the topology is fixed
/// and only the current state moves. The machine is single-threaded and
/// synchronous: every operation runs to completion before returning, and
/// handler panics propagate to the caller uninterrupted.
///
/// # Example
///
/// ```rust
/// use machina::Machine;
///
/// machina::id_enum! {
///     enum Phase { Idle, Running }
/// }
/// machina::id_enum! {
///     enum Event { Start, Stop }
/// }
///
/// let mut machine = Machine::builder(Phase::Idle)
///     .state(Phase::Idle)
///     .to(Phase::Running)
///     .on(Event::Start)
///     .state(Phase::Running)
///     .to(Phase::Idle)
///     .on(Event::Stop)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current_state().id(), &Phase::Idle);
/// assert!(machine.fire(Event::Start));
/// assert!(!machine.fire(Event::Start));
/// assert_eq!(machine.current_state().id(), &Phase::Running);
/// ```
pub struct Machine<S: StateId, T: TriggerId> {
    definition: MachineDefinition<S, T>,
    history: History<S, T>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<S: StateId, T: TriggerId> Machine<S, T> {
    /// Start assembling a machine that begins in `initial`.
    pub fn builder(initial: S) -> MachineBuilder<S, T> {
        MachineBuilder::new(initial)
    }

    pub(crate) fn from_parts(
        definition: MachineDefinition<S, T>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Machine {
            definition,
            history: History::new(),
            sink,
        }
    }

    /// The state the machine is currently in.
    pub fn current_state(&self) -> &StateNode<S, T> {
        self.definition.current_state()
    }

    /// The state the machine started in.
    pub fn initial_state(&self) -> &StateNode<S, T> {
        self.definition.initial_state()
    }

    /// Read-only access to the assembled topology.
    pub fn definition(&self) -> &MachineDefinition<S, T> {
        &self.definition
    }

    /// Log of executed transitions, oldest first.
    pub fn history(&self) -> &History<S, T> {
        &self.history
    }

    /// Register a handler to run after every executed transition, following
    /// the destination's enter handlers.
    pub fn on_change(&mut self, handler: impl FnMut(&StateChange<S, T>) + 'static) {
        self.definition.push_on_change(Box::new(handler));
    }

    /// Fire `trigger` against the current state.
    ///
    /// The current state's transitions are scanned in registration order;
    /// the first whose trigger set contains `trigger` and whose guards all
    /// pass is executed. A trigger matching nothing is a normal, silent
    /// no-op. Returns `true` iff the machine changed state.
    ///
    /// A matched transition whose destination is the current state is
    /// suppressed like any other self-transition: no handlers run and no
    /// history is recorded, so a self-loop cannot be used to "refresh" the
    /// current state.
    pub fn fire(&mut self, trigger: T) -> bool {
        let destination = match self.definition.current_state().resolve(&trigger) {
            Some(transition) => transition.destination().clone(),
            None => return false,
        };
        self.transition(destination, Some(trigger))
    }

    /// Force a transition to `destination`, bypassing trigger and guard
    /// matching. The change event carries no trigger.
    ///
    /// Fails with [`MachineError::UnknownState`] — leaving the current
    /// state untouched — when `destination` was never declared.
    pub fn go_to(&mut self, destination: S) -> Result<(), MachineError> {
        if !self.definition.contains(&destination) {
            self.sink.error(&format!(
                "cannot go to `{destination}`: not a declared state"
            ));
            return Err(MachineError::UnknownState {
                state: destination.to_string(),
            });
        }
        self.transition(destination, None);
        Ok(())
    }

    /// Attach a diagram note to an already-declared state.
    pub fn add_note(
        &mut self,
        state: &S,
        message: impl Into<String>,
        direction: NoteDirection,
    ) -> Result<(), MachineError> {
        let Some(position) = self.definition.position(state) else {
            self.sink.error(&format!(
                "cannot attach note to `{state}`: not a declared state"
            ));
            return Err(MachineError::UnknownState {
                state: state.to_string(),
            });
        };
        self.definition
            .state_at_mut(position)
            .push_note(Note::new(message, direction));
        Ok(())
    }

    /// Render the machine's topology as PlantUML text.
    ///
    /// Pure: rendering never mutates the machine, and an unchanged
    /// definition renders byte-for-byte identically.
    pub fn uml(&self, direction: UmlDirection, title: Option<&str>) -> String {
        UmlGenerator::new(&self.definition).render(direction, title)
    }

    /// Transition execution protocol, shared by `fire` and `go_to`.
    ///
    /// Aborts without side effects when the destination is undeclared or
    /// equals the current state. Otherwise moves the current-state pointer,
    /// then runs exit, enter, and change handlers in that order against a
    /// single change event, and records the transition.
    fn transition(&mut self, destination: S, trigger: Option<T>) -> bool {
        let Some(target) = self.definition.position(&destination) else {
            self.sink.error(&format!(
                "transition aborted: destination `{destination}` is not a declared state"
            ));
            return false;
        };

        let source = self.definition.current_position();
        if source == target {
            self.sink.warn(&format!(
                "transition to `{destination}` suppressed: destination is the current state"
            ));
            return false;
        }

        let previous = self.definition.current_state().id().clone();
        self.definition.set_current(target);

        let change = StateChange {
            from: previous,
            to: destination,
            trigger,
        };
        self.definition.state_at_mut(source).exit(&change);
        self.definition.state_at_mut(target).enter(&change);
        self.definition.notify(&change);

        self.history.record(TransitionRecord {
            from: change.from,
            to: change.to,
            trigger: change.trigger,
            timestamp: Utc::now(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::testing::RecordingSink;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Three-state machine with handlers appending to a shared log.
    fn traced_machine(log: &Log) -> Machine<&'static str, &'static str> {
        let mut builder = Machine::builder("a").state("a");
        for state in ["a", "b", "c"] {
            let exit = log.clone();
            let enter = log.clone();
            builder = builder
                .state(state)
                .on_enter(move |_| enter.borrow_mut().push(format!("enter {state}")))
                .on_exit(move |_| exit.borrow_mut().push(format!("exit {state}")));
        }
        let changed = log.clone();
        builder
            .state("a")
            .to("b")
            .on("go")
            .state("b")
            .to("c")
            .on("go")
            .build_with(move |change| {
                changed
                    .borrow_mut()
                    .push(format!("changed {} -> {}", change.from, change.to))
            })
            .unwrap()
    }

    #[test]
    fn current_equals_initial_after_build() {
        let log = Log::default();
        let machine = traced_machine(&log);
        assert_eq!(machine.current_state().id(), machine.initial_state().id());
        assert!(machine.history().is_empty());
    }

    #[test]
    fn fire_runs_exit_enter_changed_in_order() {
        let log = Log::default();
        let mut machine = traced_machine(&log);

        assert!(machine.fire("go"));
        assert_eq!(
            *log.borrow(),
            vec!["exit a", "enter b", "changed a -> b"]
        );
        assert_eq!(*machine.current_state().id(), "b");
    }

    #[test]
    fn rejected_trigger_is_a_silent_no_op() {
        let log = Log::default();
        let mut machine = traced_machine(&log);

        assert!(!machine.fire("unknown"));
        assert_eq!(*machine.current_state().id(), "a");
        assert!(log.borrow().is_empty());
        assert!(machine.history().is_empty());
    }

    #[test]
    fn guard_failure_falls_through_to_the_next_candidate() {
        let mut machine = Machine::builder("a")
            .state("a")
            .to("b")
            .on("go")
            .guard(|_, _| false)
            .to("c")
            .on("go")
            .state("b")
            .state("c")
            .build()
            .unwrap();

        assert!(machine.fire("go"));
        assert_eq!(*machine.current_state().id(), "c");
    }

    #[test]
    fn go_to_executes_without_a_trigger() {
        let log = Log::default();
        let mut machine = traced_machine(&log);

        machine.go_to("c").unwrap();
        assert_eq!(*machine.current_state().id(), "c");
        assert_eq!(machine.history().last().and_then(|r| r.trigger), None);
        assert_eq!(
            *log.borrow(),
            vec!["exit a", "enter c", "changed a -> c"]
        );
    }

    #[test]
    fn go_to_unknown_state_fails_and_leaves_current() {
        let sink = Arc::new(RecordingSink::default());
        let mut machine: Machine<&str, &str> = Machine::builder("a")
            .sink(sink.clone())
            .state("a")
            .build()
            .unwrap();

        let result = machine.go_to("ghost");
        assert!(matches!(
            result,
            Err(MachineError::UnknownState { state }) if state == "ghost"
        ));
        assert_eq!(*machine.current_state().id(), "a");
        assert!(sink.messages()[0].starts_with("error:"));
    }

    #[test]
    fn self_transition_is_suppressed() {
        let log = Log::default();
        let sink = Arc::new(RecordingSink::default());
        let enter = log.clone();
        let exit = log.clone();
        let mut machine = Machine::builder("a")
            .sink(sink.clone())
            .state("a")
            .on_enter(move |_| enter.borrow_mut().push("enter".into()))
            .on_exit(move |_| exit.borrow_mut().push("exit".into()))
            .to("a")
            .on("loop")
            .build()
            .unwrap();

        // Both the direct and the trigger-matched self-transition stay
        // silent: no handlers, no history, current unchanged.
        machine.go_to("a").unwrap();
        assert!(!machine.fire("loop"));
        assert!(log.borrow().is_empty());
        assert!(machine.history().is_empty());
        assert_eq!(*machine.current_state().id(), "a");
        assert_eq!(sink.messages().len(), 2);
        assert!(sink.messages().iter().all(|m| m.starts_with("warn:")));
    }

    #[test]
    fn firing_towards_an_undeclared_destination_aborts() {
        let sink = Arc::new(RecordingSink::default());
        let mut machine = Machine::builder("a")
            .sink(sink.clone())
            .state("a")
            .to("ghost")
            .on("go")
            .build()
            .unwrap();

        assert!(!machine.fire("go"));
        assert_eq!(*machine.current_state().id(), "a");
        assert_eq!(sink.messages().len(), 1);
        assert!(sink.messages()[0].contains("ghost"));
    }

    #[test]
    fn on_change_registers_after_build() {
        let log = Log::default();
        let mut machine = traced_machine(&log);
        let late = log.clone();
        machine.on_change(move |change| late.borrow_mut().push(format!("late {}", change.to)));

        machine.fire("go");
        assert_eq!(
            *log.borrow(),
            vec!["exit a", "enter b", "changed a -> b", "late b"]
        );
    }

    #[test]
    fn add_note_attaches_post_build() {
        let mut machine: Machine<&str, &str> = Machine::builder("a").state("a").build().unwrap();

        machine
            .add_note(&"a", "entry point", NoteDirection::Right)
            .unwrap();
        assert_eq!(machine.current_state().notes().len(), 1);

        let missing = machine.add_note(&"ghost", "nope", NoteDirection::Left);
        assert!(matches!(missing, Err(MachineError::UnknownState { .. })));
    }

    #[test]
    fn history_records_every_executed_transition() {
        let log = Log::default();
        let mut machine = traced_machine(&log);

        machine.fire("go");
        machine.fire("go");
        machine.go_to("a").unwrap();

        let history = machine.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history.path(), vec![&"a", &"b", &"c", &"a"]);
        assert_eq!(history.records()[0].trigger, Some("go"));
        assert_eq!(history.records()[2].trigger, None);
    }

    #[test]
    fn handlers_capturing_state_observe_the_event() {
        let seen = Rc::new(Cell::new(false));
        let captured = seen.clone();
        let mut machine = Machine::builder("a")
            .state("a")
            .to("b")
            .on("go")
            .state("b")
            .on_enter(move |change| {
                captured.set(change.from == "a" && change.trigger == Some("go"))
            })
            .build()
            .unwrap();

        machine.fire("go");
        assert!(seen.get());
    }
}
