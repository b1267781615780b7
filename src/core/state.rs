//! Per-state records: lifecycle handlers, notes, outgoing transitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::{StateId, TriggerId};
use super::transition::Transition;

/// Side of a state a diagram note is drawn on. Defaults to [`Left`].
///
/// [`Left`]: NoteDirection::Left
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteDirection {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

impl NoteDirection {
    /// Lowercase keyword used by the diagram notation.
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            NoteDirection::Left => "left",
            NoteDirection::Right => "right",
            NoteDirection::Top => "top",
            NoteDirection::Bottom => "bottom",
        }
    }
}

/// Free-form annotation attached to a single state.
///
/// Notes are purely descriptive: they appear in rendered diagrams and never
/// affect machine behavior.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    message: String,
    direction: NoteDirection,
}

impl Note {
    pub(crate) fn new(message: impl Into<String>, direction: NoteDirection) -> Self {
        Note {
            message: message.into(),
            direction,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn direction(&self) -> NoteDirection {
        self.direction
    }
}

/// Immutable description of one executed transition.
///
/// Constructed once per transition and passed by reference to every exit,
/// enter, and change handler invoked for it. `trigger` is `None` when the
/// transition was forced with [`Machine::go_to`] rather than fired.
///
/// [`Machine::go_to`]: crate::Machine::go_to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateChange<S, T> {
    /// State the machine left.
    pub from: S,
    /// State the machine entered.
    pub to: S,
    /// Trigger that caused the transition, if any.
    pub trigger: Option<T>,
}

/// Callback invoked with the change event of an executed transition.
pub(crate) type ChangeHandler<S, T> = Box<dyn FnMut(&StateChange<S, T>)>;

/// A named configuration of the machine.
///
/// Holds the state's lifecycle handler lists, its diagram notes, and its
/// outgoing transitions in registration order. Owned exclusively by the
/// machine definition; callers interact with it through shared references
/// returned by [`Machine::current_state`] and friends.
///
/// [`Machine::current_state`]: crate::Machine::current_state
pub struct StateNode<S: StateId, T: TriggerId> {
    id: S,
    on_enter: Vec<ChangeHandler<S, T>>,
    on_exit: Vec<ChangeHandler<S, T>>,
    notes: Vec<Note>,
    transitions: Vec<Transition<S, T>>,
}

impl<S: StateId, T: TriggerId> StateNode<S, T> {
    pub(crate) fn new(id: S) -> Self {
        StateNode {
            id,
            on_enter: Vec::new(),
            on_exit: Vec::new(),
            notes: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// This state's identifier.
    pub fn id(&self) -> &S {
        &self.id
    }

    /// Notes attached to this state, in registration order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Outgoing transitions, in registration order.
    pub fn transitions(&self) -> &[Transition<S, T>] {
        &self.transitions
    }

    /// The outgoing transition towards `destination`, if one was declared.
    pub fn transition_to(&self, destination: &S) -> Option<&Transition<S, T>> {
        self.transitions
            .iter()
            .find(|transition| transition.destination() == destination)
    }

    /// First outgoing transition enabled for `trigger`.
    ///
    /// Transitions are scanned in registration order; the first whose
    /// trigger set contains `trigger` and whose guards all pass wins. A
    /// candidate rejected by its guards does not stop the scan.
    pub fn resolve(&self, trigger: &T) -> Option<&Transition<S, T>> {
        self.transitions
            .iter()
            .find(|transition| transition.is_enabled(trigger))
    }

    /// Index of the transition towards `destination`, creating it if absent.
    pub(crate) fn ensure_transition(&mut self, destination: S) -> usize {
        match self
            .transitions
            .iter()
            .position(|transition| transition.destination() == &destination)
        {
            Some(index) => index,
            None => {
                self.transitions
                    .push(Transition::new(self.id.clone(), destination));
                self.transitions.len() - 1
            }
        }
    }

    pub(crate) fn transition_at_mut(&mut self, index: usize) -> &mut Transition<S, T> {
        &mut self.transitions[index]
    }

    pub(crate) fn push_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub(crate) fn push_enter(&mut self, handler: ChangeHandler<S, T>) {
        self.on_enter.push(handler);
    }

    pub(crate) fn push_exit(&mut self, handler: ChangeHandler<S, T>) {
        self.on_exit.push(handler);
    }

    /// Run all enter handlers, in registration order.
    pub(crate) fn enter(&mut self, change: &StateChange<S, T>) {
        for handler in &mut self.on_enter {
            handler(change);
        }
    }

    /// Run all exit handlers, in registration order.
    pub(crate) fn exit(&mut self, change: &StateChange<S, T>) {
        for handler in &mut self.on_exit {
            handler(change);
        }
    }
}

impl<S: StateId, T: TriggerId> fmt::Debug for StateNode<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("id", &self.id)
            .field("on_enter", &self.on_enter.len())
            .field("on_exit", &self.on_exit.len())
            .field("notes", &self.notes)
            .field("transitions", &self.transitions)
            .finish()
    }
}
