//! Passive topology types consumed by the builder, the engine, and the
//! diagram generator.
//!
//! Everything here is a plain record: states own their handler lists, notes,
//! and outgoing transitions; the definition owns the states and the
//! current-state pointer. Behavior lives in [`crate::machine`].

pub mod definition;
pub mod guard;
pub mod history;
pub mod id;
pub mod state;
pub mod transition;

pub use definition::MachineDefinition;
pub use guard::Guard;
pub use history::{History, TransitionRecord};
pub use id::{StateId, TriggerId};
pub use state::{Note, NoteDirection, StateChange, StateNode};
pub use transition::Transition;
