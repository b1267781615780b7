//! Staged fluent builder for assembling machines.
//!
//! Assembly moves through three stages, each a distinct type exposing only
//! the operations valid at that point:
//!
//! - [`MachineBuilder`] — no selection yet; declare a state or build.
//! - [`StateBuilder`] — a state is selected; attach notes and lifecycle
//!   handlers, open a transition, or re-select.
//! - [`TransitionBuilder`] — a transition is selected; register triggers
//!   and guards, or drop back to the state stage.
//!
//! Declaring an already-known state or transition re-selects it and appends;
//! nothing is ever overwritten. `build` is available at every stage and
//! consumes the chain.

pub mod error;
pub mod machine;
pub mod state;
pub mod transition;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use state::StateBuilder;
pub use transition::TransitionBuilder;
