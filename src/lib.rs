//! Machina: a declarative finite state machine library.
//!
//! Callers supply opaque state and trigger identifiers, assemble states,
//! guarded transitions, and lifecycle callbacks through a staged fluent
//! builder, then drive the machine by firing triggers or forcing direct
//! transitions. The assembled topology renders on demand into deterministic
//! PlantUML text.
//!
//! # Core Concepts
//!
//! - **Identifiers**: any `Clone + Eq + Hash + Debug + Display` type names
//!   states and triggers; [`id_enum!`] declares conforming enums.
//! - **Transitions**: directed edges carrying an ordered trigger set and
//!   AND-combined guard predicates; at most one edge per (source,
//!   destination) pair.
//! - **Lifecycle callbacks**: exit, enter, and change handlers run
//!   synchronously and strictly in that order on every executed transition.
//! - **Diagnostics**: rejected operations report to an injectable
//!   [`DiagnosticSink`], a no-op unless a sink is provided.
//!
//! # Example
//!
//! ```rust
//! use machina::{Machine, UmlDirection};
//!
//! machina::id_enum! {
//!     enum Posture {
//!         Standing,
//!         Sitting,
//!         Lying,
//!     }
//! }
//!
//! machina::id_enum! {
//!     enum Input {
//!         Down,
//!         Up,
//!     }
//! }
//!
//! let mut machine = Machine::builder(Posture::Standing)
//!     .state(Posture::Standing)
//!     .to(Posture::Sitting)
//!     .on(Input::Down)
//!     .state(Posture::Sitting)
//!     .to(Posture::Lying)
//!     .on(Input::Down)
//!     .to(Posture::Standing)
//!     .on(Input::Up)
//!     .state(Posture::Lying)
//!     .to(Posture::Sitting)
//!     .on(Input::Up)
//!     .build_with(|change| println!("{} -> {}", change.from, change.to))
//!     .unwrap();
//!
//! machine.fire(Input::Down);
//! machine.fire(Input::Down);
//! assert_eq!(machine.current_state().id(), &Posture::Lying);
//!
//! // Up from Lying leads back towards Standing.
//! machine.fire(Input::Up);
//! machine.fire(Input::Up);
//! assert_eq!(machine.current_state().id(), &Posture::Standing);
//!
//! let diagram = machine.uml(UmlDirection::LeftToRight, Some("postures"));
//! assert!(diagram.starts_with("@startuml"));
//! ```
//!
//! The machine is single-threaded and synchronous: no operation suspends,
//! nothing is locked, and re-entrant firing from inside a handler is the
//! caller's responsibility to bound.

pub mod builder;
pub mod core;
pub mod diagnostics;
mod macros;
pub mod machine;
pub mod uml;

pub use crate::builder::{BuildError, MachineBuilder, StateBuilder, TransitionBuilder};
pub use crate::core::{
    Guard, History, MachineDefinition, Note, NoteDirection, StateChange, StateId, StateNode,
    Transition, TransitionRecord, TriggerId,
};
pub use crate::diagnostics::{DiagnosticSink, NullSink, TracingSink};
pub use crate::machine::{Machine, MachineError};
pub use crate::uml::{UmlDirection, UmlGenerator};
