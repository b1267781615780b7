//! Capability bounds for caller-supplied identifier types.
//!
//! States and triggers are identified by opaque caller-defined values. The
//! engine only needs three capabilities from them: equality, a stable hash,
//! and a textual form for diagram rendering. Both traits below are blanket
//! implemented, so any `Clone + Eq + Hash + Debug + Display` type — a plain
//! enum, a `String`, an integer — is usable without ceremony.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Capability bound for state identifiers.
///
/// Implemented automatically for every conforming type; the [`id_enum!`]
/// macro declares a fieldless enum that qualifies.
///
/// [`id_enum!`]: crate::id_enum
pub trait StateId: Clone + Eq + Hash + Debug + Display {}

impl<S: Clone + Eq + Hash + Debug + Display> StateId for S {}

/// Capability bound for trigger identifiers.
pub trait TriggerId: Clone + Eq + Hash + Debug + Display {}

impl<T: Clone + Eq + Hash + Debug + Display> TriggerId for T {}
