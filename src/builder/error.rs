//! Build errors for machine assembly.

use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    /// `build()` was invoked while the initial state had never been
    /// declared with `.state(..)`.
    #[error("initial state `{state}` was never declared")]
    UndeclaredInitial { state: String },
}
