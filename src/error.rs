//! Error types for the store and reducer composition.

use thiserror::Error;

/// Errors surfaced by [`Store::dispatch`](crate::Store::dispatch) and
/// [`try_combine`](crate::try_combine).
#[derive(Error, Debug)]
pub enum Error {
    /// A deferred action resolved to a failure instead of an action.
    #[error("Deferred action failed: {0}")]
    Deferred(anyhow::Error),

    /// Two reducer configs claim the same slice.
    #[error("Slice `{slice}` is owned by more than one reducer")]
    DuplicateSlice { slice: String },

    /// A reducer depends on a slice no reducer owns.
    #[error("Slice `{slice}` depends on unknown slice `{dependency}`")]
    UnknownDependency { slice: String, dependency: String },

    /// A reducer depends on a slice declared after it, so it would read the
    /// value from the previous cycle.
    #[error("Slice `{slice}` depends on `{dependency}`, which is declared after it")]
    ForwardDependency { slice: String, dependency: String },
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, Error>;
