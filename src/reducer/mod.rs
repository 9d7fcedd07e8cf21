//! Reducer composition.
//!
//! Independent update functions each own one named slice of a [`Record`]
//! and may read sibling slices declared before them:
//! - `Record`: slice-keyed state with a top-level merge
//! - `ReducerConfig`: one slice's update function and its dependencies
//! - `combine` / `try_combine`: fold configs into one store update function

mod combine;
mod config;
mod record;

pub use combine::{combine, try_combine};
pub use config::{reducer, reducer_with_deps, Dependencies, ReducerConfig};
pub use record::{Record, Slice};
