//! Actions and the values accepted by dispatch.
//!
//! This module provides:
//! - `Action`: a tagged value with an optional JSON payload
//! - `Sentinel`: the "no action" contract shared by every action type
//! - `Dispatchable`: plain, deferred, or context-parameterized actions
//! - `Next`: the normalized follow-up actions of one update

mod action;
mod dispatchable;

pub use action::{is_not_none, none, Action, Sentinel, NONE_TYPE};
pub use dispatchable::{Deferred, Dispatchable, Next, Thunk};
