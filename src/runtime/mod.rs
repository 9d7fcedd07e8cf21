//! Runtime support for detached follow-up dispatches.
//!
//! Follow-up actions run as independent tokio tasks. This module keeps
//! count of them so a store can report when everything has settled.

mod tracker;

pub(crate) use tracker::TaskTracker;
