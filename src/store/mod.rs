//! The store: one state value, its update function, and its listeners.
//!
//! Stores resolve dispatched actions, apply the update function, notify
//! listeners on change, and chain follow-up actions as detached tasks.

mod listeners;
mod state;
mod store;

pub use listeners::{Listener, Subscription};
pub use state::State;
pub use store::{create_store, Store};
