//! # Cyclone
//!
//! A minimal, predictable state container for Rust.
//!
//! A single state value is replaced only by pure update functions driven by
//! dispatched actions. Listeners are told when it changes, and an update may
//! ask for follow-up actions: plain, deferred, or computed from an injected
//! extra context.
//!
//! ## Store
//!
//! - `Store<S, A, X>` - Holds the state and runs the dispatch loop
//! - `Dispatchable` - Plain, deferred, or thunk actions accepted by dispatch
//! - `Listener` / `Subscription` - Change notification
//!
//! ## Composition
//!
//! - `Record` - State made of named slices
//! - `reducer` / `reducer_with_deps` - One slice's update function
//! - `combine` / `try_combine` - Fold slice reducers into one update function
//!
//! ## Example
//!
//! ```
//! use cyclone::{combine, reducer, reducer_with_deps, Action, Dependencies, Record, Sentinel, Store};
//! use std::sync::Arc;
//!
//! fn add(n: i32) -> impl Fn(&Arc<i32>, &Action, &Dependencies) -> (Arc<i32>, Action) + Send + Sync {
//!     move |s: &Arc<i32>, a: &Action, _: &Dependencies| {
//!         if a.is("increment") {
//!             (Arc::new(**s + n), Action::none())
//!         } else {
//!             (Arc::clone(s), Action::none())
//!         }
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = Store::new(
//!     Record::new().with("a", 0i32).with("b", 0i32).with("c", String::new()),
//!     combine([
//!         reducer("a", add(1)),
//!         reducer("b", add(2)),
//!         reducer_with_deps("c", ["a", "b"], |s: &Arc<String>, a: &Action, deps: &Dependencies| {
//!             match (a.kind(), deps.get::<i32>(0), deps.get::<i32>(1)) {
//!                 ("increment", Some(a_), Some(b_)) => (Arc::new((a_ + b_).to_string()), Action::none()),
//!                 _ => (Arc::clone(s), Action::none()),
//!             }
//!         }),
//!     ]),
//! );
//!
//! store.dispatch(Action::new("increment")).await.unwrap();
//!
//! let state = store.get_state();
//! assert_eq!(state.get::<i32>("a"), Some(&1));
//! assert_eq!(state.get::<i32>("b"), Some(&2));
//! assert_eq!(state.get::<String>("c").unwrap(), "3");
//! # }
//! ```

pub mod action;
pub mod error;
pub mod reducer;
mod runtime;
pub mod store;

// Re-export main types for convenience
pub use action::{is_not_none, none, Action, Dispatchable, Next, Sentinel, NONE_TYPE};
pub use error::{Error, Result};
pub use reducer::{
    combine, reducer, reducer_with_deps, try_combine, Dependencies, Record, ReducerConfig, Slice,
};
pub use store::{create_store, Listener, State, Store, Subscription};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn it_works() {
        // Basic smoke test
        let store = Store::new(
            Record::new().with("count", 0i32),
            |state: &Arc<Record>, action: &Action| {
                let count = state.get::<i32>("count").copied().unwrap_or_default();
                if action.is("increment") {
                    (Arc::new(Record::new().with("count", count + 1)), Action::none())
                } else {
                    (Arc::clone(state), Action::none())
                }
            },
        );
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        store.subscribe(Arc::new(move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(store.get_state().get::<i32>("count"), Some(&0));
        store.dispatch(Action::new("increment")).await.unwrap();
        store.dispatch(none::<Action>()).await.unwrap();
        assert_eq!(store.get_state().get::<i32>("count"), Some(&1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
