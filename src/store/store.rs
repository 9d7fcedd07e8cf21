use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use super::listeners::{Listener, ListenerSet, Subscription};
use super::State;
use crate::action::{is_not_none, Action, Deferred, Dispatchable, Next, Sentinel};
use crate::error::{Error, Result};
use crate::runtime::TaskTracker;

type UpdateFn<S, A, X> = Box<dyn Fn(&Arc<S>, &A) -> (Arc<S>, Next<A, X>) + Send + Sync>;

struct Inner<S, A, X> {
    state: RwLock<Arc<S>>,
    update: UpdateFn<S, A, X>,
    extra: Arc<X>,
    listeners: Arc<ListenerSet>,
    // Held for one whole process cycle so cycles never interleave.
    cycle: Mutex<()>,
    tasks: TaskTracker,
}

/// A single state value updated only through dispatched actions.
///
/// Every dispatch resolves to a concrete action, runs the update function,
/// replaces the state when the update returned a different `Arc`, notifies
/// listeners, and then dispatches the follow-up actions in the order the
/// update returned them. Plain follow-ups, and thunks that resolve to one,
/// are processed before [`Store::dispatch`] resolves. Deferred follow-ups
/// run as detached tasks that the returned future does not wait for. Use
/// [`Store::settled`] to wait for the whole chain.
///
/// Handles are cheap to clone and share the same state.
///
/// # Examples
///
/// ```
/// use cyclone::{Action, Sentinel, State, Store};
/// use std::sync::Arc;
///
/// #[derive(Debug, PartialEq)]
/// struct Counter {
///     count: i64,
/// }
///
/// impl State for Counter {}
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let store = Store::new(Counter { count: 0 }, |state: &Arc<Counter>, action: &Action| {
///     match action.kind() {
///         "increment" => (Arc::new(Counter { count: state.count + 1 }), Action::none()),
///         _ => (Arc::clone(state), Action::none()),
///     }
/// });
///
/// store.dispatch(Action::new("increment")).await.unwrap();
/// assert_eq!(store.get_state().count, 1);
/// # }
/// ```
pub struct Store<S, A = Action, X = ()> {
    inner: Arc<Inner<S, A, X>>,
}

impl<S, A> Store<S, A>
where
    S: State,
    A: Sentinel + fmt::Debug + Send + 'static,
{
    /// Create a store without extra context.
    pub fn new<F, N>(initial: S, update: F) -> Self
    where
        F: Fn(&Arc<S>, &A) -> (Arc<S>, N) + Send + Sync + 'static,
        N: Into<Next<A>>,
    {
        Self::with_extra(initial, update, ())
    }
}

impl<S, A, X> Store<S, A, X>
where
    S: State,
    A: Sentinel + fmt::Debug + Send + 'static,
    X: Send + Sync + 'static,
{
    /// Create a store whose thunks receive `extra`.
    pub fn with_extra<F, N>(initial: S, update: F, extra: X) -> Self
    where
        F: Fn(&Arc<S>, &A) -> (Arc<S>, N) + Send + Sync + 'static,
        N: Into<Next<A, X>>,
    {
        let update: UpdateFn<S, A, X> = Box::new(move |state: &Arc<S>, action: &A| {
            let (next, follow_ups) = update(state, action);
            (next, follow_ups.into())
        });

        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(Arc::new(initial)),
                update,
                extra: Arc::new(extra),
                listeners: Arc::new(ListenerSet::default()),
                cycle: Mutex::new(()),
                tasks: TaskTracker::new(),
            }),
        }
    }

    /// Dispatch an action, a deferred action, or a thunk.
    ///
    /// The returned future completes once the process cycle for this action
    /// has run, along with the cycles of any plain follow-ups it chained. It
    /// fails if a deferred action fails. Thunks are called with the extra
    /// context as soon as they are reached.
    ///
    /// Deferred follow-ups are spawned on the current tokio runtime and are
    /// not awaited. Their failures are logged and otherwise dropped.
    pub fn dispatch(
        &self,
        dispatchable: impl Into<Dispatchable<A, X>>,
    ) -> BoxFuture<'static, Result<()>> {
        let store = self.clone();
        let dispatchable = dispatchable.into();
        Box::pin(async move { store.run(dispatchable).await })
    }

    /// Register a listener. Registering the same `Arc` twice has no effect.
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        if !self.inner.listeners.add(Arc::clone(&listener)) {
            log::trace!("Listener already subscribed");
        }
        Subscription::new(listener, &self.inner.listeners)
    }

    /// Remove a listener. Unknown listeners are ignored.
    pub fn unsubscribe(&self, listener: &Listener) {
        self.inner.listeners.remove(listener);
    }

    /// The current state snapshot.
    pub fn get_state(&self) -> Arc<S> {
        Arc::clone(&self.inner.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// The extra context handed to thunks.
    pub fn extra(&self) -> Arc<X> {
        Arc::clone(&self.inner.extra)
    }

    /// Number of deferred follow-ups still running.
    pub fn pending(&self) -> usize {
        self.inner.tasks.pending()
    }

    /// Resolve once no deferred follow-up is running, including those spawned
    /// by other follow-ups.
    pub fn settled(&self) -> impl Future<Output = ()> + Send + 'static {
        self.inner.tasks.settled()
    }

    async fn run(self, dispatchable: Dispatchable<A, X>) -> Result<()> {
        let action = match self.resolve(dispatchable) {
            Resolved::Ready(action) => action,
            Resolved::Pending(deferred) => deferred.await.map_err(Error::Deferred)?,
        };
        self.process(action);
        Ok(())
    }

    // Thunks are called right away with the extra context.
    fn resolve(&self, mut dispatchable: Dispatchable<A, X>) -> Resolved<A> {
        loop {
            dispatchable = match dispatchable {
                Dispatchable::Plain(action) => return Resolved::Ready(action),
                Dispatchable::Deferred(deferred) => return Resolved::Pending(deferred),
                Dispatchable::Thunk(thunk) => thunk(self.extra()),
            };
        }
    }

    fn process(&self, action: A) {
        if action.is_none() {
            log::trace!("Ignoring no-op action");
            return;
        }
        log::trace!("Processing action: {:?}", action);

        let follow_ups = {
            let _cycle = self.inner.cycle.lock().unwrap_or_else(PoisonError::into_inner);
            let current = self.get_state();
            let (next, follow_ups) = (self.inner.update)(&current, &action);

            if !Arc::ptr_eq(&current, &next) {
                let merged = S::merge(&current, next);
                *self.inner.state.write().unwrap_or_else(PoisonError::into_inner) = merged;
                log::debug!(
                    "State replaced by {:?}, notifying {} listener(s)",
                    action,
                    self.inner.listeners.len()
                );
                self.inner.listeners.notify();
            }
            follow_ups.into_vec()
        };

        // The cycle lock is released here, so plain follow-ups can run inline.
        for follow_up in follow_ups.into_iter().filter(is_not_none) {
            match self.resolve(follow_up) {
                Resolved::Ready(action) => self.process(action),
                Resolved::Pending(deferred) => self.spawn_deferred(deferred),
            }
        }
    }

    fn spawn_deferred(&self, deferred: Deferred<A>) {
        log::debug!("Spawning deferred follow-up");
        let guard = self.inner.tasks.track();
        let store = self.clone();
        tokio::spawn(async move {
            let _guard = guard;
            match deferred.await {
                Ok(action) => store.process(action),
                Err(e) => log::warn!("Deferred follow-up failed: {}", e),
            }
        });
    }
}

enum Resolved<A> {
    Ready(A),
    Pending(Deferred<A>),
}

/// Create a store whose thunks receive `extra`.
///
/// Equivalent to [`Store::with_extra`]; use [`Store::new`] when no extra
/// context is needed.
pub fn create_store<S, A, X, F, N>(initial: S, update: F, extra: X) -> Store<S, A, X>
where
    S: State,
    A: Sentinel + fmt::Debug + Send + 'static,
    X: Send + Sync + 'static,
    F: Fn(&Arc<S>, &A) -> (Arc<S>, N) + Send + Sync + 'static,
    N: Into<Next<A, X>>,
{
    Store::with_extra(initial, update, extra)
}

impl<S, A, X> Clone for Store<S, A, X> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: fmt::Debug, A, X> fmt::Debug for Store<S, A, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field(
                "state",
                &self.inner.state.read().unwrap_or_else(PoisonError::into_inner),
            )
            .field("listeners", &self.inner.listeners.len())
            .field("pending", &self.inner.tasks.pending())
            .finish()
    }
}
