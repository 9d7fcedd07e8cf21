use std::sync::{Arc, PoisonError, RwLock, Weak};

/// A change callback. Listeners are told that state changed and read it
/// back through [`Store::get_state`](crate::Store::get_state).
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Insertion-ordered set of listeners, keyed by `Arc` identity.
#[derive(Default)]
pub(crate) struct ListenerSet {
    listeners: RwLock<Vec<Listener>>,
}

impl ListenerSet {
    /// Add a listener. Returns `false` if it was already present.
    pub(crate) fn add(&self, listener: Listener) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            return false;
        }
        listeners.push(listener);
        true
    }

    /// Remove a listener. Returns `false` if it was not present.
    pub(crate) fn remove(&self, listener: &Listener) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|l| !same_listener(l, listener));
        listeners.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Call every listener present now, in registration order.
    ///
    /// Runs on a snapshot so listeners may subscribe or unsubscribe while
    /// being notified.
    pub(crate) fn notify(&self) {
        let snapshot = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in snapshot {
            listener();
        }
    }
}

fn same_listener(a: &Listener, b: &Listener) -> bool {
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe).
///
/// Dropping it keeps the listener registered; call
/// [`unsubscribe`](Subscription::unsubscribe) to remove it.
pub struct Subscription {
    listener: Listener,
    listeners: Weak<ListenerSet>,
}

impl Subscription {
    pub(crate) fn new(listener: Listener, listeners: &Arc<ListenerSet>) -> Self {
        Self {
            listener,
            listeners: Arc::downgrade(listeners),
        }
    }

    /// Remove the listener from its store. A no-op if the store is gone or
    /// the listener was already removed.
    pub fn unsubscribe(self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.remove(&self.listener);
        }
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn set_semantics_by_identity() {
        let set = ListenerSet::default();
        let listener: Listener = Arc::new(|| {});
        let twin: Listener = Arc::new(|| {});

        assert!(set.add(Arc::clone(&listener)));
        assert!(!set.add(Arc::clone(&listener)));
        assert!(set.add(twin));
        assert_eq!(set.len(), 2);

        assert!(set.remove(&listener));
        assert!(!set.remove(&listener));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn notifies_in_registration_order() {
        let set = ListenerSet::default();
        let order = Arc::new(Mutex::new(Vec::new()));
        for id in 0..3 {
            let order = Arc::clone(&order);
            set.add(Arc::new(move || order.lock().unwrap().push(id)));
        }

        set.notify();
        assert_eq!(*order.lock().unwrap(), [0, 1, 2]);
    }

    #[test]
    fn subscription_outliving_set_is_noop() {
        let set = Arc::new(ListenerSet::default());
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();
        let listener: Listener = Arc::new(move || {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        set.add(Arc::clone(&listener));
        let subscription = Subscription::new(listener, &set);

        set.notify();
        drop(set);
        subscription.unsubscribe();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
