use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Counts detached follow-up dispatches that have not finished yet.
pub(crate) struct TaskTracker {
    pending: Arc<watch::Sender<usize>>,
}

impl TaskTracker {
    pub(crate) fn new() -> Self {
        let (pending, _) = watch::channel(0);
        Self {
            pending: Arc::new(pending),
        }
    }

    /// Register one pending task. The count drops when the guard does, so a
    /// task that panics still releases it.
    pub(crate) fn track(&self) -> TaskGuard {
        self.pending.send_modify(|count| *count += 1);
        TaskGuard {
            pending: Arc::clone(&self.pending),
        }
    }

    pub(crate) fn pending(&self) -> usize {
        *self.pending.borrow()
    }

    /// Resolve once the pending count reaches zero.
    pub(crate) fn settled(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut pending = self.pending.subscribe();
        async move {
            // The sender is owned by the tracker, so this only errors once
            // every handle to the store is gone.
            let _ = pending.wait_for(|count| *count == 0).await;
        }
    }
}

pub(crate) struct TaskGuard {
    pending: Arc<watch::Sender<usize>>,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.pending.send_modify(|count| *count -= 1);
    }
}
