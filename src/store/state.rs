use std::sync::Arc;

/// Values a [`Store`](crate::Store) can hold.
///
/// `merge` combines the previous state with the state returned by an update
/// function. The default replaces it, which suits a struct that is always
/// returned whole. [`Record`](crate::Record) merges at the top level
/// instead, so partial records only need the changed slices.
///
/// # Examples
///
/// ```
/// use cyclone::State;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Counter {
///     count: i64,
/// }
///
/// impl State for Counter {}
/// ```
pub trait State: Send + Sync + 'static {
    fn merge(_previous: &Arc<Self>, next: Arc<Self>) -> Arc<Self> {
        next
    }
}
