use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// An action that becomes available later, or fails.
pub type Deferred<A> = BoxFuture<'static, anyhow::Result<A>>;

/// A function of the store's extra context producing something dispatchable.
pub type Thunk<A, X> = Box<dyn FnOnce(Arc<X>) -> Dispatchable<A, X> + Send>;

/// Anything accepted by [`Store::dispatch`](crate::Store::dispatch).
///
/// The store resolves a dispatchable to a concrete action before running a
/// process cycle: a thunk is called with the extra context, a deferred
/// action is awaited, and a plain action is used as is. A thunk may return
/// any variant, including another thunk.
pub enum Dispatchable<A, X = ()> {
    Plain(A),
    Deferred(Deferred<A>),
    Thunk(Thunk<A, X>),
}

impl<A, X> Dispatchable<A, X> {
    /// Wrap a future yielding an action.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclone::{Action, Dispatchable};
    ///
    /// let later: Dispatchable<Action> = Dispatchable::deferred(async {
    ///     Ok(Action::new("increment"))
    /// });
    /// assert!(matches!(later, Dispatchable::Deferred(_)));
    /// ```
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = anyhow::Result<A>> + Send + 'static,
    {
        Self::Deferred(Box::pin(future))
    }

    /// Wrap a function that receives the store's extra context.
    pub fn thunk<F>(f: F) -> Self
    where
        F: FnOnce(Arc<X>) -> Dispatchable<A, X> + Send + 'static,
    {
        Self::Thunk(Box::new(f))
    }
}

impl<A, X> From<A> for Dispatchable<A, X> {
    fn from(action: A) -> Self {
        Self::Plain(action)
    }
}

impl<A: fmt::Debug, X> fmt::Debug for Dispatchable<A, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(action) => f.debug_tuple("Plain").field(action).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
            Self::Thunk(_) => f.write_str("Thunk(..)"),
        }
    }
}

/// Follow-up actions produced by one update.
///
/// Absent, single and multiple follow-ups all normalize to a sequence via
/// [`Next::into_vec`].
pub enum Next<A, X = ()> {
    Nothing,
    One(Dispatchable<A, X>),
    Many(Vec<Dispatchable<A, X>>),
}

impl<A, X> Next<A, X> {
    /// Normalize to the ordered sequence of follow-ups.
    pub fn into_vec(self) -> Vec<Dispatchable<A, X>> {
        match self {
            Self::Nothing => Vec::new(),
            Self::One(dispatchable) => vec![dispatchable],
            Self::Many(dispatchables) => dispatchables,
        }
    }
}

impl<A, X> Default for Next<A, X> {
    fn default() -> Self {
        Self::Nothing
    }
}

impl<A, X> From<A> for Next<A, X> {
    fn from(action: A) -> Self {
        Self::One(Dispatchable::Plain(action))
    }
}

impl<A, X> From<Dispatchable<A, X>> for Next<A, X> {
    fn from(dispatchable: Dispatchable<A, X>) -> Self {
        Self::One(dispatchable)
    }
}

impl<A, X> From<Option<A>> for Next<A, X> {
    fn from(action: Option<A>) -> Self {
        match action {
            Some(action) => Self::One(Dispatchable::Plain(action)),
            None => Self::Nothing,
        }
    }
}

impl<A, X> From<Vec<A>> for Next<A, X> {
    fn from(actions: Vec<A>) -> Self {
        Self::Many(actions.into_iter().map(Dispatchable::Plain).collect())
    }
}

impl<A, X> From<Vec<Dispatchable<A, X>>> for Next<A, X> {
    fn from(dispatchables: Vec<Dispatchable<A, X>>) -> Self {
        Self::Many(dispatchables)
    }
}

impl<A: fmt::Debug, X> fmt::Debug for Next<A, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nothing => f.write_str("Nothing"),
            Self::One(dispatchable) => f.debug_tuple("One").field(dispatchable).finish(),
            Self::Many(dispatchables) => f.debug_tuple("Many").field(dispatchables).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, Sentinel};

    #[test]
    fn absent_follow_up_is_empty() {
        let next: Next<Action> = None.into();
        assert!(next.into_vec().is_empty());
        assert!(Next::<Action>::default().into_vec().is_empty());
    }

    #[test]
    fn single_follow_up_is_wrapped() {
        let next: Next<Action> = Action::new("next").into();
        let actions = next.into_vec();
        assert_eq!(actions.len(), 1);
        assert!(matches!(&actions[0], Dispatchable::Plain(a) if a.is("next")));
    }

    #[test]
    fn sequence_keeps_order() {
        let next: Next<Action> = vec![Action::new("first"), Action::none(), Action::new("third")].into();
        let kinds: Vec<_> = next
            .into_vec()
            .into_iter()
            .map(|d| match d {
                Dispatchable::Plain(a) => a.kind().to_string(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(kinds, ["first", crate::NONE_TYPE, "third"]);
    }
}
