use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::Slice;
use crate::action::Dispatchable;

type SliceUpdate<A, X> =
    Arc<dyn Fn(&Slice, &A, &Dependencies) -> Option<(Slice, Dispatchable<A, X>)> + Send + Sync>;

/// The update function owning one named slice, plus the sibling slices it
/// reads.
pub struct ReducerConfig<A, X = ()> {
    state_name: String,
    dependencies: Arc<[String]>,
    update: SliceUpdate<A, X>,
}

impl<A, X> ReducerConfig<A, X> {
    pub fn state_name(&self) -> &str {
        &self.state_name
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub(crate) fn dependency_names(&self) -> Arc<[String]> {
        Arc::clone(&self.dependencies)
    }

    /// Run the update against an erased slice. `None` if the slice holds a
    /// type this config does not own.
    pub(crate) fn apply(
        &self,
        slice: &Slice,
        action: &A,
        dependencies: &Dependencies,
    ) -> Option<(Slice, Dispatchable<A, X>)> {
        (self.update)(slice, action, dependencies)
    }
}

impl<A, X> Clone for ReducerConfig<A, X> {
    fn clone(&self) -> Self {
        Self {
            state_name: self.state_name.clone(),
            dependencies: Arc::clone(&self.dependencies),
            update: Arc::clone(&self.update),
        }
    }
}

impl<A, X> fmt::Debug for ReducerConfig<A, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerConfig")
            .field("state_name", &self.state_name)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// Build a config for a slice with no dependencies.
///
/// The update receives the slice, the action and an empty [`Dependencies`],
/// and returns the next slice with at most one follow-up action. Returning
/// the same `Arc` means "unchanged".
///
/// # Examples
///
/// ```
/// use cyclone::{reducer, Action, Sentinel};
/// use std::sync::Arc;
///
/// let count = reducer("count", |s: &Arc<i64>, a: &Action, _| match a.kind() {
///     "increment" => (Arc::new(**s + 1), Action::none()),
///     _ => (Arc::clone(s), Action::none()),
/// });
/// # let count: cyclone::ReducerConfig<Action> = count;
/// assert_eq!(count.state_name(), "count");
/// assert!(count.dependencies().is_empty());
/// ```
pub fn reducer<T, A, X, F, D>(state_name: impl Into<String>, update: F) -> ReducerConfig<A, X>
where
    T: Any + Send + Sync,
    F: Fn(&Arc<T>, &A, &Dependencies) -> (Arc<T>, D) + Send + Sync + 'static,
    D: Into<Dispatchable<A, X>>,
{
    reducer_with_deps(state_name, Vec::<String>::new(), update)
}

/// Build a config for a slice that reads other slices.
///
/// Dependency values are read from the state as updated so far in the
/// current cycle: slices owned by configs listed earlier in the same
/// [`combine`](crate::combine) call are fresh, later ones still hold the
/// previous cycle's value.
pub fn reducer_with_deps<T, A, X, F, D, I, N>(
    state_name: impl Into<String>,
    dependencies: I,
    update: F,
) -> ReducerConfig<A, X>
where
    T: Any + Send + Sync,
    F: Fn(&Arc<T>, &A, &Dependencies) -> (Arc<T>, D) + Send + Sync + 'static,
    D: Into<Dispatchable<A, X>>,
    I: IntoIterator<Item = N>,
    N: Into<String>,
{
    let update: SliceUpdate<A, X> =
        Arc::new(move |slice: &Slice, action: &A, dependencies: &Dependencies| {
            let current = Arc::clone(slice).downcast::<T>().ok()?;
            let (next, follow_up) = update(&current, action, dependencies);
            let next: Slice = next;
            Some((next, follow_up.into()))
        });

    ReducerConfig {
        state_name: state_name.into(),
        dependencies: dependencies.into_iter().map(Into::into).collect(),
        update,
    }
}

/// Values of a config's dependencies, in declaration order.
pub struct Dependencies {
    names: Arc<[String]>,
    values: Vec<Option<Slice>>,
}

impl Dependencies {
    pub(crate) fn new(names: Arc<[String]>, values: Vec<Option<Slice>>) -> Self {
        Self { names, values }
    }

    /// Typed read by position. `None` if the slice is absent or of another
    /// type.
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.values.get(index)?.as_ref()?.downcast_ref::<T>()
    }

    /// Typed read by slice name.
    pub fn named<T: Any>(&self, name: &str) -> Option<&T> {
        let index = self.names.iter().position(|n| n == name)?;
        self.get(index)
    }

    /// Erased slice by position.
    pub fn slice(&self, index: usize) -> Option<&Slice> {
        self.values.get(index)?.as_ref()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
