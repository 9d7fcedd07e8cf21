use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::store::State;

/// A type-erased slice value.
pub type Slice = Arc<dyn Any + Send + Sync>;

/// State made of named slices, each of any type.
///
/// Records merge at the top level: a record returned from an update
/// function only needs the slices that changed.
///
/// # Examples
///
/// ```
/// use cyclone::Record;
///
/// let record = Record::new().with("count", 0i64).with("label", String::new());
/// assert_eq!(record.get::<i64>("count"), Some(&0));
/// assert_eq!(record.get::<i64>("label"), None);
/// assert_eq!(record.get::<i64>("missing"), None);
/// ```
#[derive(Clone, Default)]
pub struct Record {
    slices: BTreeMap<String, Slice>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Record::insert`].
    pub fn with<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) {
        self.insert_slice(name, Arc::new(value));
    }

    /// Insert an already shared slice, keeping its identity.
    pub fn insert_slice(&mut self, name: impl Into<String>, slice: Slice) {
        self.slices.insert(name.into(), slice);
    }

    /// Typed read of a slice. `None` if absent or of another type.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.slices.get(name)?.downcast_ref::<T>()
    }

    /// Typed shared handle to a slice.
    pub fn get_arc<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        Arc::clone(self.slices.get(name)?).downcast::<T>().ok()
    }

    pub fn slice(&self, name: &str) -> Option<&Slice> {
        self.slices.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slices.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slices.keys().map(String::as_str)
    }
}

impl State for Record {
    fn merge(previous: &Arc<Self>, next: Arc<Self>) -> Arc<Self> {
        let mut merged = Record::clone(previous);
        for (name, slice) in &next.slices {
            merged.slices.insert(name.clone(), Arc::clone(slice));
        }
        Arc::new(merged)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("slices", &self.slices.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Whether two slices are the same allocation.
pub(crate) fn same_slice(a: &Slice, b: &Slice) -> bool {
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}
