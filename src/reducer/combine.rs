use std::collections::HashSet;
use std::sync::Arc;

use super::record::same_slice;
use super::{Dependencies, Record, ReducerConfig};
use crate::action::{is_not_none, Next, Sentinel};
use crate::error::{Error, Result};

/// Fold reducer configs into one update function over a [`Record`].
///
/// Configs run in the order given. Each reads its own slice and its
/// dependencies from the state as updated so far in this cycle, so a
/// dependency declared later is one cycle stale. Follow-up actions are
/// collected in order, dropping no-op actions. When no slice changed, the
/// original state is returned so the store sees no change.
///
/// A config whose own slice is missing from the record, or holds a value of
/// another type, is skipped for that cycle with a warning. Its update is not
/// called, so any follow-up action it would have returned is dropped as well.
/// Use [`Record::with`] to seed every owned slice up front.
///
/// # Examples
///
/// ```
/// use cyclone::{combine, reducer, Action, Record, Sentinel};
/// use std::sync::Arc;
///
/// let update = combine::<_, (), _>([reducer("a", |s: &Arc<i32>, a: &Action, _| {
///     if a.is("increment") {
///         (Arc::new(**s + 1), Action::none())
///     } else {
///         (Arc::clone(s), Action::none())
///     }
/// })]);
///
/// let state = Arc::new(Record::new().with("a", 0i32));
/// let (next, _) = update(&state, &Action::new("increment"));
/// assert_eq!(next.get::<i32>("a"), Some(&1));
///
/// let (same, _) = update(&next, &Action::new("other"));
/// assert!(Arc::ptr_eq(&same, &next));
/// ```
pub fn combine<A, X, I>(
    configs: I,
) -> impl Fn(&Arc<Record>, &A) -> (Arc<Record>, Next<A, X>) + Send + Sync + 'static
where
    A: Sentinel + 'static,
    X: 'static,
    I: IntoIterator<Item = ReducerConfig<A, X>>,
{
    let configs: Vec<_> = configs.into_iter().collect();
    move |state: &Arc<Record>, action: &A| reduce(&configs, state, action)
}

/// Like [`combine`], but fails fast when a dependency cannot be fresh.
///
/// Rejects two configs owning the same slice, a dependency no config owns,
/// and a dependency owned by a config declared after the dependent one.
pub fn try_combine<A, X, I>(
    configs: I,
) -> Result<impl Fn(&Arc<Record>, &A) -> (Arc<Record>, Next<A, X>) + Send + Sync + 'static>
where
    A: Sentinel + 'static,
    X: 'static,
    I: IntoIterator<Item = ReducerConfig<A, X>>,
{
    let configs: Vec<_> = configs.into_iter().collect();
    validate(&configs)?;
    Ok(combine(configs))
}

fn validate<A, X>(configs: &[ReducerConfig<A, X>]) -> Result<()> {
    let mut owned = HashSet::new();
    for config in configs {
        if !owned.insert(config.state_name()) {
            return Err(Error::DuplicateSlice {
                slice: config.state_name().to_string(),
            });
        }
    }

    let mut declared = HashSet::new();
    for config in configs {
        let slice = config.state_name();
        for dependency in config.dependencies() {
            if dependency == slice {
                continue;
            }
            if !owned.contains(dependency.as_str()) {
                return Err(Error::UnknownDependency {
                    slice: slice.to_string(),
                    dependency: dependency.clone(),
                });
            }
            if !declared.contains(dependency.as_str()) {
                return Err(Error::ForwardDependency {
                    slice: slice.to_string(),
                    dependency: dependency.clone(),
                });
            }
        }
        declared.insert(slice);
    }
    Ok(())
}

fn reduce<A: Sentinel, X>(
    configs: &[ReducerConfig<A, X>],
    state: &Arc<Record>,
    action: &A,
) -> (Arc<Record>, Next<A, X>) {
    let mut next_state = Record::clone(state);
    let mut has_changed = false;
    let mut follow_ups = Vec::new();

    for config in configs {
        let name = config.state_name();
        let Some(slice) = next_state.slice(name).cloned() else {
            log::warn!("Skipping reducer and its follow-up for missing slice `{}`", name);
            continue;
        };
        let values = config
            .dependencies()
            .iter()
            .map(|dependency| next_state.slice(dependency).cloned())
            .collect();
        let dependencies = Dependencies::new(config.dependency_names(), values);

        let Some((next_slice, follow_up)) = config.apply(&slice, action, &dependencies) else {
            log::warn!(
                "Skipping reducer and its follow-up for slice `{}` holding another type",
                name
            );
            continue;
        };

        if is_not_none(&follow_up) {
            follow_ups.push(follow_up);
        }
        if !same_slice(&slice, &next_slice) {
            has_changed = true;
            next_state.insert_slice(name, next_slice);
        }
    }

    let follow_ups = Next::Many(follow_ups);
    if has_changed {
        (Arc::new(next_state), follow_ups)
    } else {
        (Arc::clone(state), follow_ups)
    }
}
