use serde_json::Value;
use std::borrow::Cow;

use super::Dispatchable;

/// Reserved `type` of the no-op action.
pub const NONE_TYPE: &str = "cyclone$none";

/// Action types that reserve one value meaning "no action".
///
/// The store never forwards the sentinel to an update function, and
/// [`combine`](crate::combine) drops it from the collected follow-ups.
/// Implement this for an application enum to use it with the store directly.
pub trait Sentinel: Sized {
    /// Build the sentinel value.
    fn none() -> Self;

    /// Whether this value is the sentinel.
    fn is_none(&self) -> bool;
}

/// A tagged value describing an intent to change state.
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    kind: Cow<'static, str>,
    payload: Option<Value>,
}

impl Action {
    /// Create an action without a payload.
    pub fn new(kind: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
        }
    }

    /// Create an action carrying a payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclone::Action;
    /// use serde_json::json;
    ///
    /// let greet = Action::with_payload("greet", json!({ "msg": "hello" }));
    /// assert_eq!(greet.kind(), "greet");
    /// assert_eq!(greet.payload().unwrap()["msg"], "hello");
    /// ```
    pub fn with_payload(kind: impl Into<Cow<'static, str>>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload: Some(payload),
        }
    }

    /// The action's `type`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Whether the action's `type` equals `kind`.
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl Sentinel for Action {
    fn none() -> Self {
        Self::new(NONE_TYPE)
    }

    fn is_none(&self) -> bool {
        self.kind == NONE_TYPE
    }
}

/// The no-op action.
pub fn none<A: Sentinel>() -> A {
    A::none()
}

/// Whether a dispatchable may have an effect.
///
/// Deferred and context-parameterized values always pass, since the
/// sentinel can only be recognized on a concrete action.
pub fn is_not_none<A: Sentinel, X>(dispatchable: &Dispatchable<A, X>) -> bool {
    match dispatchable {
        Dispatchable::Plain(action) => !action.is_none(),
        Dispatchable::Deferred(_) | Dispatchable::Thunk(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn none_uses_reserved_type() {
        let action: Action = none();
        assert_eq!(action.kind(), NONE_TYPE);
        assert!(action.is_none());
        assert!(action.payload().is_none());
    }

    #[test]
    fn sentinel_detection_is_by_type_only() {
        let action = Action::with_payload(NONE_TYPE, json!({ "ignored": true }));
        assert!(action.is_none());
        assert!(!Action::new("increment").is_none());
    }

    #[test]
    fn deferred_always_passes() {
        let plain: Dispatchable<Action> = none::<Action>().into();
        assert!(!is_not_none(&plain));

        let deferred: Dispatchable<Action> = Dispatchable::deferred(async { Ok(none()) });
        assert!(is_not_none(&deferred));

        let thunk: Dispatchable<Action> = Dispatchable::thunk(|_| none::<Action>().into());
        assert!(is_not_none(&thunk));
    }
}
