//! Prop values and per-render prop snapshots.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::element::Event;

/// A snapshot of a wrapper's props, taken once per render pass.
pub type PropSnapshot = BTreeMap<String, PropValue>;

/// The "never supplied" marker every declared prop defaults to.
pub const EMPTY_PROP: PropValue = PropValue::Empty;

/// An event handler passed through a prop.
///
/// Equality is identity: two callbacks are equal only when they share the
/// same allocation, the way a host framework compares handler references.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(&Event)>);

impl Callback {
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// A single prop value as seen by the bridge.
#[derive(Debug, Clone, Default)]
pub enum PropValue {
    /// The sentinel. The prop was not meaningfully assigned.
    #[default]
    Empty,
    /// Explicitly assigned "no value". Distinct from [`PropValue::Empty`].
    Undefined,
    String(String),
    Bool(bool),
    Number(f64),
    /// Objects and arrays.
    Json(serde_json::Value),
    Callback(Callback),
}

impl PropValue {
    /// Whether this is the sentinel.
    pub fn is_empty(&self) -> bool {
        matches!(self, PropValue::Empty)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            PropValue::Callback(cb) => Some(cb),
            _ => None,
        }
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropValue::Empty, PropValue::Empty) => true,
            (PropValue::Undefined, PropValue::Undefined) => true,
            (PropValue::String(a), PropValue::String(b)) => a == b,
            (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
            // Bitwise so NaN compares equal to itself and re-renders stay idempotent.
            (PropValue::Number(a), PropValue::Number(b)) => a.to_bits() == b.to_bits(),
            (PropValue::Json(a), PropValue::Json(b)) => a == b,
            (PropValue::Callback(a), PropValue::Callback(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::String(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::String(s)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Number(f64::from(n))
    }
}

impl From<Callback> for PropValue {
    fn from(cb: Callback) -> Self {
        PropValue::Callback(cb)
    }
}

impl From<serde_json::Value> for PropValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => PropValue::Undefined,
            Value::Bool(b) => PropValue::Bool(b),
            Value::Number(n) => n.as_f64().map(PropValue::Number).unwrap_or(PropValue::Undefined),
            Value::String(s) => PropValue::String(s),
            other => PropValue::Json(other),
        }
    }
}

/// Look up a prop, treating a missing key and the sentinel the same way.
///
/// Hosts differ on whether undeclared or unused props appear in the snapshot
/// at all, so callers must never distinguish the two cases.
pub fn supplied<'a>(props: &'a PropSnapshot, key: &str) -> Option<&'a PropValue> {
    props.get(key).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sentinel_differs_from_falsy_values() {
        assert!(EMPTY_PROP.is_empty());
        assert_ne!(EMPTY_PROP, PropValue::Undefined);
        assert_ne!(EMPTY_PROP, PropValue::Bool(false));
        assert_ne!(EMPTY_PROP, PropValue::from(""));
        assert_ne!(EMPTY_PROP, PropValue::from(0));
    }

    #[test]
    fn supplied_ignores_missing_and_empty() {
        let mut props = PropSnapshot::new();
        props.insert("value".into(), EMPTY_PROP);
        props.insert("disabled".into(), false.into());

        assert!(supplied(&props, "value").is_none());
        assert!(supplied(&props, "missing").is_none());
        assert_eq!(supplied(&props, "disabled"), Some(&PropValue::Bool(false)));
    }

    #[test]
    fn callbacks_compare_by_identity() {
        let a = Callback::new(|_| {});
        let b = Callback::new(|_| {});

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn nan_equals_itself() {
        assert_eq!(PropValue::Number(f64::NAN), PropValue::Number(f64::NAN));
    }

    #[test]
    fn converts_json_values() {
        assert_eq!(PropValue::from(json!("x")), PropValue::from("x"));
        assert_eq!(PropValue::from(json!(null)), PropValue::Undefined);
        assert!(matches!(PropValue::from(json!([1, 2])), PropValue::Json(_)));
    }
}
