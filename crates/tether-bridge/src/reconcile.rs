//! Property reconciliation between two prop snapshots.

use crate::case::camel_to_dash_case;
use crate::classify::{attribute_value, classify, Binding};
use crate::element::HostElement;
use crate::events::callback_event_name;
use crate::props::{supplied, PropSnapshot, PropValue};

/// Keys owned by the host framework rather than the element.
const RESERVED_PROPS: &[&str] = &[
    "children",
    "class",
    "className",
    "forwardedRef",
    "key",
    "ref",
    "style",
];

/// A single write to apply to an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetAttribute { name: String, value: String },
    RemoveAttribute { name: String },
    SetProperty { name: String, value: PropValue },
    ClearProperty { name: String },
}

/// Whether a key is handled by reconciliation at all.
///
/// Reserved framework keys and `onXxx` callback props are skipped; callbacks
/// belong to the event bridge.
pub fn is_element_prop(key: &str) -> bool {
    !RESERVED_PROPS.contains(&key) && callback_event_name(key).is_none()
}

/// Compute the mutations that take an element from `previous` to `current`.
///
/// A pure function of the two snapshots: reconciling a snapshot against
/// itself yields nothing.
pub fn reconcile(previous: &PropSnapshot, current: &PropSnapshot) -> Vec<Mutation> {
    let mut mutations = Vec::new();

    for (key, value) in current {
        if !is_element_prop(key) {
            continue;
        }
        let Some(binding) = classify(value) else {
            continue;
        };

        let before = supplied(previous, key);
        if before == Some(value) {
            continue;
        }

        // A value that switched between attribute and property must not
        // leave its old form behind.
        if let Some(old) = before {
            if classify(old) != Some(binding) {
                mutations.push(clear(key, old));
            }
        }

        mutations.push(set(key, value, binding));
    }

    for (key, old) in previous {
        if !is_element_prop(key) || old.is_empty() {
            continue;
        }
        if supplied(current, key).is_none() {
            mutations.push(clear(key, old));
        }
    }

    mutations
}

/// Apply mutations to an element in order.
pub fn apply(element: &dyn HostElement, mutations: &[Mutation]) {
    for mutation in mutations {
        match mutation {
            Mutation::SetAttribute { name, value } => element.set_attribute(name, value),
            Mutation::RemoveAttribute { name } => element.remove_attribute(name),
            Mutation::SetProperty { name, value } => element.set_property(name, value.clone()),
            Mutation::ClearProperty { name } => element.clear_property(name),
        }
    }

    if !mutations.is_empty() {
        tracing::debug!(
            tag = %element.tag_name(),
            count = mutations.len(),
            "Applied prop mutations"
        );
    }
}

fn set(key: &str, value: &PropValue, binding: Binding) -> Mutation {
    match binding {
        Binding::Attribute => match attribute_value(value) {
            Some(value) => Mutation::SetAttribute {
                name: camel_to_dash_case(key),
                value,
            },
            None => Mutation::RemoveAttribute {
                name: camel_to_dash_case(key),
            },
        },
        Binding::Property => Mutation::SetProperty {
            name: key.to_string(),
            value: value.clone(),
        },
    }
}

fn clear(key: &str, old: &PropValue) -> Mutation {
    match classify(old) {
        Some(Binding::Attribute) => Mutation::RemoveAttribute {
            name: camel_to_dash_case(key),
        },
        _ => Mutation::ClearProperty {
            name: key.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::VirtualElement;
    use crate::props::{Callback, EMPTY_PROP};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn snapshot(entries: &[(&str, PropValue)]) -> PropSnapshot {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn pushes_primitives_as_attributes_and_objects_as_properties() {
        let current = snapshot(&[
            ("placeholder", "Name".into()),
            ("autoFocus", true.into()),
            ("items", PropValue::Json(json!([1, 2]))),
        ]);

        let mutations = reconcile(&PropSnapshot::new(), &current);

        assert_eq!(
            mutations,
            vec![
                Mutation::SetAttribute {
                    name: "auto-focus".into(),
                    value: String::new()
                },
                Mutation::SetProperty {
                    name: "items".into(),
                    value: PropValue::Json(json!([1, 2]))
                },
                Mutation::SetAttribute {
                    name: "placeholder".into(),
                    value: "Name".into()
                },
            ]
        );
    }

    #[test]
    fn reconciling_twice_is_idempotent() {
        let el = VirtualElement::new("ion-input");
        let p1 = snapshot(&[
            ("value", "abc".into()),
            ("disabled", false.into()),
            ("config", PropValue::Json(json!({"a": 1}))),
            ("formatter", PropValue::Callback(Callback::new(|_| {}))),
            ("unset", EMPTY_PROP),
        ]);

        apply(&el, &reconcile(&PropSnapshot::new(), &p1));
        let after_first = el.mutation_count();

        let second = reconcile(&p1, &p1);
        apply(&el, &second);

        assert!(second.is_empty());
        assert_eq!(el.mutation_count(), after_first);
    }

    #[test]
    fn clears_props_that_disappear_or_become_empty() {
        let previous = snapshot(&[
            ("color", "primary".into()),
            ("config", PropValue::Json(json!({}))),
            ("size", "large".into()),
        ]);
        let current = snapshot(&[("color", EMPTY_PROP), ("size", "large".into())]);

        let mutations = reconcile(&previous, &current);

        assert_eq!(
            mutations,
            vec![
                Mutation::RemoveAttribute {
                    name: "color".into()
                },
                Mutation::ClearProperty {
                    name: "config".into()
                },
            ]
        );
    }

    #[test]
    fn type_change_clears_the_old_binding() {
        let previous = snapshot(&[("value", PropValue::Json(json!(["a"])))]);
        let current = snapshot(&[("value", "a".into())]);

        let mutations = reconcile(&previous, &current);

        assert_eq!(
            mutations,
            vec![
                Mutation::ClearProperty {
                    name: "value".into()
                },
                Mutation::SetAttribute {
                    name: "value".into(),
                    value: "a".into()
                },
            ]
        );
    }

    #[test]
    fn boolean_false_removes_attribute() {
        let el = VirtualElement::new("ion-toggle");
        let on = snapshot(&[("checked", true.into())]);
        let off = snapshot(&[("checked", false.into())]);

        apply(&el, &reconcile(&PropSnapshot::new(), &on));
        assert_eq!(el.attribute("checked"), Some(String::new()));

        apply(&el, &reconcile(&on, &off));
        assert_eq!(el.attribute("checked"), None);
    }

    #[test]
    fn explicit_undefined_is_pushed_as_property() {
        let el = VirtualElement::new("ion-select");
        let current = snapshot(&[("value", PropValue::Undefined)]);

        apply(&el, &reconcile(&PropSnapshot::new(), &current));

        assert!(el.has_property("value"));
    }

    #[test]
    fn skips_reserved_and_callback_props() {
        let current = snapshot(&[
            ("className", "a b".into()),
            ("style", "color: red".into()),
            ("onIonChange", PropValue::Callback(Callback::new(|_| {}))),
        ]);

        assert!(reconcile(&PropSnapshot::new(), &current).is_empty());
    }
}
