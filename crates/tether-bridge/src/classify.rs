//! Decides whether a value travels as a DOM attribute or an instance property.
//!
//! Attributes are strings, so only primitives survive the trip. Everything
//! else is assigned directly on the element. Classification is per value, not
//! per prop name, since a prop may change type between renders.

use crate::props::PropValue;

/// Where a value is written on the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Attribute,
    Property,
}

/// The primitive kind an attribute was serialized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    String,
    Boolean,
    Number,
}

/// Classify a value. The sentinel has no binding.
pub fn classify(value: &PropValue) -> Option<Binding> {
    match value {
        PropValue::Empty => None,
        PropValue::String(_) | PropValue::Bool(_) | PropValue::Number(_) => {
            Some(Binding::Attribute)
        }
        PropValue::Undefined | PropValue::Json(_) | PropValue::Callback(_) => {
            Some(Binding::Property)
        }
    }
}

/// The DOM string form of an attribute-bound value.
///
/// `None` means the attribute must be absent: boolean `false`, and any value
/// that is not attribute-bound.
pub fn attribute_value(value: &PropValue) -> Option<String> {
    match value {
        PropValue::String(s) => Some(s.clone()),
        PropValue::Bool(true) => Some(String::new()),
        PropValue::Number(n) => Some(format_number(*n)),
        _ => None,
    }
}

/// Read an attribute back into the value kind that produced it.
///
/// Booleans follow HTML semantics: presence is `true` whatever the text.
pub fn read_attribute(kind: AttributeKind, raw: Option<&str>) -> PropValue {
    match (kind, raw) {
        (AttributeKind::Boolean, raw) => PropValue::Bool(raw.is_some()),
        (_, None) => PropValue::Empty,
        (AttributeKind::String, Some(s)) => PropValue::String(s.to_string()),
        (AttributeKind::Number, Some(s)) => s
            .trim()
            .parse::<f64>()
            .map(PropValue::Number)
            .unwrap_or(PropValue::Number(f64::NAN)),
    }
}

/// Format a number the way the DOM stringifies it. Magnitudes from 1e21 up
/// and below 1e-6 use exponent form (`1e+21`, `1.5e-7`).
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let exp = format!("{n:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::Callback;
    use serde_json::json;

    #[test]
    fn primitives_are_attributes() {
        assert_eq!(classify(&"a".into()), Some(Binding::Attribute));
        assert_eq!(classify(&true.into()), Some(Binding::Attribute));
        assert_eq!(classify(&3.into()), Some(Binding::Attribute));
    }

    #[test]
    fn non_primitives_are_properties() {
        assert_eq!(classify(&PropValue::Json(json!({"a": 1}))), Some(Binding::Property));
        assert_eq!(classify(&PropValue::Json(json!([1, 2]))), Some(Binding::Property));
        assert_eq!(
            classify(&PropValue::Callback(Callback::new(|_| {}))),
            Some(Binding::Property)
        );
        assert_eq!(classify(&PropValue::Undefined), Some(Binding::Property));
        assert_eq!(classify(&PropValue::Empty), None);
    }

    #[test]
    fn numbers_format_like_the_dom() {
        assert_eq!(attribute_value(&3.into()), Some("3".to_string()));
        assert_eq!(attribute_value(&PropValue::Number(2.5)), Some("2.5".to_string()));
        assert_eq!(attribute_value(&PropValue::Number(-0.0)), Some("0".to_string()));
        assert_eq!(
            attribute_value(&PropValue::Number(f64::INFINITY)),
            Some("Infinity".to_string())
        );
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        let format = |n: f64| attribute_value(&PropValue::Number(n));

        assert_eq!(format(1e21), Some("1e+21".to_string()));
        assert_eq!(format(-1.23e22), Some("-1.23e+22".to_string()));
        assert_eq!(format(1.5e-7), Some("1.5e-7".to_string()));
        assert_eq!(format(1e20), Some("100000000000000000000".to_string()));
        assert_eq!(format(0.000001), Some("0.000001".to_string()));
        assert_eq!(
            read_attribute(AttributeKind::Number, Some("1e+21")),
            PropValue::Number(1e21)
        );
    }

    #[test]
    fn attribute_round_trip_preserves_meaning() {
        let cases = [
            (PropValue::Bool(false), AttributeKind::Boolean),
            (PropValue::Bool(true), AttributeKind::Boolean),
            (PropValue::Number(42.0), AttributeKind::Number),
            (PropValue::Number(-1.25), AttributeKind::Number),
            (PropValue::Number(f64::NEG_INFINITY), AttributeKind::Number),
            (PropValue::from("hello world"), AttributeKind::String),
            (PropValue::from(""), AttributeKind::String),
        ];

        for (value, kind) in cases {
            let raw = attribute_value(&value);
            assert_eq!(read_attribute(kind, raw.as_deref()), value, "{value:?}");
        }
    }

    #[test]
    fn boolean_false_means_absent() {
        assert_eq!(attribute_value(&false.into()), None);
        assert_eq!(read_attribute(AttributeKind::Boolean, Some("false")), PropValue::Bool(true));
    }
}
