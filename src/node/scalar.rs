//! Scalar coercions for string, integer, float, and boolean nodes
//!
//! Callers never pass null; it is filtered out before any transform runs.
//! Every coercion returns already-typed input unchanged. Only the numeric
//! coercions can fail.

use serde_json::Value as Json;

use super::errors::{BindError, BindResult};
use super::value::Value;

pub(super) fn to_string(value: Value) -> Value {
    match value {
        Value::String(_) => value,
        Value::Int(i) => Value::String(i.to_string()),
        Value::Float(f) => Value::String(float_text(f)),
        Value::Bool(b) => Value::String(b.to_string()),
        other => Value::String(other.to_string()),
    }
}

/// Floats always render with a fractional part, so `1.0` stays distinguishable from `1`.
fn float_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

pub(super) fn to_integer(field: &str, value: Value) -> BindResult<Value> {
    match value {
        Value::Int(_) => Ok(value),
        Value::Bool(b) => Ok(Value::Int(i64::from(b))),
        Value::Float(f) if f.is_finite() && f.trunc().abs() < i64::MAX as f64 => {
            Ok(Value::Int(f.trunc() as i64))
        }
        Value::String(ref s) => match s.trim().parse::<i64>() {
            Ok(i) => Ok(Value::Int(i)),
            Err(_) => Err(cannot_convert(field, &value, "integer")),
        },
        other => Err(cannot_convert(field, &other, "integer")),
    }
}

pub(super) fn to_float(field: &str, value: Value) -> BindResult<Value> {
    match value {
        Value::Float(_) => Ok(value),
        Value::Int(i) => Ok(Value::Float(i as f64)),
        Value::Bool(b) => Ok(Value::Float(if b { 1.0 } else { 0.0 })),
        Value::String(ref s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Value::Float(f)),
            _ => Err(cannot_convert(field, &value, "float")),
        },
        other => Err(cannot_convert(field, &other, "float")),
    }
}

/// Total truthiness: keyword strings map to their meaning, any other
/// non-empty string and every datetime is true.
pub(super) fn to_boolean(value: Value) -> Value {
    let truth = match &value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::String(s) => !matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "false" | "0" | "no" | "off" | ""
        ),
        Value::DateTime(_) => true,
        Value::List(items) => !items.is_empty(),
        Value::Map(fields) => !fields.is_empty(),
        Value::Object(record) => !record.fields().is_empty(),
    };
    Value::Bool(truth)
}

fn cannot_convert(field: &str, value: &Value, target: &str) -> BindError {
    // quote strings so that blank input stays visible in the message
    let shown = match value {
        Value::String(s) => Json::String(s.clone()).to_string(),
        other => other.to_string(),
    };
    BindError::invalid_value(field, format!("cannot convert {} to {}", shown, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::BindErrorCode;
    use serde_json::json;

    #[test]
    fn test_string_coercion() {
        assert_eq!(to_string(Value::Int(13)), Value::from("13"));
        assert_eq!(to_string(Value::Float(1.0)), Value::from("1.0"));
        assert_eq!(to_string(Value::Float(2.5)), Value::from("2.5"));
        assert_eq!(to_string(Value::Bool(false)), Value::from("false"));
        assert_eq!(to_string(Value::from(json!([1, 2]))), Value::from("[1,2]"));
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(to_integer("n", Value::from(" 42 ")).unwrap(), Value::Int(42));
        assert_eq!(to_integer("n", Value::Float(3.9)).unwrap(), Value::Int(3));
        assert_eq!(to_integer("n", Value::Float(-3.9)).unwrap(), Value::Int(-3));
        assert_eq!(to_integer("n", Value::Bool(true)).unwrap(), Value::Int(1));
    }

    #[test]
    fn test_integer_coercion_failure_names_field() {
        let err = to_integer("age", Value::from("abc")).unwrap_err();
        assert_eq!(err.code(), BindErrorCode::InvalidValue);
        assert_eq!(err.message(), r#"Invalid age: cannot convert "abc" to integer"#);

        assert!(to_integer("age", Value::from("1.5")).is_err());
        assert!(to_integer("age", Value::Float(f64::NAN)).is_err());
        assert!(to_integer("age", Value::from(json!({"a": 1}))).is_err());
    }

    #[test]
    fn test_float_coercion() {
        assert_eq!(to_float("x", Value::from("1")).unwrap(), Value::Float(1.0));
        assert_eq!(to_float("x", Value::Int(2)).unwrap(), Value::Float(2.0));
        assert!(to_float("x", Value::from("inf")).is_err());
        assert!(to_float("x", Value::from("one")).is_err());
    }

    #[test]
    fn test_boolean_coercion() {
        assert_eq!(to_boolean(Value::from("FALSE")), Value::Bool(false));
        assert_eq!(to_boolean(Value::from(" off ")), Value::Bool(false));
        assert_eq!(to_boolean(Value::from("")), Value::Bool(false));
        assert_eq!(to_boolean(Value::from("yes")), Value::Bool(true));
        assert_eq!(to_boolean(Value::Int(0)), Value::Bool(false));
        assert_eq!(to_boolean(Value::from(json!([]))), Value::Bool(false));
    }

    #[test]
    fn test_boolean_coercion_never_fails() {
        assert_eq!(to_boolean(Value::from("maybe")), Value::Bool(true));
        assert_eq!(to_boolean(Value::from("2020-01-01")), Value::Bool(true));

        let date = chrono::NaiveDate::from_ymd_opt(2020, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        assert_eq!(to_boolean(Value::DateTime(date)), Value::Bool(true));
    }

    #[test]
    fn test_coercions_are_idempotent() {
        let samples = [Value::from("7"), Value::Int(7), Value::Float(7.25), Value::Bool(true)];
        for sample in samples {
            let s = to_string(sample.clone());
            assert_eq!(to_string(s.clone()), s);

            if let Ok(i) = to_integer("n", sample.clone()) {
                assert_eq!(to_integer("n", i.clone()).unwrap(), i);
            }
            if let Ok(f) = to_float("n", sample.clone()) {
                assert_eq!(to_float("n", f.clone()).unwrap(), f);
            }
            let b = to_boolean(sample.clone());
            assert_eq!(to_boolean(b.clone()), b);
        }
    }
}
