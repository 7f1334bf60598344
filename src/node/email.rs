//! Email normalization and validation
//!
//! Input is stringified, trimmed, and lowercased before being matched
//! against a WHATWG-style address pattern. Rejections quote the value as it
//! was received.

use std::sync::OnceLock;

use regex::Regex;

use super::errors::{BindError, BindResult};
use super::scalar;
use super::value::Value;

/// Dot-separated local-part atoms, `@`, then one or more dot-separated labels
/// of 1-63 alphanumerics/hyphens that neither start nor end with a hyphen.
/// No part of the address may contain consecutive dots.
const EMAIL_PATTERN: &str = r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)*$";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

pub(super) fn normalize(field: &str, value: Value) -> BindResult<Value> {
    let original = match scalar::to_string(value) {
        Value::String(s) => s,
        other => other.to_string(),
    };

    let normalized = original.trim().to_lowercase();
    if !email_regex().is_match(&normalized) {
        return Err(BindError::invalid_email(field, &original));
    }

    Ok(Value::String(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::BindErrorCode;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let value = normalize("email", Value::from("  USER@Example.COM  ")).unwrap();
        assert_eq!(value, Value::from("user@example.com"));
    }

    #[test]
    fn test_accepts_common_addresses() {
        for address in ["a@b", "first.last+tag@sub.example.co.uk", "x_y@host-name.io"] {
            assert!(normalize("email", Value::from(address)).is_ok(), "{}", address);
        }
    }

    #[test]
    fn test_rejects_malformed_addresses_quoting_input() {
        let invalid = [
            "abc",
            "user@",
            "@example.com",
            "user@@example.com",
            "user example@example.com",
            "user@-example.com",
            "user@example..com",
            "user@example-.com",
        ];
        for address in invalid {
            let err = normalize("email", Value::from(address)).unwrap_err();
            assert_eq!(err.code(), BindErrorCode::InvalidEmail);
            assert_eq!(err.message(), format!("Invalid email: {}", address));
        }
    }

    #[test]
    fn test_rejects_stray_dots_in_local_part() {
        for address in ["a..b@example.com", ".a@example.com", "a.@example.com"] {
            let err = normalize("email", Value::from(address)).unwrap_err();
            assert_eq!(err.code(), BindErrorCode::InvalidEmail, "{}", address);
        }
    }

    #[test]
    fn test_rejects_overlong_label() {
        let address = format!("user@{}.com", "a".repeat(64));
        assert!(normalize("email", Value::from(address)).is_err());
    }

    #[test]
    fn test_integer_input_is_stringified_then_rejected() {
        let err = normalize("email", Value::Int(123)).unwrap_err();
        assert_eq!(err.message(), "Invalid email: 123");
    }
}
