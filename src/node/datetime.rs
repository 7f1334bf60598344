//! Datetime parsing with chrono format strings

use chrono::format::ParseErrorKind;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, ParseResult};

use super::errors::{BindError, BindResult};
use super::value::Value;

pub(super) fn parse(field: &str, format: &str, value: Value) -> BindResult<Value> {
    match value {
        Value::DateTime(_) => Ok(value),
        Value::String(text) => parse_str(&text, format)
            .map(Value::DateTime)
            .map_err(|e| BindError::invalid_date(field, e)),
        other => Err(BindError::invalid_date(
            field,
            format!("expected a {} string, got {}", format, other.kind()),
        )),
    }
}

/// Parses `text`, falling back to a date at midnight when `format` has no time fields.
fn parse_str(text: &str, format: &str) -> ParseResult<NaiveDateTime> {
    match NaiveDateTime::parse_from_str(text, format) {
        Err(e) if e.kind() == ParseErrorKind::NotEnough => {
            NaiveDate::parse_from_str(text, format).map(|date| date.and_time(NaiveTime::MIN))
        }
        result => result,
    }
}
