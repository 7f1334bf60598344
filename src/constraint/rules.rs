//! Constraint rules and message templates

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::node::{BindError, BindErrorCode, BindResult, Value};

/// Placeholder substituted with the owning node's name
const FIELD_PLACEHOLDER: &str = "{field}";

/// Caller-supplied predicate
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// The predicate half of a constraint
#[derive(Clone)]
pub enum Rule {
    /// Value must not be null
    Required,
    /// Minimum length of a string (chars) or collection (elements)
    MinLength(usize),
    /// Maximum length of a string (chars) or collection (elements)
    MaxLength(usize),
    /// Inclusive numeric lower bound
    Min(f64),
    /// Inclusive numeric upper bound
    Max(f64),
    /// Whole-value regex match
    Pattern(Regex),
    Custom(Predicate),
}

impl Rule {
    /// Evaluates the rule. Every rule except `Required` accepts null.
    pub fn check(&self, value: &Value) -> bool {
        if value.is_null() {
            return !matches!(self, Rule::Required);
        }

        match self {
            Rule::Required => true,
            Rule::MinLength(min) => length(value).is_some_and(|len| len >= *min),
            Rule::MaxLength(max) => length(value).is_some_and(|len| len <= *max),
            Rule::Min(min) => number(value).is_some_and(|n| n >= *min),
            Rule::Max(max) => number(value).is_some_and(|n| n <= *max),
            Rule::Pattern(regex) => match value {
                Value::String(s) => regex.is_match(s),
                Value::Int(_) | Value::Float(_) => regex.is_match(&value.to_string()),
                _ => false,
            },
            Rule::Custom(predicate) => predicate(value),
        }
    }

    /// Default message template for this rule
    fn template(&self) -> String {
        match self {
            Rule::Required => "{field} is required".into(),
            Rule::MinLength(min) => format!("{{field}} must have a length of at least {}", min),
            Rule::MaxLength(max) => format!("{{field}} must have a length of at most {}", max),
            Rule::Min(min) => format!("{{field}} must be at least {}", min),
            Rule::Max(max) => format!("{{field}} must be at most {}", max),
            Rule::Pattern(regex) => format!("{{field}} must match {}", regex.as_str()),
            Rule::Custom(_) => "{field} is invalid".into(),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => write!(f, "Required"),
            Rule::MinLength(n) => write!(f, "MinLength({})", n),
            Rule::MaxLength(n) => write!(f, "MaxLength({})", n),
            Rule::Min(n) => write!(f, "Min({})", n),
            Rule::Max(n) => write!(f, "Max({})", n),
            Rule::Pattern(regex) => write!(f, "Pattern({:?})", regex.as_str()),
            Rule::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::List(items) => Some(items.len()),
        Value::Map(fields) => Some(fields.len()),
        Value::Object(record) => Some(record.fields().len()),
        _ => None,
    }
}

/// Numeric view of a raw value; constraints run before coercion, so numeric
/// strings count.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// A predicate over a value plus a `{field}` message template.
#[derive(Debug, Clone)]
pub struct Constraint {
    rule: Rule,
    message: String,
}

impl Constraint {
    /// Create a constraint with the rule's default message
    pub fn new(rule: Rule) -> Self {
        let message = rule.template();
        Self { rule, message }
    }

    /// The implicit constraint of required fields
    pub fn required() -> Self {
        Self::new(Rule::Required)
    }

    pub fn min_length(min: usize) -> Self {
        Self::new(Rule::MinLength(min))
    }

    pub fn max_length(max: usize) -> Self {
        Self::new(Rule::MaxLength(max))
    }

    pub fn min(min: f64) -> Self {
        Self::new(Rule::Min(min))
    }

    pub fn max(max: f64) -> Self {
        Self::new(Rule::Max(max))
    }

    pub fn pattern(regex: Regex) -> Self {
        Self::new(Rule::Pattern(regex))
    }

    /// A constraint backed by an arbitrary predicate
    pub fn custom<F>(predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            rule: Rule::Custom(Arc::new(predicate)),
            message: message.into(),
        }
    }

    /// Replaces the message template
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Returns the raw message template
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Pure predicate; no side effects
    pub fn validate(&self, value: &Value) -> bool {
        self.rule.check(value)
    }

    /// Returns the message with `{field}` substituted
    pub fn message_for(&self, field: &str) -> String {
        self.message.replace(FIELD_PLACEHOLDER, field)
    }

    /// Validates `value` on behalf of `field`, failing with the substituted message.
    pub fn enforce(&self, field: &str, value: &Value) -> BindResult<()> {
        if self.validate(value) {
            return Ok(());
        }

        let code = match self.rule {
            Rule::Required => BindErrorCode::Required,
            _ => BindErrorCode::ConstraintFailed,
        };
        Err(BindError::new(code, field, self.message_for(field)))
    }
}
