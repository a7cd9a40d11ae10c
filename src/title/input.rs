//! Input variants accepted by the truncator.
//!
//! Callers upstream of the truncator (JSON bodies, optional fields, LLM
//! output) do not always hand over a string. These types make every shape
//! explicit so normalization happens in one place.

use serde_json::Value;

/// A single title as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TitleInput {
    /// An actual piece of text (not yet trimmed).
    Text(String),
    /// No value was supplied.
    #[default]
    Absent,
    /// A value was supplied but it is not text.
    Other,
}

impl TitleInput {
    /// Strict mapping from JSON: only strings carry text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => TitleInput::Text(s.clone()),
            Value::Null => TitleInput::Absent,
            _ => TitleInput::Other,
        }
    }

    /// Loose mapping from JSON used for batch elements.
    ///
    /// Falsy values (`null`, `false`, `0`, `""`) count as absent. Remaining
    /// scalars are stringified. Arrays and objects are `Other`.
    pub fn coerce_json(value: &Value) -> Self {
        match value {
            Value::Null | Value::Bool(false) => TitleInput::Absent,
            Value::Bool(true) => TitleInput::Text("true".to_string()),
            Value::Number(n) if n.as_f64() == Some(0.0) => TitleInput::Absent,
            Value::Number(n) => TitleInput::Text(number_text(n)),
            Value::String(s) if s.is_empty() => TitleInput::Absent,
            Value::String(s) => TitleInput::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => TitleInput::Other,
        }
    }

    /// Collapse every variant to a trimmed string slice.
    pub fn normalized(&self) -> &str {
        match self {
            TitleInput::Text(s) => s.trim_matches(is_trimmable),
            TitleInput::Absent | TitleInput::Other => "",
        }
    }
}

impl From<&str> for TitleInput {
    fn from(s: &str) -> Self {
        TitleInput::Text(s.to_string())
    }
}

impl From<String> for TitleInput {
    fn from(s: String) -> Self {
        TitleInput::Text(s)
    }
}

impl From<&String> for TitleInput {
    fn from(s: &String) -> Self {
        TitleInput::Text(s.clone())
    }
}

impl<S: Into<TitleInput>> From<Option<S>> for TitleInput {
    fn from(value: Option<S>) -> Self {
        value.map(Into::into).unwrap_or(TitleInput::Absent)
    }
}

// Same set as JS `String.prototype.trim`: byte-order mark in, NEL out.
fn is_trimmable(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

// Integral floats print without a fraction, as `String(1.0)` does.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

/// A collection of titles, or something that was supposed to be one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleBatch {
    Sequence(Vec<TitleInput>),
    /// Not a sequence at all; resolves to an empty result.
    Other,
}

impl TitleBatch {
    /// Arrays become sequences (elements coerced loosely), anything else is `Other`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => {
                TitleBatch::Sequence(items.iter().map(TitleInput::coerce_json).collect())
            }
            _ => TitleBatch::Other,
        }
    }
}

impl<T: Into<TitleInput>> From<Vec<T>> for TitleBatch {
    fn from(items: Vec<T>) -> Self {
        TitleBatch::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<TitleInput>> From<&[T]> for TitleBatch {
    fn from(items: &[T]) -> Self {
        TitleBatch::Sequence(items.iter().cloned().map(Into::into).collect())
    }
}
