//! Loosely-typed input fields
//!
//! Query editors hand us whatever the user typed: numbers arrive as JSON
//! numbers or as strings, list fields arrive as a comma-delimited string until
//! they are normalized. These wrappers keep the raw input until a validator
//! coerces it.

use serde::{Deserialize, Serialize};

/// A numeric field that may still hold raw text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    /// Parsed integer
    Int(i64),
    /// Fractional number
    Float(f64),
    /// Unparsed user input
    Text(String),
}

impl NumericInput {
    /// Parse the leading integer of this value
    ///
    /// Follows the lenient rule query editors use for number inputs:
    /// surrounding whitespace is ignored, a sign is allowed, trailing
    /// characters after the digits are dropped (`"12px"` is 12) and fractions
    /// truncate toward zero. Returns `None` when no digits lead the value.
    pub fn parse_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            Self::Float(_) => None,
            Self::Text(s) => parse_leading_int(s),
        }
    }

    /// Whether the raw value counts as "set" (zero and the empty string do not)
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Int(v) => *v != 0,
            Self::Float(v) => *v != 0.0 && !v.is_nan(),
            Self::Text(s) => !s.is_empty(),
        }
    }

    /// The integer value, if already coerced
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<i64> for NumericInput {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for NumericInput {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for NumericInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let end = rest
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&rest[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// A list field that may still be a comma-delimited string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    /// Normalized list
    List(Vec<String>),
    /// Raw delimited text
    Text(String),
}

impl ListInput {
    /// Whether the value has already been normalized
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Whether the raw value counts as "set"
    ///
    /// An empty string is unset; any list, even an empty one, is set.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::List(_) => true,
            Self::Text(s) => !s.is_empty(),
        }
    }

    /// Split raw text on commas without trimming; lists normalize to themselves
    pub fn normalize(&mut self) {
        if let Self::Text(raw) = self {
            let items = raw.split(',').map(str::to_string).collect();
            *self = Self::List(items);
        }
    }

    /// Entries of the field, splitting and trimming raw text
    pub fn trimmed_entries(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.iter().map(|s| s.trim().to_string()).collect(),
            Self::Text(raw) => raw.split(',').map(|s| s.trim().to_string()).collect(),
        }
    }

    /// The normalized items, if any
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for ListInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<String>> for ListInput {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// A string field is set when present and non-empty
pub(crate) fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_lenient() {
        assert_eq!(NumericInput::from("42").parse_int(), Some(42));
        assert_eq!(NumericInput::from("  -7 ").parse_int(), Some(-7));
        assert_eq!(NumericInput::from("12abc").parse_int(), Some(12));
        assert_eq!(NumericInput::from("3.9").parse_int(), Some(3));
        assert_eq!(NumericInput::from("0x1A").parse_int(), Some(26));
        assert_eq!(NumericInput::from(2.7).parse_int(), Some(2));
        assert_eq!(NumericInput::from(-2.7).parse_int(), Some(-2));
    }

    #[test]
    fn test_parse_int_rejects_non_numeric() {
        assert_eq!(NumericInput::from("abc").parse_int(), None);
        assert_eq!(NumericInput::from("").parse_int(), None);
        assert_eq!(NumericInput::from("-").parse_int(), None);
        assert_eq!(NumericInput::from("99999999999999999999").parse_int(), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(!NumericInput::Int(0).is_truthy());
        assert!(!NumericInput::from("").is_truthy());
        assert!(NumericInput::from("0").is_truthy());
        assert!(ListInput::List(vec![]).is_truthy());
        assert!(!ListInput::from("").is_truthy());
    }

    #[test]
    fn test_numeric_input_from_json() {
        let v: NumericInput = serde_json::from_str("10").unwrap();
        assert_eq!(v, NumericInput::Int(10));
        let v: NumericInput = serde_json::from_str("\"10\"").unwrap();
        assert_eq!(v, NumericInput::Text("10".to_string()));
        let v: NumericInput = serde_json::from_str("0.5").unwrap();
        assert_eq!(v, NumericInput::Float(0.5));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut field = ListInput::from("a, b,c");
        field.normalize();
        let once = field.clone();
        field.normalize();
        assert_eq!(field, once);
        assert_eq!(
            field.as_list().unwrap(),
            &["a".to_string(), " b".to_string(), "c".to_string()]
        );
    }
}
