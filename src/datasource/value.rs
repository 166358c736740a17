//! Scalar values used by filters

use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal value in a filter
///
/// Strings are quoted when written into a member predicate; numbers are
/// written as bare literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl FilterValue {
    pub fn is_string(&self) -> bool {
        matches!(self, FilterValue::Str(_))
    }

    /// Render as a member literal: strings quoted, numbers bare
    pub fn member_literal(&self) -> String {
        match self {
            FilterValue::Str(s) => quote_literal(s),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Int(i) => write!(f, "{}", i),
            // Whole reals keep their fractional part: 1.0, not 1
            FilterValue::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            FilterValue::Float(x) => write!(f, "{}", x),
            FilterValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Str(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Str(s)
    }
}

impl From<i64> for FilterValue {
    fn from(i: i64) -> Self {
        FilterValue::Int(i)
    }
}

impl From<i32> for FilterValue {
    fn from(i: i32) -> Self {
        FilterValue::Int(i64::from(i))
    }
}

impl From<f64> for FilterValue {
    fn from(x: f64) -> Self {
        FilterValue::Float(x)
    }
}

/// Wrap a string in quotes for use as a document literal.
///
/// Double quotes are used unless the value itself contains a double quote and
/// no single quote, in which case single quotes are used. A value holding both
/// kinds keeps double quotes and doubles its embedded double quotes.
pub fn quote_literal(value: &str) -> String {
    let has_double = value.contains('"');
    let has_single = value.contains('\'');
    if has_double && !has_single {
        format!("'{}'", value)
    } else if has_double {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        format!("\"{}\"", value)
    }
}
