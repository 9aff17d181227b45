//! Assertion primitives for test bodies
//!
//! Each check returns `Ok(())` on success and a [`TestFailure::Assertion`]
//! otherwise, so test functions chain them with `?`. Values are compared as
//! [`Value`]s, which model the loosely typed data UI automation hands back
//! (labels, counts, flags, missing values).

use std::fmt;

use crate::common::{TestFailure, TestOutcome};

/// A loosely typed value as seen by an assertion
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl Value {
    /// Equality after coercion: numbers, numeric strings and booleans compare
    /// by numeric value; `Null` and `Undefined` only equal each other.
    pub fn loose_eq(&self, other: &Value) -> bool {
        use Value::*;

        match (self, other) {
            (Undefined | Null, Undefined | Null) => true,
            (Undefined | Null, _) | (_, Undefined | Null) => false,
            (Bool(a), Bool(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Number(a), Number(b)) => a == b,
            (Bool(b), other) => Number(bool_to_number(*b)).loose_eq(other),
            (this, Bool(b)) => this.loose_eq(&Number(bool_to_number(*b))),
            (Number(n), Str(s)) | (Str(s), Number(n)) => *n == string_to_number(s),
        }
    }

    /// Same kind and same value, no coercion
    pub fn strict_eq(&self, other: &Value) -> bool {
        self == other
    }

    /// `false`, `0`, `NaN`, the empty string, `Null` and `Undefined` are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
        }
    }

    /// Rendering used inside failure messages; strings keep their quotes so
    /// `1` and `'1'` stay distinguishable.
    pub fn describe(&self) -> String {
        match self {
            Value::Str(s) => format!("'{}'", s),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Str(s) => f.write_str(s),
        }
    }
}

fn bool_to_number(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Numeric reading of a string: blank is zero, anything unparseable is NaN
fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix).map_or(f64::NAN, |v| v as f64);
    }

    // Rust also accepts "inf" and "nan" spellings, which are not numbers here
    if s.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) {
        s.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(c.to_string())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

number_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Fails unless `actual` loosely equals `expected`
///
/// Default message: `Expected '{expected}' got '{actual}'.`
pub fn assert_equal(actual: impl Into<Value>, expected: impl Into<Value>, message: Option<&str>) -> TestOutcome {
    let (actual, expected) = (actual.into(), expected.into());
    if actual.loose_eq(&expected) {
        return Ok(());
    }
    Err(failure(message, || mismatch(&actual, &expected)))
}

/// Fails unless `actual` and `expected` are the same kind and value
///
/// Default message: `Expected '{expected}' got '{actual}'.`
pub fn assert_strict_equal(
    actual: impl Into<Value>,
    expected: impl Into<Value>,
    message: Option<&str>,
) -> TestOutcome {
    let (actual, expected) = (actual.into(), expected.into());
    if actual.strict_eq(&expected) {
        return Ok(());
    }
    Err(failure(message, || mismatch(&actual, &expected)))
}

/// Fails when `value` is falsy
///
/// Default message: `Expression '{value}' failed.`
pub fn assert_true(value: impl Into<Value>, message: Option<&str>) -> TestOutcome {
    let value = value.into();
    if value.is_truthy() {
        return Ok(());
    }
    Err(failure(message, || format!("Expression '{}' failed.", value.describe())))
}

fn mismatch(actual: &Value, expected: &Value) -> String {
    format!("Expected '{}' got '{}'.", expected.describe(), actual.describe())
}

// An empty custom message counts as no message
fn failure(message: Option<&str>, default: impl FnOnce() -> String) -> TestFailure {
    match message {
        Some(m) if !m.is_empty() => TestFailure::Assertion(m.to_string()),
        _ => TestFailure::Assertion(default()),
    }
}
