//! Loose casting of a submitted JSON document onto the submission schema.
//!
//! The schema is flat: `name` and `city` are text, `age`, `income`,
//! `dependents`, `cover` and `premium` are numbers, `createdAt` is a date.
//!
//! | JSON input                | text field       | number field      |
//! |---------------------------|------------------|-------------------|
//! | missing, `null`           | absent           | absent            |
//! | string                    | as is            | trimmed + parsed, `""` is absent |
//! | `"0x1f"`, `"0o17"`, `"0b11"` | as is         | unsigned hex / octal / binary |
//! | number                    | decimal string   | as is             |
//! | `true` / `false`          | `"true"`/`"false"` | 1 / 0           |
//! | array, object             | error            | error             |
//!
//! Keys outside the schema are dropped.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CastError {
    #[error("submission must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("{field}: cannot cast {value} to {expected}")]
    Field {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// The schema fields of one submission after casting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionFields {
    pub name: Option<String>,
    pub age: Option<f64>,
    pub city: Option<String>,
    pub income: Option<f64>,
    pub dependents: Option<f64>,
    pub cover: Option<f64>,
    pub premium: Option<f64>,
    /// Client-supplied insert time, normalised to RFC 3339 UTC.
    pub created_at: Option<String>,
}

/// Cast a request body onto the schema.
pub fn cast(body: &Value) -> Result<SubmissionFields, CastError> {
    let obj = body.as_object().ok_or(CastError::NotAnObject(kind(body)))?;

    Ok(SubmissionFields {
        name: text(obj, "name")?,
        age: number(obj, "age")?,
        city: text(obj, "city")?,
        income: number(obj, "income")?,
        dependents: number(obj, "dependents")?,
        cover: number(obj, "cover")?,
        premium: number(obj, "premium")?,
        created_at: date(obj, "createdAt")?,
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn mismatch(field: &'static str, expected: &'static str, value: &Value) -> CastError {
    CastError::Field {
        field,
        expected,
        value: value.to_string(),
    }
}

fn text(obj: &Map<String, Value>, field: &'static str) -> Result<Option<String>, CastError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(mismatch(field, "text", other)),
    }
}

fn number(obj: &Map<String, Value>, field: &'static str) -> Result<Option<f64>, CastError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| mismatch(field, "number", &Value::Number(n.clone()))),
        Some(Value::Bool(b)) => Ok(Some(if *b { 1.0 } else { 0.0 })),
        Some(value @ Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            match parse_number(s) {
                Some(n) if n.is_finite() => Ok(Some(n)),
                _ => Err(mismatch(field, "number", value)),
            }
        }
        Some(other) => Err(mismatch(field, "number", other)),
    }
}

/// Decimal, or an unsigned `0x`/`0o`/`0b` integer literal.
fn parse_number(s: &str) -> Option<f64> {
    let radix = match s.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return s.parse().ok(),
    };
    let digits = &s[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(|n| n as f64)
}

/// Dates are RFC 3339 strings or epoch milliseconds.
fn date(obj: &Map<String, Value>, field: &'static str) -> Result<Option<String>, CastError> {
    let parsed = match obj.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(value @ Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| mismatch(field, "date", value))?,
        Some(value @ Value::Number(n)) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .ok_or_else(|| mismatch(field, "date", value))?,
        Some(other) => return Err(mismatch(field, "date", other)),
    };
    Ok(Some(parsed.to_rfc3339_opts(SecondsFormat::Millis, true)))
}
