//! Conversion of matched JSON leaves into metric values.
//!
//! Rules:
//! - Number: the raw text parsed as `f64`; values outside the `f64` range
//!   are rejected.
//! - String: exactly one leading and one trailing byte (the quotes) removed,
//!   then parsed as `f64`.
//! - Null: `f64::NAN`, meaning "present but undefined", as opposed to an
//!   error meaning "no value".
//! - Object / Array / Other: not a scalar.

use thiserror::Error;

use crate::path::{ResultKind, TypedResult};

/// Why a result produced no value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    #[error("not a scalar result: {0}")]
    NotScalar(ResultKind),
    #[error("number did not parse as float: <{0}>")]
    InvalidNumber(String),
    #[error("string is not numeric: <{0}>")]
    NotNumericString(String),
    #[error("string span too short to strip quotes: <{0}>")]
    Unquotable(String),
}

/// Coerce a typed result to a float.
pub fn coerce(result: &TypedResult<'_>) -> Result<f64, CoerceError> {
    match result.kind() {
        ResultKind::Number => {
            let raw = result.raw();
            parse_float(&raw).ok_or(CoerceError::InvalidNumber(raw))
        }
        ResultKind::String => {
            let raw = result.raw();
            let inner = strip_quotes(&raw).ok_or_else(|| CoerceError::Unquotable(raw.clone()))?;
            parse_float(inner).ok_or_else(|| CoerceError::NotNumericString(raw.clone()))
        }
        ResultKind::Null => Ok(f64::NAN),
        kind => Err(CoerceError::NotScalar(kind)),
    }
}

/// Parse a configured literal (static value) as a float.
pub fn coerce_literal(literal: &str) -> Result<f64, CoerceError> {
    parse_float(literal).ok_or_else(|| CoerceError::NotNumericString(literal.to_string()))
}

/// Drop exactly the first and last byte. Spans shorter than two bytes yield `None`.
pub(crate) fn strip_quotes(raw: &str) -> Option<&str> {
    if raw.len() < 2 {
        return None;
    }
    raw.get(1..raw.len() - 1)
}

/// Out-of-range text such as `1e400` is rejected rather than saturated to infinity.
fn parse_float(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_infinite() && !is_inf_literal(s) {
        return None;
    }
    Some(v)
}

fn is_inf_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
