//! Boundary checks for candidate exercise records.
//!
//! Request bodies arrive untyped. A candidate must be a JSON object with
//! exactly the keys `name`, `reps`, `weight`, `unit` and `date`, and every
//! value must satisfy its field rule, before it is turned into
//! [`ExerciseFields`].

use crate::exercise::model::{ExerciseFields, Unit};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

pub const REQUIRED_KEYS: [&str; 5] = ["name", "reps", "weight", "unit", "date"];

// ASCII digits only, `\d` would also admit other Unicode digits.
static DATE_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{2}$").expect("date pattern compiles"));

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("candidate is not an object")]
    NotAnObject,

    #[error("candidate keys must be exactly name, reps, weight, unit and date")]
    KeySetMismatch,

    #[error("name must be a non-blank string")]
    InvalidName,

    #[error("reps must be a positive integer")]
    InvalidReps,

    #[error("weight must be a positive integer")]
    InvalidWeight,

    #[error("unit must be lbs or kgs")]
    InvalidUnit,

    #[error("date must match DD-DD-DD")]
    InvalidDate,
}

/// Returns true when `candidate` is an acceptable exercise record.
pub fn validate(candidate: &Value) -> bool {
    check(candidate).is_ok()
}

/// Like [`validate`] but reports the first rule the candidate breaks.
pub fn check(candidate: &Value) -> Result<(), ValidationError> {
    parse(candidate).map(|_| ())
}

fn parse(candidate: &Value) -> Result<ExerciseFields, ValidationError> {
    let body = candidate.as_object().ok_or(ValidationError::NotAnObject)?;
    if !has_exact_keys(body) {
        return Err(ValidationError::KeySetMismatch);
    }

    let name = body
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.trim_matches(is_blank).is_empty())
        .ok_or(ValidationError::InvalidName)?;
    let reps = body
        .get("reps")
        .and_then(positive_integer)
        .ok_or(ValidationError::InvalidReps)?;
    let weight = body
        .get("weight")
        .and_then(positive_integer)
        .ok_or(ValidationError::InvalidWeight)?;
    let unit = body
        .get("unit")
        .and_then(Value::as_str)
        .and_then(|u| u.parse::<Unit>().ok())
        .ok_or(ValidationError::InvalidUnit)?;
    let date = body
        .get("date")
        .and_then(Value::as_str)
        .filter(|d| DATE_FORMAT.is_match(d))
        .ok_or(ValidationError::InvalidDate)?;

    Ok(ExerciseFields {
        name: name.to_string(),
        reps,
        weight,
        unit,
        date: date.to_string(),
    })
}

fn has_exact_keys(body: &Map<String, Value>) -> bool {
    body.len() == REQUIRED_KEYS.len() && REQUIRED_KEYS.iter().all(|k| body.contains_key(*k))
}

/// Whitespace as a browser's `String.prototype.trim` sees it: U+FEFF counts,
/// U+0085 does not.
fn is_blank(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

/// A number counts as an integer when it has no fractional part, so `5.0`
/// is accepted and `2.5` is not. Values outside the i64 range are rejected.
fn positive_integer(value: &Value) -> Option<i64> {
    let number = value.as_number()?;
    let integer = if let Some(i) = number.as_i64() {
        i
    } else if number.is_u64() {
        return None;
    } else {
        let f = number.as_f64()?;
        if f.fract() != 0.0 || f < i64::MIN as f64 || f >= i64::MAX as f64 {
            return None;
        }
        f as i64
    };

    (integer > 0).then_some(integer)
}

impl TryFrom<&Value> for ExerciseFields {
    type Error = ValidationError;

    fn try_from(candidate: &Value) -> Result<Self, Self::Error> {
        parse(candidate)
    }
}
