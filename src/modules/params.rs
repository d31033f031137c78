use serde::Deserialize;

use crate::error::ValidationError;

pub const DEFAULT_LIMIT: i64 = 10;

/// An id supplied in a JSON body, either as a number or as numeric text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    Number(f64),
    Text(String),
}

impl IdInput {
    pub fn to_id(&self) -> Option<i64> {
        match self {
            IdInput::Number(n) => whole(*n),
            IdInput::Text(s) => parse_id(s),
        }
    }
}

/// Parses a finite number and truncates it toward zero.
pub fn parse_id(raw: &str) -> Option<i64> {
    let value: f64 = raw.trim().parse().ok()?;
    whole(value)
}

/// Page index; absent or unparseable means the first page.
pub fn parse_page(raw: Option<&str>) -> Result<i64, ValidationError> {
    match parse_number(raw) {
        None => Ok(0),
        Some(n) => match whole(n) {
            Some(page) if page >= 0 => Ok(page),
            _ => Err(ValidationError::BadPage),
        },
    }
}

/// Page size; absent, unparseable or zero falls back to [`DEFAULT_LIMIT`].
pub fn parse_limit(raw: Option<&str>) -> Result<i64, ValidationError> {
    match parse_number(raw) {
        None => Ok(DEFAULT_LIMIT),
        Some(n) => match whole(n) {
            Some(0) => Ok(DEFAULT_LIMIT),
            Some(limit) if limit > 0 => Ok(limit),
            _ => Err(ValidationError::BadLimit),
        },
    }
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| !n.is_nan())
}

fn whole(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let value = value.trunc();
    // i64::MAX is not representable as f64; 2^63 is the first value out of range
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}
