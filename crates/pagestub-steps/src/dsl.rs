//! Step parameter parsing.

use crate::error::{Result, StepError};
use std::collections::HashMap;
use std::time::Duration;

/// Split a step parameter into named values.
///
/// Segments are comma-separated. `name=value` segments are stored under `name`; the first
/// bare segment is stored under `default_key`. A segment only counts as named when the part
/// before `=` is a plain identifier, so `https://a.example.com/?id=1` stays a bare value.
/// Later bare segments are ignored.
pub fn params_to_map(param: &str, default_key: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for segment in param.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match named(segment) {
            Some((key, value)) => {
                params.insert(key.to_string(), value.to_string());
            }
            None => {
                params
                    .entry(default_key.to_string())
                    .or_insert_with(|| segment.to_string());
            }
        }
    }
    params
}

fn named(segment: &str) -> Option<(&str, &str)> {
    let (key, value) = segment.split_once('=')?;
    let key = key.trim();
    let mut chars = key.chars();
    let leading = chars.next()?;
    if (leading.is_ascii_alphabetic() || leading == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Some((key, value.trim()))
    } else {
        None
    }
}

/// Parse a non-negative number of seconds.
pub fn parse_seconds(key: &str, value: &str) -> Result<Duration> {
    let secs: f64 = value
        .trim()
        .parse()
        .map_err(|_| StepError::invalid(key, value, "expected a number of seconds"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(StepError::invalid(
            key,
            value,
            "expected a non-negative number of seconds",
        ));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|_| StepError::invalid(key, value, "number of seconds is too large"))
}
