use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please enter whole numbers for both fields.")]
    EmptyOrNonInteger,
    #[error("Values must be non-negative.")]
    Negative,
    #[error("Starting second must be less than or equal to ending second.")]
    RangeInverted,
}

/// A start/end pair that has passed [`validate`].
///
/// Fields stay private so the `start_second <= end_second` invariant can only
/// be established by the validator.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedRange {
    start_second: u64,
    end_second: u64,
}

impl ValidatedRange {
    pub fn start_second(&self) -> u64 {
        self.start_second
    }

    pub fn end_second(&self) -> u64 {
        self.end_second
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "startSecond": self.start_second,
            "endSecond": self.end_second,
        })
    }
}

pub fn validate(start_raw: &str, end_raw: &str) -> Result<ValidatedRange, ValidationError> {
    let (Some(start), Some(end)) = (parse_int_strict(start_raw), parse_int_strict(end_raw)) else {
        return Err(ValidationError::EmptyOrNonInteger);
    };
    if start < 0 || end < 0 {
        return Err(ValidationError::Negative);
    }
    if start > end {
        return Err(ValidationError::RangeInverted);
    }

    Ok(ValidatedRange {
        start_second: start.unsigned_abs(),
        end_second: end.unsigned_abs(),
    })
}

fn parse_int_strict(raw: &str) -> Option<i64> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<i64>().ok()
}
