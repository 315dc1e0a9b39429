//! Effort duration parsing and display.

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid effort {input:?}: expected HH:MM")]
pub struct EffortParseError {
    input: String,
}

/// Parse an `HH:MM` string into a number of seconds.
///
/// Strict format: zero-padded 24-hour clock, nothing before or after, so
/// hours run 00-23 and minutes 00-59.
pub fn parse_effort(input: &str) -> Result<i64, EffortParseError> {
    let time = NaiveTime::parse_from_str(input, "%H:%M").map_err(|_| EffortParseError {
        input: input.to_string(),
    })?;
    Ok(i64::from(time.hour()) * 3600 + i64::from(time.minute()) * 60)
}

/// Render a number of seconds back as `HH:MM`, truncating leftover seconds.
pub fn format_effort(seconds: i64) -> String {
    format!("{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60)
}
