use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged hacking session.
///
/// Interests are append-only: recorded once with a creation timestamp
/// assigned by the storage engine, then never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interest {
    pub id: i64,
    /// Free-text description of what was worked on.
    pub log: String,
    /// Effort spent, in seconds.
    pub effort: i64,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a new interest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInterest {
    pub log: String,
    /// Effort in seconds, already parsed from the `HH:MM` argument.
    pub effort: i64,
    /// Normalized tag names. May be empty, in which case no tag or link
    /// rows are touched.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// An interest as returned by the listing query, with its tag names
/// aggregated.
///
/// Tag order within one interest is not guaranteed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestSummary {
    pub log: String,
    pub effort: i64,
    /// Empty for interests recorded without tags.
    pub tags: Vec<String>,
}
