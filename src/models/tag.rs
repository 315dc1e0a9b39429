use serde::{Deserialize, Serialize};

/// A label categorizing interests.
///
/// Names are unique: the storage engine reuses an existing row whenever a
/// recorded interest mentions a name it has seen before, and the schema
/// backs that up with a unique index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}
