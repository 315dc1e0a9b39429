mod error;
mod schema;

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use chrono::Utc;
use rusqlite::{Connection, Transaction};

pub use error::StoreError;

use crate::models::*;

/// Storage engine for interests and tags.
///
/// Owns one SQLite connection for the lifetime of the process invocation;
/// there is no shared or global handle. All multi-step writes go through a
/// transaction so a failure partway through leaves no interest without its
/// tags.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path).map_err(StoreError::Unavailable)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    pub fn open_default() -> Result<Self, StoreError> {
        let dirs = directories::ProjectDirs::from("", "", "interest-tracker")
            .ok_or(StoreError::NoDataDir)?;
        let db_path = dirs.data_dir().join("interest_tracker.db");
        tracing::debug!("Opening interest store at {}", db_path.display());
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::Unavailable)?;
        Ok(Self { conn })
    }

    /// Bring the schema up to date. Idempotent, run once per process start.
    pub fn migrate(&self) -> Result<(), StoreError> {
        schema::run_migrations(&self.conn)
    }

    /// Record one interest, creating and linking its tags in the same
    /// transaction.
    ///
    /// Tag names are deduplicated first (first occurrence wins), so
    /// `["a", "a"]` yields one tag row and one link row. With no tags at
    /// all, only the interest row is written.
    pub fn record_interest(&mut self, input: NewInterest) -> Result<Interest, StoreError> {
        let tx = self.conn.transaction()?;
        let now = Utc::now();

        tx.execute(
            "INSERT INTO interests (log, effort, created_at) VALUES (?, ?, ?)",
            (&input.log, input.effort, now.to_rfc3339()),
        )?;
        let interest_id = tx.last_insert_rowid();

        let names = dedup_names(&input.tags);
        if !names.is_empty() {
            let tag_ids = resolve_tags(&tx, &names)?;
            link_tags(&tx, interest_id, &tag_ids)?;
        }

        tx.commit()?;

        Ok(Interest {
            id: interest_id,
            log: input.log,
            effort: input.effort,
            created_at: now,
        })
    }

    /// All interests in insertion order, each with its tag names aggregated.
    ///
    /// Tagless interests are included with an empty tag list (outer join,
    /// not inner), so nothing recorded ever disappears from the listing.
    pub fn list_interests(&self) -> Result<Vec<InterestSummary>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT i.log, i.effort, GROUP_CONCAT(t.name, ',')
             FROM interests i
             LEFT JOIN interests_tags it ON i.id = it.interest_id
             LEFT JOIN tags t ON it.tag_id = t.id
             GROUP BY i.id
             ORDER BY i.id",
        )?;

        let interests = stmt
            .query_map([], |row| {
                let joined: Option<String> = row.get(2)?;
                Ok(InterestSummary {
                    log: row.get(0)?,
                    effort: row.get(1)?,
                    tags: joined
                        .map(|s| s.split(',').map(str::to_string).collect())
                        .unwrap_or_default(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(interests)
    }

    pub fn all_tags(&self) -> Result<Vec<Tag>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM tags ORDER BY name")?;
        let tags = stmt
            .query_map([], |row| {
                Ok(Tag {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tags)
    }
}

/// Map tag names to ids, inserting rows for names not seen before.
///
/// One batched lookup regardless of how many names are given; matches are
/// collected into a map so membership checks don't depend on input order.
/// Callers pass names already deduplicated, which keeps this free of
/// within-call double inserts under the unique name index.
fn resolve_tags(tx: &Transaction, names: &[String]) -> Result<Vec<i64>, StoreError> {
    let placeholders = vec!["?"; names.len()].join(", ");
    let sql = format!("SELECT id, name FROM tags WHERE name IN ({placeholders})");
    let mut stmt = tx.prepare(&sql)?;

    let mut existing: HashMap<String, i64> = HashMap::new();
    let mut rows = stmt.query(rusqlite::params_from_iter(names))?;
    while let Some(row) = rows.next()? {
        existing.insert(row.get(1)?, row.get(0)?);
    }

    let mut insert = tx.prepare("INSERT INTO tags (name) VALUES (?)")?;
    let mut tag_ids = Vec::with_capacity(names.len());
    for name in names {
        match existing.get(name) {
            Some(&id) => tag_ids.push(id),
            None => {
                insert.execute([name])?;
                tag_ids.push(tx.last_insert_rowid());
            }
        }
    }

    Ok(tag_ids)
}

fn link_tags(tx: &Transaction, interest_id: i64, tag_ids: &[i64]) -> Result<(), StoreError> {
    let mut stmt = tx.prepare("INSERT INTO interests_tags (interest_id, tag_id) VALUES (?, ?)")?;
    for tag_id in tag_ids {
        stmt.execute((interest_id, tag_id))?;
    }
    Ok(())
}

/// Keep the first occurrence of each name, preserving input order.
fn dedup_names(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.iter()
        .filter(|t| seen.insert(t.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_fails_when_path_is_unusable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, b"plain file").unwrap();

        // Parent of the db path is a regular file, so there is no handle to
        // call anything on afterwards.
        let result = Database::open(blocker.join("interest_tracker.db"));
        assert!(result.is_err());
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("interest_tracker.db");

        let db = Database::open(db_path.clone()).unwrap();
        db.migrate().unwrap();

        assert!(db_path.exists());
    }

    #[test]
    fn test_duplicate_tag_insert_classifies_as_constraint() {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();

        db.conn
            .execute("INSERT INTO tags (name) VALUES ('rust')", [])
            .unwrap();
        let err: StoreError = db
            .conn
            .execute("INSERT INTO tags (name) VALUES ('rust')", [])
            .unwrap_err()
            .into();

        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[test]
    fn test_dedup_names_keeps_first_occurrence_order() {
        let names = vec![
            "b".to_string(),
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ];
        assert_eq!(dedup_names(&names), vec!["b", "a", "c"]);
    }
}
