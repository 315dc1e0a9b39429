use rusqlite::Connection;

use super::error::StoreError;

struct Migration {
    version: &'static str,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "001",
        name: "initial",
        sql: include_str!("migrations/001_initial.sql"),
    },
    Migration {
        version: "002",
        name: "unique_tag_names",
        sql: include_str!("migrations/002_unique_tag_names.sql"),
    },
];

pub fn run_migrations(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )?;

    // Databases created before migration tracking existed already have the
    // initial tables. Mark 001 applied so only later migrations run.
    if check_needs_baseline(conn)? {
        mark_migration_applied(conn, "001", "initial")?;
        tracing::info!("Detected existing database, marked migration 001 as applied");
    }

    let applied = get_applied_migrations(conn)?;

    for migration in MIGRATIONS {
        if !applied.contains(&migration.version.to_string()) {
            apply_migration(conn, migration)?;
        }
    }

    Ok(())
}

fn check_needs_baseline(conn: &Connection) -> Result<bool, StoreError> {
    let migration_count: i32 =
        conn.query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
            row.get(0)
        })?;

    if migration_count > 0 {
        return Ok(false);
    }

    let tables_exist: i32 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='interests'",
        [],
        |row| row.get(0),
    )?;

    Ok(tables_exist > 0)
}

fn get_applied_migrations(conn: &Connection) -> Result<Vec<String>, StoreError> {
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version")?;
    let versions = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(versions)
}

fn mark_migration_applied(conn: &Connection, version: &str, name: &str) -> Result<(), StoreError> {
    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?, ?, ?)",
        (version, name, &now),
    )?;
    Ok(())
}

fn apply_migration(conn: &Connection, migration: &Migration) -> Result<(), StoreError> {
    tracing::info!(
        "Applying migration {}: {}",
        migration.version,
        migration.name
    );

    conn.execute_batch(&format!("BEGIN TRANSACTION; {} COMMIT;", migration.sql))
        .map_err(|source| StoreError::Migration {
            version: migration.version,
            source,
        })?;

    mark_migration_applied(conn, migration.version, migration.name)?;

    tracing::info!("Migration {} applied successfully", migration.version);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_run_on_fresh_db() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        for table in ["interests", "tags", "interests_tags"] {
            let count: i32 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "missing table {table}");
        }

        let versions = get_applied_migrations(&conn).unwrap();
        assert_eq!(versions, vec!["001", "002"]);
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap(); // Should not fail

        let versions = get_applied_migrations(&conn).unwrap();
        assert_eq!(versions, vec!["001", "002"]);
    }

    #[test]
    fn test_existing_db_gets_baseline() {
        let conn = Connection::open_in_memory().unwrap();

        // Schema as created by the pre-tracking era of the tool: no unique
        // index on tag names, and duplicate tag rows in the wild.
        conn.execute_batch(
            "CREATE TABLE interests(id INTEGER PRIMARY KEY, log TEXT, effort INTEGER, created_at TEXT DEFAULT CURRENT_TIMESTAMP);
             CREATE TABLE tags(id INTEGER PRIMARY KEY, name VARCHAR(255));
             CREATE TABLE interests_tags(interest_id INTEGER, tag_id INTEGER);
             INSERT INTO interests (log, effort) VALUES ('soldering', 1800);
             INSERT INTO tags (name) VALUES ('hardware'), ('hardware');
             INSERT INTO interests_tags VALUES (1, 1), (1, 2);",
        )
        .unwrap();

        run_migrations(&conn).unwrap();

        let versions = get_applied_migrations(&conn).unwrap();
        assert_eq!(versions, vec!["001", "002"]);

        // 002 collapsed the duplicate tag and remapped both links onto it.
        let tag_count: i32 = conn
            .query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))
            .unwrap();
        assert_eq!(tag_count, 1);

        let distinct_tag_ids: i32 = conn
            .query_row(
                "SELECT COUNT(DISTINCT tag_id) FROM interests_tags",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(distinct_tag_ids, 1);

        // Unique index is live now.
        let err = conn.execute("INSERT INTO tags (name) VALUES ('hardware')", []);
        assert!(err.is_err());
    }
}
