use thiserror::Error;

/// Failures surfaced by the storage engine.
///
/// The engine never logs or retries; every failure is returned to the caller,
/// which decides presentation. `Constraint` is split out from the general
/// SQLite case so callers can tell a schema violation (e.g. the unique index
/// on tag names) apart from an I/O-level problem.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not open interest store: {0}")]
    Unavailable(#[source] rusqlite::Error),

    #[error("write violated a schema constraint: {0}")]
    Constraint(#[source] rusqlite::Error),

    #[error("failed to apply migration {version}: {source}")]
    Migration {
        version: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("could not determine a data directory for the interest store")]
    NoDataDir,

    #[error(transparent)]
    Sqlite(rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, _) = &err {
            if code.code == rusqlite::ErrorCode::ConstraintViolation {
                return Self::Constraint(err);
            }
        }
        Self::Sqlite(err)
    }
}
