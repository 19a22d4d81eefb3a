use mnemonic_core::StorageError;

/// Constraint name SQLite reports when two bookmarks share a URL.
const URL_CONSTRAINT: &str = "bookmarks.url";

// Primary SQLite result codes. Extended codes carry these in the low byte.
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;
const SQLITE_IOERR: i32 = 10;
const SQLITE_CORRUPT: i32 = 11;
const SQLITE_FULL: i32 = 13;
const SQLITE_CANTOPEN: i32 = 14;
const SQLITE_NOTADB: i32 = 26;

/// True if `err` is the unique constraint on `bookmarks.url` firing.
pub(crate) fn is_url_violation(err: &sqlx::Error) -> bool {
    err.as_database_error().is_some_and(|db_err| {
        db_err.is_unique_violation() && db_err.message().contains(URL_CONSTRAINT)
    })
}

pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code();
            classify_result_code(code.as_deref(), message)
        }
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed | sqlx::Error::Io(_) => {
            StorageError::Unavailable(message)
        }
        sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_) => StorageError::InvalidData(message),
        sqlx::Error::Configuration(_) => StorageError::Operation(message),
        _ => StorageError::Query(message),
    }
}

/// Sorts a SQLite (extended) result code into a storage error kind.
///
/// A writer holding the database lock past `busy_timeout` reads as a
/// timeout; a missing, full or unreadable file makes the store unavailable.
fn classify_result_code(code: Option<&str>, message: String) -> StorageError {
    let primary = code
        .and_then(|code| code.parse::<i32>().ok())
        .map(|code| code & 0xff);

    match primary {
        Some(SQLITE_BUSY | SQLITE_LOCKED) => StorageError::Timeout(message),
        Some(SQLITE_IOERR | SQLITE_FULL | SQLITE_CANTOPEN) => StorageError::Unavailable(message),
        Some(SQLITE_CORRUPT | SQLITE_NOTADB) => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}
