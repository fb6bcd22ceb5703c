use rusqlite::{Connection, TransactionBehavior};
use tracing::info;

use crate::Result;

pub const SCHEMA_VERSION: i64 = 1;

/// Bring the schema up to `SCHEMA_VERSION`. Idempotent.
///
/// The version check and the migration share one IMMEDIATE transaction, so
/// concurrent openers of a fresh file apply v1 exactly once.
///
/// Databases created before versioning existed already hold `entries` and
/// `comments` with the same columns; v1 uses `IF NOT EXISTS` so those files
/// are adopted as-is.
pub fn run(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    tx.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version = current_version(&tx)?;

    if version < 1 {
        info!("Journal DB: running migration v1 (initial schema)");
        tx.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS entries (
                id          TEXT PRIMARY KEY,
                timestamp   TEXT,
                author      TEXT,
                title       TEXT,
                entry       TEXT,
                hearts      INTEGER DEFAULT 0,
                likes       INTEGER DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_entries_timestamp
                ON entries(timestamp);

            -- entry_id is deliberately not a foreign key: comments may
            -- reference entries that do not exist.
            CREATE TABLE IF NOT EXISTS comments (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                entry_id    TEXT,
                author      TEXT,
                comment     TEXT,
                timestamp   TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_comments_entry
                ON comments(entry_id, timestamp);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    tx.commit()?;

    info!("Database migrations complete");
    Ok(())
}

pub fn current_version(conn: &Connection) -> Result<i64> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;
    Ok(version)
}
