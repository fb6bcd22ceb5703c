use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, Row, TransactionBehavior, params};
use tracing::debug;

use journal_types::models::{Comment, Entry, ReactionKind, Reactions};

use crate::{Database, Result, StoreError};

pub const ENTRY_ID_PREFIX: &str = "ENTRY-";

impl Database {
    // -- Entries --

    pub fn create_entry(&self, author: &str, title: &str, body: &str) -> Result<Entry> {
        self.create_entry_at(author, title, body, Utc::now())
    }

    /// Insert an entry created at `now`. The id is derived from `now` at
    /// millisecond resolution; a clash with an existing id is a storage error.
    pub fn create_entry_at(
        &self,
        author: &str,
        title: &str,
        body: &str,
        now: DateTime<Utc>,
    ) -> Result<Entry> {
        require("author", author)?;
        require("title", title)?;
        require("entry", body)?;

        let entry = Entry {
            id: entry_id_for(now),
            timestamp: format_timestamp(now),
            author: author.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            hearts: 0,
            likes: 0,
        };

        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO entries (id, timestamp, author, title, entry, hearts, likes)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0, 0)",
                params![entry.id, entry.timestamp, entry.author, entry.title, entry.body],
            )?;
            Ok(())
        })?;

        debug!(id = %entry.id, "Entry created");
        Ok(entry)
    }

    /// All entries, newest first.
    pub fn list_entries(&self) -> Result<Vec<Entry>> {
        self.with_conn(query_entries)
    }

    pub fn get_entry(&self, id: &str) -> Result<Option<Entry>> {
        self.with_conn(|conn| query_entry_by_id(conn, id))
    }

    // -- Reactions --

    /// Bump the counter named by `kind` and return both counters.
    ///
    /// Unknown kinds leave the row untouched and still return the counters.
    /// Either way a missing entry is `NotFound` and nothing is written.
    pub fn react(&self, entry_id: &str, kind: &ReactionKind) -> Result<Reactions> {
        let reactions = self.with_conn_mut(|conn| {
            // IMMEDIATE takes the write lock up front so concurrent reactions
            // from other connections queue on busy_timeout instead of racing.
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            if let Some(column) = kind.column() {
                // Legacy rows may hold NULL counters.
                let sql = format!(
                    "UPDATE entries SET {column} = COALESCE({column}, 0) + 1 WHERE id = ?1"
                );
                if tx.execute(&sql, [entry_id])? == 0 {
                    return Err(StoreError::NotFound(entry_id.to_string()));
                }
            }

            let reactions = tx
                .query_row(
                    "SELECT COALESCE(hearts, 0), COALESCE(likes, 0) FROM entries WHERE id = ?1",
                    [entry_id],
                    |row| {
                        Ok(Reactions {
                            hearts: row.get(0)?,
                            likes: row.get(1)?,
                        })
                    },
                )
                .optional()?
                .ok_or_else(|| StoreError::NotFound(entry_id.to_string()))?;

            tx.commit()?;
            Ok(reactions)
        })?;

        debug!(entry_id, kind = %kind, hearts = reactions.hearts, likes = reactions.likes, "Reaction recorded");
        Ok(reactions)
    }

    // -- Comments --

    pub fn add_comment(&self, entry_id: &str, author: &str, body: &str) -> Result<Comment> {
        self.add_comment_at(entry_id, author, body, Utc::now())
    }

    /// Append a comment. `entry_id` is stored as given without checking that
    /// the entry exists.
    pub fn add_comment_at(
        &self,
        entry_id: &str,
        author: &str,
        body: &str,
        now: DateTime<Utc>,
    ) -> Result<Comment> {
        require("author", author)?;
        require("comment", body)?;

        let timestamp = format_timestamp(now);

        let id = self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO comments (entry_id, author, comment, timestamp) VALUES (?1, ?2, ?3, ?4)",
                params![entry_id, author, body, timestamp],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        debug!(id, entry_id, "Comment added");
        Ok(Comment {
            id,
            entry_id: entry_id.to_string(),
            author: author.to_string(),
            body: body.to_string(),
            timestamp,
        })
    }

    /// Comments on `entry_id`, oldest first.
    pub fn list_comments(&self, entry_id: &str) -> Result<Vec<Comment>> {
        self.with_conn(|conn| query_comments(conn, entry_id))
    }
}

pub fn entry_id_for(now: DateTime<Utc>) -> String {
    format!("{}{}", ENTRY_ID_PREFIX, now.timestamp_millis())
}

/// RFC 3339 in UTC with fixed microsecond width, so string order is time order.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation { field });
    }
    Ok(())
}

const ENTRY_COLUMNS: &str = "id, timestamp, author, title, entry, hearts, likes";

fn query_entries(conn: &Connection) -> Result<Vec<Entry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ENTRY_COLUMNS} FROM entries ORDER BY timestamp DESC"
    ))?;

    let rows = stmt
        .query_map([], entry_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_entry_by_id(conn: &Connection, id: &str) -> Result<Option<Entry>> {
    let mut stmt = conn.prepare(&format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = ?1"))?;

    let row = stmt.query_row([id], entry_from_row).optional()?;

    Ok(row)
}

fn query_comments(conn: &Connection, entry_id: &str) -> Result<Vec<Comment>> {
    let mut stmt = conn.prepare(
        "SELECT id, entry_id, author, comment, timestamp
         FROM comments
         WHERE entry_id = ?1
         ORDER BY timestamp ASC, id ASC",
    )?;

    let rows = stmt
        .query_map([entry_id], comment_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

// Columns are nullable in databases created before versioning, so text
// fields read through Option and fall back to empty.
fn entry_from_row(row: &Row) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        timestamp: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        author: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        title: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        body: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        hearts: row.get::<_, Option<i64>>(5)?.unwrap_or(0),
        likes: row.get::<_, Option<i64>>(6)?.unwrap_or(0),
    })
}

fn comment_from_row(row: &Row) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        entry_id: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        author: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        body: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        timestamp: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
