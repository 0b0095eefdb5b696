//! Note store contract and SQLite implementation.
//!
//! # Responsibility
//! - Create the `notes` table when absent.
//! - Append rows and read the whole table back.
//!
//! # Invariants
//! - `id` uses AUTOINCREMENT, so ids are never reused even after row removal.
//! - New rows always start with `done = 0`.
//! - No update or delete statement is issued from this module.

use crate::db::DbError;
use crate::model::note::{Note, NoteId};
use log::{debug, error, info};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTES_TABLE: &str = "notes";
const NOTES_COLUMNS: [&str; 3] = ["id", "title", "done"];

const CREATE_NOTES_SQL: &str = "CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    done INT
);";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error for schema, write and read operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "table `{table}` is missing required column `{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store handle injected into the list controller.
pub trait NoteStore {
    /// Creates the notes table if absent. Existing rows are preserved.
    fn ensure_schema(&self) -> RepoResult<()>;
    /// Appends one note with `done = false` and returns its assigned id.
    fn insert(&self, title: &str) -> RepoResult<NoteId>;
    /// Returns every stored note in insertion order.
    fn fetch_all(&self) -> RepoResult<Vec<Note>>;
}

impl<S: NoteStore + ?Sized> NoteStore for &S {
    fn ensure_schema(&self) -> RepoResult<()> {
        (**self).ensure_schema()
    }

    fn insert(&self, title: &str) -> RepoResult<NoteId> {
        (**self).insert(title)
    }

    fn fetch_all(&self) -> RepoResult<Vec<Note>> {
        (**self).fetch_all()
    }
}

/// SQLite-backed note store.
pub struct SqliteNoteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteStore<'conn> {
    /// Wraps an open connection. The table is created by `ensure_schema`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteStore for SqliteNoteStore<'_> {
    fn ensure_schema(&self) -> RepoResult<()> {
        if let Err(err) = self.conn.execute_batch(CREATE_NOTES_SQL) {
            error!("event=schema_ensure module=repo status=error error={err}");
            return Err(err.into());
        }

        for column in NOTES_COLUMNS {
            if !table_has_column(self.conn, NOTES_TABLE, column)? {
                error!(
                    "event=schema_ensure module=repo status=error error_code=missing_column column={column}"
                );
                return Err(RepoError::MissingRequiredColumn {
                    table: NOTES_TABLE,
                    column,
                });
            }
        }

        debug!("event=schema_ensure module=repo status=ok");
        Ok(())
    }

    fn insert(&self, title: &str) -> RepoResult<NoteId> {
        let result = self.conn.execute(
            "INSERT INTO notes (done, title) VALUES (0, ?1);",
            params![title],
        );
        match result {
            Ok(_) => {
                let id = self.conn.last_insert_rowid();
                info!(
                    "event=note_insert module=repo status=ok note_id={id} title_chars={}",
                    title.chars().count()
                );
                Ok(id)
            }
            Err(err) => {
                error!("event=note_insert module=repo status=error error={err}");
                Err(err.into())
            }
        }
    }

    fn fetch_all(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, done FROM notes ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        debug!(
            "event=notes_fetch module=repo status=ok count={}",
            notes.len()
        );
        Ok(notes)
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id: NoteId = row.get("id")?;

    let title = row.get::<_, Option<String>>("title")?.ok_or_else(|| {
        RepoError::InvalidData(format!("NULL title in notes.title for id {id}"))
    })?;

    let done = match row.get::<_, Option<i64>>("done")? {
        Some(0) => false,
        Some(1) => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid done value `{other:?}` in notes.done for id {id}"
            )));
        }
    };

    Ok(Note { id, title, done })
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
