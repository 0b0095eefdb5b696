//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose list/add use cases of the notes store to Dart via FRB.
//! - Keep error semantics simple: envelopes with a message, never panics.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call ensures the schema before touching the `notes` table.
//! - Titles are stored verbatim; no trimming or validation.

use log::warn;
use notes_core::db::open_db;
use notes_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, AppConfig,
    LogSettings, Note, NoteStore, RepoResult, SqliteNoteStore,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const FALLBACK_DB_FILE_NAME: &str = "notes.db";
static NOTES_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let result = LogSettings::parse(&level, &log_dir)
        .map_err(|err| err.to_string())
        .and_then(|settings| init_logging_inner(&settings).map_err(|err| err.to_string()));
    match result {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One list row as seen by the mobile UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: i64,
    pub title: String,
    pub done: bool,
}

/// Envelope for the list screen refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    /// All notes in insertion order; empty on failure.
    pub items: Vec<NoteItem>,
    /// Human-readable message for diagnostics.
    pub message: String,
}

/// Envelope for the add-note action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    /// Assigned id on success.
    pub note_id: Option<i64>,
    pub message: String,
}

/// Returns every stored note for the list screen.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures yield an empty list and an error message.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesListResponse {
    match with_note_store(|store| store.fetch_all()) {
        Ok(notes) => {
            let items = notes.into_iter().map(to_note_item).collect::<Vec<_>>();
            let message = format!("Loaded {} note(s).", items.len());
            NotesListResponse { items, message }
        }
        Err(err) => {
            warn!("event=notes_list module=ffi status=error error={err}");
            NotesListResponse {
                items: Vec::new(),
                message: format!("notes_list failed: {err}"),
            }
        }
    }
}

/// Adds one note submitted from the add screen.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Empty titles are accepted.
/// - Never panics; returns the assigned id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn note_add(title: String) -> NoteActionResponse {
    match with_note_store(|store| store.insert(title.as_str())) {
        Ok(note_id) => NoteActionResponse {
            ok: true,
            note_id: Some(note_id),
            message: "Note added.".to_string(),
        },
        Err(err) => {
            warn!("event=note_add module=ffi status=error error={err}");
            NoteActionResponse {
                ok: false,
                note_id: None,
                message: format!("note_add failed: {err}"),
            }
        }
    }
}

fn resolve_notes_db_path() -> PathBuf {
    NOTES_DB_PATH.get_or_init(initial_db_path).clone()
}

fn configured_db_path() -> PathBuf {
    match AppConfig::from_env() {
        Ok(config) => config.db_path,
        Err(err) => {
            warn!("event=config_resolve module=ffi status=error error={err}");
            std::env::temp_dir().join(FALLBACK_DB_FILE_NAME)
        }
    }
}

#[cfg(not(test))]
fn initial_db_path() -> PathBuf {
    configured_db_path()
}

// Unit tests must never write into the database the terminal app uses.
#[cfg(test)]
fn initial_db_path() -> PathBuf {
    std::env::temp_dir().join(format!("notes-ffi-test-{}.db", std::process::id()))
}

fn with_note_store<T>(
    f: impl FnOnce(&SqliteNoteStore<'_>) -> RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_notes_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("notes DB open failed: {err}"))?;
    let store = SqliteNoteStore::new(&conn);
    store
        .ensure_schema()
        .map_err(|err| format!("notes schema init failed: {err}"))?;
    f(&store).map_err(|err| err.to_string())
}

fn to_note_item(note: Note) -> NoteItem {
    NoteItem {
        id: note.id,
        title: note.title,
        done: note.done,
    }
}
