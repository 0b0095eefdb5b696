//! Core domain logic for the Notes to-do app.
//! Store, list controller and add flow shared by the terminal app and FFI.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{default_log_level, AppConfig, ConfigError, LogSettings};
pub use logging::{init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId};
pub use repo::note_repo::{NoteStore, RepoError, RepoResult, SqliteNoteStore};
pub use service::add_flow::{AddForm, AddOutcome};
pub use service::list_controller::{ControllerState, ListController, ListControllerError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
