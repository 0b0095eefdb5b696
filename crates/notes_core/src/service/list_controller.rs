//! List screen controller.
//!
//! # Responsibility
//! - Ensure the schema once at mount, then mirror the store in memory.
//! - Insert submitted titles and rebuild the mirror afterwards.
//! - Project the mirror into renderable rows.
//!
//! # Invariants
//! - The mirror is only ever replaced wholesale by a successful `fetch_all`.
//! - A failed refresh or insert leaves the mirror untouched.
//! - Mount wiring runs at most once per controller.
//! - Writes only need the schema; a failed read never blocks inserts.

use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{NoteStore, RepoError};
use crate::service::add_flow::AddOutcome;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Controller error for list-screen use cases.
#[derive(Debug)]
pub enum ListControllerError {
    /// `add_note` was called before the schema step of `mount` succeeded.
    NotMounted,
    /// Store-layer failure.
    Store(RepoError),
}

impl Display for ListControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotMounted => write!(f, "list controller is not mounted"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ListControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotMounted => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<RepoError> for ListControllerError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Uninitialized,
    Ready,
}

/// Holds the injected store and the in-memory mirror of its rows.
pub struct ListController<S: NoteStore> {
    store: S,
    state: ControllerState,
    schema_ready: bool,
    mirror: Vec<Note>,
}

impl<S: NoteStore> ListController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: ControllerState::Uninitialized,
            schema_ready: false,
            mirror: Vec::new(),
        }
    }

    /// Ensures the schema, then performs the first refresh.
    ///
    /// A no-op once the controller is `Ready`. If the schema step succeeded
    /// but the first refresh failed, a later call only retries the refresh.
    pub fn mount(&mut self) -> Result<(), ListControllerError> {
        if self.state == ControllerState::Ready {
            return Ok(());
        }

        if !self.schema_ready {
            if let Err(err) = self.store.ensure_schema() {
                error!("event=list_mount module=service status=error error={err}");
                return Err(err.into());
            }
            self.schema_ready = true;
        }

        if self.refresh() {
            info!(
                "event=list_mount module=service status=ok count={}",
                self.mirror.len()
            );
        }
        Ok(())
    }

    /// Rebuilds the mirror from the store.
    ///
    /// Returns `false` when the fetch failed; the error is logged and the
    /// previous mirror stays in place.
    pub fn refresh(&mut self) -> bool {
        match self.store.fetch_all() {
            Ok(notes) => {
                self.mirror = notes;
                self.state = ControllerState::Ready;
                true
            }
            Err(err) => {
                error!("event=list_refresh module=service status=error error={err}");
                false
            }
        }
    }

    /// Inserts one note and refreshes the mirror.
    ///
    /// Allowed once the schema exists, even if no refresh has succeeded yet;
    /// the post-insert refresh moves the controller to `Ready` when it works.
    pub fn add_note(&mut self, title: &str) -> Result<NoteId, ListControllerError> {
        if !self.schema_ready {
            warn!("event=note_add module=service status=error error_code=not_mounted");
            return Err(ListControllerError::NotMounted);
        }

        let id = match self.store.insert(title) {
            Ok(id) => id,
            Err(err) => {
                warn!("event=note_add module=service status=error error={err}");
                return Err(err.into());
            }
        };

        self.refresh();
        Ok(id)
    }

    /// Applies the message produced by the add form.
    ///
    /// Returns the new id for a submission, `None` for a cancellation.
    pub fn handle_add_outcome(
        &mut self,
        outcome: AddOutcome,
    ) -> Result<Option<NoteId>, ListControllerError> {
        match outcome {
            AddOutcome::Submitted(title) => self.add_note(&title).map(Some),
            AddOutcome::Cancelled => Ok(None),
        }
    }

    /// Render projection: one title per mirrored note.
    pub fn rows(&self) -> impl Iterator<Item = &str> + '_ {
        self.mirror.iter().map(|note| note.title.as_str())
    }

    pub fn notes(&self) -> &[Note] {
        &self.mirror
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == ControllerState::Ready
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
