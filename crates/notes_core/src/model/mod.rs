//! Domain model for the to-do list.
//!
//! # Invariants
//! - Every note is identified by a store-assigned `NoteId` that is never reused.
//! - Notes are append-only: no update or delete path exists.

pub mod note;
