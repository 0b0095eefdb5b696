//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the store contract the list controller depends on.
//! - Isolate SQLite query details from controller orchestration.
//!
//! # Invariants
//! - Read paths reject invalid persisted rows instead of masking them.

pub mod note_repo;
