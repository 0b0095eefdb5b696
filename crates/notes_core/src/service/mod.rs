//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into list-screen use cases.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod add_flow;
pub mod list_controller;
