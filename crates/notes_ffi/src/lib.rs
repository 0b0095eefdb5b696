//! Flutter-facing bindings for the Notes core.

pub mod api;
