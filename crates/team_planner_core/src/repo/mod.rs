//! Repository layer for persisted planner state.
//!
//! # Responsibility
//! - Define the key-value persistence contract used by services.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Values are opaque text blobs; encoding belongs to `document`.
//! - Writes replace the whole value under a key.

pub mod state_repo;
