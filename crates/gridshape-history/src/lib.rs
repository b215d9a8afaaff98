#![forbid(unsafe_code)]
//! gridshape-history: the host side of an operation.
//!
//! A `Project` owns the live table and its undo/redo `History`. Applying an
//! operation asks it for a `MassChange`, swaps that change into the table, and
//! keeps the displaced state so the entry can be undone and redone.
//! `replay` re-applies a persisted operation log and reports per-entry
//! manifests for determinism checks.

pub mod history;
pub mod metrics;
pub mod project;
pub mod replay;

pub use history::{History, HistoryEntry};
pub use project::{HistoryError, Project};
pub use replay::{log_digest, replay};
