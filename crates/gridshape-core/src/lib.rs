#![forbid(unsafe_code)]
//! gridshape-core: the data model shared by every gridshape crate.
//!
//! - `types`: `Scalar`, `Cell`, `Row`, `Table`.
//! - `schema`: `Column` and the ordered `ColumnModel`.
//! - `change`: `MassChange`, the atomic "replace all columns and rows" payload.
//! - `config`: engine configuration and the `TransformPolicy` snapshot.
//! - `hash` / `manifest`: stable digests for history entries and replay.
//!
//! **No I/O, no operation logic** here.

pub mod change;
pub mod config;
pub mod error;
pub mod hash;
pub mod id;
pub mod manifest;
pub mod prelude;
pub mod schema;
pub mod types;

/// Version string recorded in entry manifests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
