//! Convenient re-exports for downstream crates.

pub use crate::change::MassChange;
pub use crate::config::{ColumnOverflowPolicy, EngineConfig, TransformPolicy, UnmatchedStartPolicy};
pub use crate::error::{Error, Result};
pub use crate::id::HistoryEntryId;
pub use crate::manifest::EntryManifest;
pub use crate::schema::{Column, ColumnModel};
pub use crate::types::{Cell, Row, Scalar, Table};
