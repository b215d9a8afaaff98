//! Operation trait + common interfaces.
//!
//! The host calls `create_change(...)` with its current table, applies the
//! returned `MassChange`, and records it for undo. Operations never touch the
//! host's state themselves.

use gridshape_core::change::MassChange;
use gridshape_core::schema::ColumnModel;
use gridshape_core::types::{Row, Table};

use thiserror::Error;

use crate::registry::OpKind;

#[derive(Debug, Error)]
pub enum OpError {
    #[error("deserialization error: {0}")]
    Deserialize(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("schema error: {0}")]
    Schema(String),
}

impl From<serde_json::Error> for OpError {
    fn from(e: serde_json::Error) -> Self {
        OpError::Deserialize(e.to_string())
    }
}

impl From<gridshape_core::error::Error> for OpError {
    fn from(e: gridshape_core::error::Error) -> Self {
        OpError::Schema(e.to_string())
    }
}

/// Parameter problems that only show up against actual data (or that the
/// record format cannot rule out).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("start column '{0}' not found")]
    StartColumnNotFound(String),

    #[error("columnCount {requested} exceeds the {available} column(s) available from the start column")]
    ColumnCountExceeds { requested: usize, available: usize },

    #[error("columnCount must be at least 1")]
    ZeroColumnCount,
}

/// Trait that all operations must implement.
///
/// Invariants:
/// - `apply` must be deterministic given the same inputs.
/// - `apply` must not fail halfway: either a complete `MassChange` or an error.
/// - `to_record` must round-trip through `Registry::reconstruct`.
pub trait Operation: Send + Sync + 'static {
    fn kind(&self) -> OpKind;

    /// Human-readable description (stable; shown in history).
    fn describe(&self) -> String;

    /// Flat parameter record, including the `op` and `description` keys.
    fn to_record(&self) -> Result<serde_json::Value, OpError>;

    /// Compute the replacement column/row state for the given snapshot.
    fn apply(&self, columns: &ColumnModel, rows: &[Row]) -> Result<MassChange, OpError>;

    /// Description plus change, ready to be recorded by a history.
    fn create_change(&self, table: &Table) -> Result<(String, MassChange), OpError> {
        let change = self.apply(&table.columns, &table.rows)?;
        change.validate()?;
        Ok((self.describe(), change))
    }
}
