//! Deterministic replay & provenance helpers.
//!
//! Replaying the same operation log over the same table yields the same
//! table and the same per-entry manifests.

use gridshape_core::config::EngineConfig;
use gridshape_core::hash::{hash_serde, Hash256};
use gridshape_core::manifest::EntryManifest;
use gridshape_core::types::Table;

use crate::project::{HistoryError, Project};

/// Apply `records` in order and return the final table with one manifest
/// per record.
pub fn replay(
    table: Table,
    records: &[serde_json::Value],
    cfg: &EngineConfig,
) -> Result<(Table, Vec<EntryManifest>), HistoryError> {
    let cfg = EngineConfig {
        history_limit: cfg.history_limit.max(records.len()),
        ..cfg.clone()
    };
    let mut project = Project::new(table, &cfg)?;
    for record in records {
        project.apply_record(record)?;
    }
    let manifests = project.history().manifests().cloned().collect();
    Ok((project.into_table(), manifests))
}

/// Hash a whole operation log into one stable digest.
pub fn log_digest(records: &[serde_json::Value]) -> Result<Hash256, HistoryError> {
    Ok(hash_serde(&records)?)
}
