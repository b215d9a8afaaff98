//! Deterministic per-entry manifest for audit/replay.
//!
//! Every applied operation gets a manifest with digests of its parameter
//! record and of the table before and after. Replaying the same records over
//! the same table must reproduce the same manifests.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hash::{hash_serde, Hash256};
use crate::id::HistoryEntryId;
use crate::types::Table;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryManifest {
    pub entry: HistoryEntryId,

    /// Stable hash of the operation's parameter record.
    pub op_hash: Hash256,

    /// Table digest before the operation was applied.
    pub before: Hash256,

    /// Table digest after the operation was applied.
    pub after: Hash256,

    /// Engine version string for provenance.
    pub engine_version: String,
}

impl EntryManifest {
    pub fn new(
        entry: HistoryEntryId,
        record: &serde_json::Value,
        before: &Table,
        after: &Table,
    ) -> Result<Self> {
        Ok(Self {
            entry,
            op_hash: hash_serde(record)?,
            before: table_digest(before)?,
            after: table_digest(after)?,
            engine_version: crate::VERSION.to_string(),
        })
    }
}

pub fn table_digest(table: &Table) -> Result<Hash256> {
    hash_serde(table)
}
