//! Operation registry: persisted `op` identifiers <-> operation constructors.
//!
//! The set of operation kinds is closed (`OpKind`), and each kind maps to one
//! entry of a static dispatch table. Adding an operation means adding a
//! variant, its identifier, and its table entry.

use gridshape_core::config::TransformPolicy;
use serde::{Deserialize, Serialize};

use crate::traits::{OpError, Operation};
use crate::transpose::TransposeColumnsIntoRows;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    #[serde(rename = "transpose-columns-into-rows")]
    TransposeColumnsIntoRows,
}

impl OpKind {
    /// Identifier stored in the `op` key of parameter records.
    pub const fn id(self) -> &'static str {
        match self {
            OpKind::TransposeColumnsIntoRows => "transpose-columns-into-rows",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        ENTRIES.iter().map(|e| e.kind).find(|k| k.id() == id)
    }
}

type ReconstructFn = fn(&serde_json::Value, TransformPolicy) -> Result<Box<dyn Operation>, OpError>;

struct RegistryEntry {
    kind: OpKind,
    reconstruct: ReconstructFn,
}

static ENTRIES: &[RegistryEntry] = &[RegistryEntry {
    kind: OpKind::TransposeColumnsIntoRows,
    reconstruct: reconstruct_transpose,
}];

fn reconstruct_transpose(
    record: &serde_json::Value,
    policy: TransformPolicy,
) -> Result<Box<dyn Operation>, OpError> {
    Ok(Box::new(
        TransposeColumnsIntoRows::from_record(record)?.with_policy(policy),
    ))
}

/// Rebuilds operations from records under one `TransformPolicy`.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    policy: TransformPolicy,
}

impl Registry {
    pub fn new(policy: TransformPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TransformPolicy {
        self.policy
    }

    pub fn kinds(&self) -> impl Iterator<Item = OpKind> {
        ENTRIES.iter().map(|e| e.kind)
    }

    /// Read `op`, then hand the whole record to that kind's decoder.
    pub fn reconstruct(&self, record: &serde_json::Value) -> Result<Box<dyn Operation>, OpError> {
        let id = record
            .get("op")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| OpError::Deserialize("missing or non-string field `op`".into()))?;
        let entry = ENTRIES
            .iter()
            .find(|e| e.kind.id() == id)
            .ok_or_else(|| OpError::UnknownOperation(id.to_string()))?;
        (entry.reconstruct)(record, self.policy)
    }
}
