//! Transpose a contiguous run of columns into rows (wide -> long).
//!
//! `planner` collapses the column range into one combined column, `expander`
//! spreads each source row over as many rows as it has surviving transposed
//! cells, and `codec` moves the parameters in and out of persisted records.

pub mod codec;
pub mod config;
pub mod expander;
pub mod planner;

use gridshape_core::change::MassChange;
use gridshape_core::config::{ColumnOverflowPolicy, TransformPolicy, UnmatchedStartPolicy};
use gridshape_core::schema::ColumnModel;
use gridshape_core::types::Row;
use tracing::{debug, warn};

pub use config::TransposeConfig;

use crate::plan::ColumnPlan;
use crate::registry::OpKind;
use crate::traits::{ConfigError, OpError, Operation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransposeColumnsIntoRows {
    pub config: TransposeConfig,
    pub policy: TransformPolicy,
}

impl TransposeColumnsIntoRows {
    pub fn new(config: TransposeConfig) -> Self {
        Self {
            config,
            policy: TransformPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: TransformPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Reconstruct from a persisted parameter record.
    pub fn from_record(record: &serde_json::Value) -> Result<Self, OpError> {
        Ok(Self::new(codec::decode(record)?))
    }

    /// Column plan for `columns`, after the policy checks.
    ///
    /// Returns `Ok(None)` when the start column is missing and the policy says
    /// to leave the table alone.
    pub fn plan(&self, columns: &ColumnModel) -> Result<Option<ColumnPlan>, OpError> {
        self.config.validate()?;
        let plan = planner::plan_columns(&columns.columns, &self.config);

        if !plan.matched {
            return match self.policy.unmatched_start {
                UnmatchedStartPolicy::Reject => Err(ConfigError::StartColumnNotFound(
                    self.config.start_column_name.clone(),
                )
                .into()),
                UnmatchedStartPolicy::NoOp => {
                    warn!(
                        start_column = %self.config.start_column_name,
                        "start column not found; leaving table unchanged"
                    );
                    Ok(None)
                }
            };
        }

        if plan.absorbed < self.config.column_count {
            match self.policy.column_overflow {
                ColumnOverflowPolicy::Reject => {
                    return Err(ConfigError::ColumnCountExceeds {
                        requested: self.config.column_count,
                        available: plan.absorbed,
                    }
                    .into())
                }
                ColumnOverflowPolicy::Truncate => debug!(
                    requested = self.config.column_count,
                    available = plan.absorbed,
                    "column range truncated at last column"
                ),
            }
        }

        Ok(Some(plan))
    }
}

impl Operation for TransposeColumnsIntoRows {
    fn kind(&self) -> OpKind {
        OpKind::TransposeColumnsIntoRows
    }

    fn describe(&self) -> String {
        self.config.describe()
    }

    fn to_record(&self) -> Result<serde_json::Value, OpError> {
        codec::encode(&self.config)
    }

    fn apply(&self, columns: &ColumnModel, rows: &[Row]) -> Result<MassChange, OpError> {
        let Some(plan) = self.plan(columns)? else {
            return Ok(MassChange::new(columns.columns.clone(), rows.to_vec()));
        };

        let new_rows = expander::expand_rows(rows, &columns.columns, &plan, &self.config);
        debug!(
            start_column_index = plan.start_column_index,
            old_columns = columns.len(),
            new_columns = plan.width(),
            old_rows = rows.len(),
            new_rows = new_rows.len(),
            "transposed columns into rows"
        );
        Ok(MassChange::new(plan.columns, new_rows))
    }
}
