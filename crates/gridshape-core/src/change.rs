//! `MassChange`: replace a table's whole column/row state in one step.
//!
//! Applying a change hands back the state it displaced, which is itself a
//! `MassChange`. Undo is "apply the displaced state"; redo is "apply the
//! original change again". No per-cell diffing is involved.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::{self, Column, ColumnModel};
use crate::types::{Row, Table};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MassChange {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl MassChange {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Capture `table`'s current state as a change (used for inverses).
    pub fn snapshot(table: &Table) -> Self {
        Self {
            columns: table.columns.columns.clone(),
            rows: table.rows.clone(),
        }
    }

    /// Every row must fit inside the cell slots its columns address.
    pub fn validate(&self) -> Result<()> {
        let width = schema::row_width(&self.columns);
        for (i, row) in self.rows.iter().enumerate() {
            if row.width() > width {
                return Err(Error::Invariant(format!(
                    "mass change row {} has {} cells but the columns address {}",
                    i,
                    row.width(),
                    width
                )));
            }
        }
        Ok(())
    }

    /// Swap this change into `table` and return the displaced state.
    pub fn apply(self, table: &mut Table) -> MassChange {
        let old_columns = std::mem::replace(&mut table.columns, ColumnModel::new(self.columns));
        let old_rows = std::mem::replace(&mut table.rows, self.rows);
        MassChange {
            columns: old_columns.columns,
            rows: old_rows,
        }
    }

    pub fn into_table(self) -> Table {
        Table::new(ColumnModel::new(self.columns), self.rows)
    }
}

impl From<Table> for MassChange {
    fn from(table: Table) -> Self {
        Self {
            columns: table.columns.columns,
            rows: table.rows,
        }
    }
}
