//! Cell/row/table values.
//!
//! A blank cell is `Cell { value: None, .. }`. That is a different state from a
//! cell holding `Scalar::Str(String::new())`, and operations rely on telling
//! the two apart.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::ColumnModel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            // Integral floats print without a fractional part.
            Scalar::Float(x) if x.fract() == 0.0 && x.abs() < 1e15 => write!(f, "{:.0}", x),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v as i64)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

/// One value slot. `meta` is opaque to gridshape (reconciliation data,
/// provenance, ...) and is carried along whenever the cell itself is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl Cell {
    pub fn new(value: impl Into<Scalar>) -> Self {
        Self {
            value: Some(value.into()),
            meta: None,
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn is_blank(&self) -> bool {
        self.value.is_none()
    }
}

impl From<Option<Scalar>> for Cell {
    fn from(value: Option<Scalar>) -> Self {
        Self { value, meta: None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    /// A row of `width` blank cells.
    pub fn new(width: usize) -> Self {
        Self {
            cells: vec![Cell::blank(); width],
        }
    }

    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Cell at `idx`; `None` past the end of the row.
    pub fn cell(&self, idx: usize) -> Option<&Cell> {
        self.cells.get(idx)
    }

    /// Value at `idx`; `None` for blank cells and past the end of the row.
    pub fn value(&self, idx: usize) -> Option<&Scalar> {
        self.cell(idx).and_then(|c| c.value.as_ref())
    }

    /// Store `cell` at `idx`, padding with blanks if the row is too short.
    pub fn set_cell(&mut self, idx: usize, cell: Cell) {
        if idx >= self.cells.len() {
            self.cells.resize(idx + 1, Cell::blank());
        }
        self.cells[idx] = cell;
    }
}

/// The host's column/row state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: ColumnModel,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: ColumnModel, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Build a table from plain values, one `Option<Scalar>` per column.
    pub fn from_values<I, S>(names: I, rows: Vec<Vec<Option<Scalar>>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: ColumnModel::from_names(names),
            rows: rows
                .into_iter()
                .map(|r| Row::from_cells(r.into_iter().map(Cell::from).collect()))
                .collect(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Values of column `name` in row order, or `None` if there is no such column.
    pub fn column_values(&self, name: &str) -> Option<Vec<Option<&Scalar>>> {
        let idx = self.columns.index_of(name)?;
        let cell_index = self.columns.columns[idx].cell_index;
        Some(self.rows.iter().map(|r| r.value(cell_index)).collect())
    }

    /// Reject rows holding cells no column can address.
    pub fn validate(&self) -> Result<()> {
        let width = self.columns.row_width();
        if let Some((i, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.width() > width)
        {
            return Err(Error::Schema(format!(
                "row {} has {} cells but the column model addresses {}",
                i,
                row.width(),
                width
            )));
        }
        Ok(())
    }
}
