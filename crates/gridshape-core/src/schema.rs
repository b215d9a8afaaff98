//! Column definitions. Pure data; rows live in `types.rs`.
//!
//! A column's position in the `ColumnModel` and its `cell_index` (the slot rows
//! store its cells in) are distinct: a model can be reordered without touching
//! rows. Operations that rebuild the model assign `cell_index == position`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub cell_index: usize,
    pub name: String,
    /// Header label the column was created with; survives renames.
    pub original_name: String,
}

impl Column {
    pub fn new(cell_index: usize, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            cell_index,
            original_name: name.clone(),
            name,
        }
    }

    /// Copy of this column placed at `cell_index`, keeping both its current
    /// name and its original header label.
    pub fn moved_to(&self, cell_index: usize) -> Self {
        Self {
            cell_index,
            name: self.name.clone(),
            original_name: self.original_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnModel {
    pub columns: Vec<Column>,
}

impl ColumnModel {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Build a model whose cell indices follow the order of `names`.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: names
                .into_iter()
                .enumerate()
                .map(|(i, n)| Column::new(i, n))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, idx: usize) -> Option<&Column> {
        self.columns.get(idx)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of cell slots a row needs to hold every column of this model.
    pub fn row_width(&self) -> usize {
        row_width(&self.columns)
    }
}

/// Cells a row needs so every column in `columns` can address its slot.
pub fn row_width(columns: &[Column]) -> usize {
    columns
        .iter()
        .map(|c| c.cell_index + 1)
        .max()
        .unwrap_or(0)
}
