//! Column planning surface shared by reshape operations.

use gridshape_core::schema::Column;
use serde::{Deserialize, Serialize};

/// New column layout plus where the reshaped range sat in the old layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPlan {
    pub columns: Vec<Column>,

    /// Position of the first reshaped column in the *old* layout. Equals the
    /// old column count when no start column was found.
    pub start_column_index: usize,

    /// Whether the start column was found at all.
    pub matched: bool,

    /// Old columns actually folded into the combined column. Smaller than the
    /// requested count when the range runs off the end.
    pub absorbed: usize,
}

impl ColumnPlan {
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
