//! Column layout after collapsing the transposed range into one column.

use gridshape_core::schema::Column;

use super::config::TransposeConfig;
use crate::plan::ColumnPlan;

/// Single left-to-right pass with a countdown of columns still to absorb.
///
/// Columns before the range and after it are copied through (name and original
/// header label kept, cell index renumbered). The first column named
/// `start_column_name` becomes the combined column; the next
/// `column_count - 1` columns disappear.
///
/// If no column matches, everything is copied through and
/// `start_column_index == old.len()`.
pub fn plan_columns(old: &[Column], config: &TransposeConfig) -> ColumnPlan {
    let mut columns: Vec<Column> = Vec::with_capacity(old.len());
    let mut left = config.column_count;
    let mut start_column_index = old.len();
    let mut absorbed = 0;

    for (c, column) in old.iter().enumerate() {
        if left == 0 {
            // after the range
            columns.push(column.moved_to(columns.len()));
        } else if left < config.column_count {
            // inside the range, not the first
            left -= 1;
            absorbed += 1;
        } else if column.name == config.start_column_name {
            start_column_index = c;
            let name = config.combined_name(&column.name);
            columns.push(Column::new(columns.len(), name));
            left -= 1;
            absorbed += 1;
        } else {
            // before the range
            columns.push(column.moved_to(columns.len()));
        }
    }

    ColumnPlan {
        columns,
        start_column_index,
        matched: start_column_index < old.len(),
        absorbed,
    }
}
