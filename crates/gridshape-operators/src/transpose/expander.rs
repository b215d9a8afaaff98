//! Wide rows -> narrow rows.

use gridshape_core::schema::Column;
use gridshape_core::types::{Cell, Row};

use super::config::TransposeConfig;
use crate::plan::ColumnPlan;

/// Expand every old row into one or more rows of `plan.width()` cells.
///
/// The first output row of a source row carries all non-transposed cells plus
/// the first surviving transposed cell. Each further surviving transposed cell
/// gets a row of its own that is blank except for the combined column. A source
/// row always yields its first output row, even when every transposed cell was
/// skipped.
pub fn expand_rows(
    old_rows: &[Row],
    old_columns: &[Column],
    plan: &ColumnPlan,
    config: &TransposeConfig,
) -> Vec<Row> {
    let width = plan.width();
    let start = plan.start_column_index;
    let end = start.saturating_add(config.column_count);

    let mut out = Vec::with_capacity(old_rows.len());
    for old_row in old_rows {
        let mut first = Row::new(width);
        let mut extra = Vec::new();
        let mut transposed_cells = 0usize;

        for (c, column) in old_columns.iter().enumerate() {
            let cell = old_row.cell(column.cell_index);

            if c < start {
                first.set_cell(c, cell.cloned().unwrap_or_default());
            } else if c < end {
                let Some(new_cell) = transpose_cell(column, cell, config) else {
                    continue;
                };
                if transposed_cells == 0 {
                    first.set_cell(start, new_cell);
                } else {
                    let mut row = Row::new(width);
                    row.set_cell(start, new_cell);
                    extra.push(row);
                }
                transposed_cells += 1;
            } else {
                first.set_cell(c - config.column_count + 1, cell.cloned().unwrap_or_default());
            }
        }

        out.push(first);
        out.append(&mut extra);
    }
    out
}

/// The cell a transposed source cell turns into, or `None` to drop it.
///
/// Synthesized (prefixed) cells start without metadata; cells passed through
/// as-is keep theirs.
fn transpose_cell(column: &Column, cell: Option<&Cell>, config: &TransposeConfig) -> Option<Cell> {
    match cell.and_then(|c| c.value.as_ref()) {
        None if config.prepend_column_name && !config.ignore_blank_cells => {
            Some(Cell::new(format!("{}{}", column.name, config.separator)))
        }
        None => None,
        Some(v) if config.prepend_column_name => Some(Cell::new(format!(
            "{}{}{}",
            column.name, config.separator, v
        ))),
        Some(_) => cell.cloned(),
    }
}
