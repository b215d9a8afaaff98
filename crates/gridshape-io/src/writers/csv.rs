//! `Table` -> CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use gridshape_core::types::Table;

use crate::error::Result;

pub struct CsvWriter;

impl CsvWriter {
    pub fn write_path(path: impl AsRef<Path>, table: &Table, delimiter: u8) -> Result<()> {
        let f = File::create(path)?;
        Self::write_table(f, table, delimiter)
    }

    /// Columns are written in model order. Blank cells are empty fields, so a
    /// present empty string does not survive the trip.
    pub fn write_table<W: Write>(writer: W, table: &Table, delimiter: u8) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);

        wtr.write_record(table.columns.names())?;
        for row in &table.rows {
            let fields = table.columns.columns.iter().map(|col| {
                row.value(col.cell_index)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            });
            wtr.write_record(fields)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
