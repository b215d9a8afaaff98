//! CSV -> `Table`.
//!
//! The header row names the columns. Empty fields become blank cells; there is
//! no way to spell a present empty string in CSV.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use gridshape_core::schema::ColumnModel;
use gridshape_core::types::{Cell, Row, Scalar, Table};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Parse integers, floats and `true`/`false`; otherwise every value is a string.
    pub infer_types: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            infer_types: true,
        }
    }
}

pub struct CsvReader;

impl CsvReader {
    pub fn read_path(path: impl AsRef<Path>, opts: CsvOptions) -> Result<Table> {
        let f = File::open(path)?;
        Self::read_table(f, opts)
    }

    pub fn read_table<R: Read>(reader: R, opts: CsvOptions) -> Result<Table> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(opts.delimiter)
            .flexible(true)
            .from_reader(reader);

        let columns = ColumnModel::from_names(rdr.headers()?.iter());

        let mut rows = Vec::new();
        for record in rdr.records() {
            let cells = record?
                .iter()
                .map(|field| Cell::from(parse_field(field, opts.infer_types)))
                .collect();
            rows.push(Row::from_cells(cells));
        }

        // records longer than the header have nowhere to go
        let table = Table::new(columns, rows);
        table
            .validate()
            .map_err(|e| Error::Format(e.to_string()))?;
        Ok(table)
    }
}

fn parse_field(field: &str, infer_types: bool) -> Option<Scalar> {
    if field.is_empty() {
        return None;
    }
    if !infer_types {
        return Some(Scalar::Str(field.to_string()));
    }
    if let Ok(i) = field.parse::<i64>() {
        return Some(Scalar::Int(i));
    }
    if looks_numeric(field) {
        if let Ok(f) = field.parse::<f64>() {
            return Some(Scalar::Float(f));
        }
    }
    match field {
        "true" => Some(Scalar::Bool(true)),
        "false" => Some(Scalar::Bool(false)),
        _ => Some(Scalar::Str(field.to_string())),
    }
}

/// Keeps `inf`, `NaN` and friends as strings.
fn looks_numeric(field: &str) -> bool {
    field
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}
