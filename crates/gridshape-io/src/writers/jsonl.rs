//! NDJSON writer: one JSON object per row, keys in column-model order.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};
use gridshape_core::schema::Column;
use gridshape_core::types::{Row, Scalar, Table};

pub struct JsonlWriter<W: Write> {
    writer: BufWriter<W>,
}

impl JsonlWriter<File> {
    pub fn to_path(path: impl AsRef<Path>) -> Result<Self> {
        let f = File::create(path)?;
        Ok(Self::to_writer(f))
    }
}

impl<W: Write> JsonlWriter<W> {
    pub fn to_writer(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Blank cells (and cells past a short row's end) are written as `null`.
    ///
    /// Column names become object keys, so a table with two columns of the
    /// same name is rejected before anything is written.
    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        let mut seen = HashSet::new();
        if let Some(dup) = table.columns.columns.iter().find(|c| !seen.insert(c.name.as_str())) {
            return Err(Error::Format(format!(
                "duplicate column name '{}' cannot be written as JSON keys",
                dup.name
            )));
        }

        for row in &table.rows {
            let obj = RowObject {
                columns: &table.columns.columns,
                row,
            };
            let line = serde_json::to_string(&obj)?;
            writeln!(self.writer, "{}", line)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

struct RowObject<'a> {
    columns: &'a [Column],
    row: &'a Row,
}

impl Serialize for RowObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for col in self.columns {
            let val = self
                .row
                .value(col.cell_index)
                .map_or(serde_json::Value::Null, scalar_to_json);
            map.serialize_entry(&col.name, &val)?;
        }
        map.end()
    }
}

fn scalar_to_json(v: &Scalar) -> serde_json::Value {
    use Scalar::*;
    match v {
        Bool(b) => serde_json::Value::Bool(*b),
        Int(i) => serde_json::Value::from(*i),
        // non-finite floats become null
        Float(f) => serde_json::Value::from(*f),
        Str(s) => serde_json::Value::String(s.clone()),
    }
}
