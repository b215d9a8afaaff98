//! Operation logs: a JSON array of parameter records, oldest first.
//!
//! Records are kept as raw `serde_json::Value`s; turning them back into
//! operations is the registry's job.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

pub fn read_records_path(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let f = File::open(path)?;
    read_records(BufReader::new(f))
}

/// Accepts either an array of records or a single bare record.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Value>> {
    let doc: Value = serde_json::from_reader(reader)?;
    let records = match doc {
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        other => {
            return Err(Error::Format(format!(
                "operation log must be a JSON array or object, found {}",
                json_kind(&other)
            )))
        }
    };
    if let Some((i, bad)) = records.iter().enumerate().find(|(_, r)| !r.is_object()) {
        return Err(Error::Format(format!(
            "operation log entry {} is a {}, expected an object",
            i,
            json_kind(bad)
        )));
    }
    Ok(records)
}

pub fn write_records_path(path: impl AsRef<Path>, records: &[Value]) -> Result<()> {
    let f = File::create(path)?;
    write_records(f, records)
}

pub fn write_records<W: Write>(writer: W, records: &[Value]) -> Result<()> {
    let mut w = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut w, records)?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_and_single_record() {
        let log = read_records(r#"[{"op":"a"},{"op":"b"}]"#.as_bytes()).unwrap();
        assert_eq!(log.len(), 2);

        let single = read_records(r#"{"op":"a"}"#.as_bytes()).unwrap();
        assert_eq!(single, vec![json!({"op": "a"})]);
    }

    #[test]
    fn rejects_non_object_entries() {
        assert!(matches!(read_records("3".as_bytes()), Err(Error::Format(_))));
        assert!(matches!(
            read_records(r#"[{"op":"a"}, "b"]"#.as_bytes()),
            Err(Error::Format(_))
        ));
        assert!(matches!(read_records("[".as_bytes()), Err(Error::Json(_))));
    }

    #[test]
    fn write_then_read() {
        let records = vec![json!({"op": "x", "columnCount": 2}), json!({"op": "y"})];
        let mut out = Vec::new();
        write_records(&mut out, &records).unwrap();
        assert_eq!(read_records(out.as_slice()).unwrap(), records);
    }
}
