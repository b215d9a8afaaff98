#![forbid(unsafe_code)]
//! gridshape-io: moving tables and operation logs in and out of files.
//!
//! - `readers::csv`: header row + records -> `Table`.
//! - `writers::{csv, jsonl}`: `Table` -> CSV / one JSON object per row.
//! - `oplog`: persisted operation history (a JSON array of parameter records).
//!
//! Nothing here knows about operations beyond "a record is a JSON object".

pub mod error;
pub mod oplog;
pub mod readers;
pub mod writers;

pub use error::{Error as IoError, Result};
pub use readers::csv::{CsvOptions, CsvReader};
pub use writers::csv::CsvWriter;
pub use writers::jsonl::JsonlWriter;
