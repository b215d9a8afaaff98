//! Table writers.

pub mod csv;
pub mod jsonl;
