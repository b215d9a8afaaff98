#![forbid(unsafe_code)]
//! gridshape: wide-to-long reshape operations over a column/row table, with
//! an undoable history host.
//!
//! This crate only re-exports the workspace members so integration tests and
//! downstream users can depend on a single name.

pub use gridshape_core;
pub use gridshape_history;
pub use gridshape_io;
pub use gridshape_operators;

pub use gridshape_core::prelude::*;
pub use gridshape_history::{replay, Project};
pub use gridshape_operators::{Operation, Registry, TransposeColumnsIntoRows, TransposeConfig};
