#![forbid(unsafe_code)]
//! gridshape-operators: reshape operations over a `Table` snapshot.
//!
//! Design intent:
//! - Operations are pure and synchronous: immutable columns/rows in, a
//!   `MassChange` out. Applying that change (and undoing it) is the host's job.
//! - Each operation serializes to a flat parameter record tagged with `op`;
//!   `registry` turns such records back into operations through a closed
//!   `OpKind` table.

pub mod plan;
pub mod registry;
pub mod traits;
pub mod transpose;

pub use plan::ColumnPlan;
pub use registry::{OpKind, Registry};
pub use traits::{ConfigError, OpError, Operation};
pub use transpose::{TransposeColumnsIntoRows, TransposeConfig};
