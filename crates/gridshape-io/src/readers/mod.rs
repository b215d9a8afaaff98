//! Readers that load a whole `Table` snapshot.

pub mod csv;
