//! Project: the live table plus its history.
//!
//! Operations are applied one at a time through `&mut self`; the core never
//! sees the live table, only the snapshot passed to `create_change`.

use thiserror::Error;

use gridshape_core::change::MassChange;
use gridshape_core::config::EngineConfig;
use gridshape_core::id::HistoryEntryId;
use gridshape_core::manifest::EntryManifest;
use gridshape_core::types::Table;

use gridshape_operators::registry::Registry;
use gridshape_operators::traits::{OpError, Operation};

use crate::history::{History, HistoryEntry};
use crate::metrics::emit_span;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("operation: {0}")]
    Operation(#[from] OpError),
    #[error("manifest: {0}")]
    Manifest(String),
    #[error("invalid table: {0}")]
    Table(String),
}

impl From<gridshape_core::error::Error> for HistoryError {
    fn from(e: gridshape_core::error::Error) -> Self {
        HistoryError::Manifest(e.to_string())
    }
}

#[derive(Debug)]
pub struct Project {
    table: Table,
    history: History,
    registry: Registry,
}

impl Project {
    /// Fails if `table` holds rows wider than its column model addresses.
    pub fn new(table: Table, cfg: &EngineConfig) -> Result<Self, HistoryError> {
        table
            .validate()
            .map_err(|e| HistoryError::Table(e.to_string()))?;
        Ok(Self {
            table,
            history: History::with_max_size(cfg.history_limit),
            registry: Registry::new(cfg.transform_policy()),
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Apply `op` to the current table and record it.
    ///
    /// On error the table and history are left exactly as they were.
    pub fn apply_operation(&mut self, op: &dyn Operation) -> Result<HistoryEntryId, HistoryError> {
        let record = op.to_record()?;
        let (description, change) = op.create_change(&self.table)?;

        let next = change.into_table();
        let id = self.history.next_id();
        let manifest = EntryManifest::new(id, &record, &self.table, &next)?;

        let previous = std::mem::replace(&mut self.table, next);
        emit_span(
            "apply",
            &[
                ("entry", id.to_string()),
                ("description", description.clone()),
                ("rows", self.table.num_rows().to_string()),
                ("columns", self.table.num_columns().to_string()),
            ],
        );
        self.history.push(HistoryEntry::new(
            id,
            description,
            record,
            manifest,
            MassChange::from(previous),
        ));
        Ok(id)
    }

    /// Reconstruct an operation from its persisted record and apply it.
    pub fn apply_record(&mut self, record: &serde_json::Value) -> Result<HistoryEntryId, HistoryError> {
        let op = self.registry.reconstruct(record)?;
        self.apply_operation(op.as_ref())
    }

    /// Revert the most recent applied entry. `None` if there is nothing to undo.
    pub fn undo(&mut self) -> Option<HistoryEntryId> {
        let mut entry = self.history.pop_undo()?;
        let before = std::mem::take(&mut entry.saved);
        entry.saved = before.apply(&mut self.table);
        let id = entry.id;
        emit_span("undo", &[("entry", id.to_string())]);
        self.history.push_redo(entry);
        Some(id)
    }

    /// Re-apply the most recently undone entry. `None` if there is nothing to redo.
    pub fn redo(&mut self) -> Option<HistoryEntryId> {
        let mut entry = self.history.pop_redo()?;
        let after = std::mem::take(&mut entry.saved);
        entry.saved = after.apply(&mut self.table);
        let id = entry.id;
        emit_span("redo", &[("entry", id.to_string())]);
        self.history.push_undo_for_redo(entry);
        Some(id)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.history.undo_description()
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.history.redo_description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridshape_core::config::UnmatchedStartPolicy;
    use gridshape_core::types::Scalar;
    use gridshape_operators::{TransposeColumnsIntoRows, TransposeConfig};
    use serde_json::json;

    fn table() -> Table {
        Table::from_values(
            ["ID", "Q1", "Q2"],
            vec![
                vec![Some("A".into()), Some(Scalar::Int(1)), Some(Scalar::Int(2))],
                vec![Some("B".into()), None, Some(Scalar::Int(4))],
            ],
        )
    }

    fn transpose() -> TransposeColumnsIntoRows {
        TransposeColumnsIntoRows::new(TransposeConfig::new("Q1", 2).with_combined_column_name("Q"))
    }

    #[test]
    fn undo_restores_and_redo_reapplies() {
        let original = table();
        let mut project = Project::new(original.clone(), &EngineConfig::default()).unwrap();

        let id = project.apply_operation(&transpose()).unwrap();
        let transposed = project.table().clone();
        assert_eq!(transposed.columns.names(), vec!["ID", "Q"]);
        assert_eq!(transposed.num_rows(), 3);
        assert_eq!(
            project.undo_description(),
            Some("Transpose cells in 2 column(s) starting with Q1 into rows")
        );

        assert_eq!(project.undo(), Some(id));
        assert_eq!(project.table(), &original);
        assert!(project.can_redo());

        assert_eq!(project.redo(), Some(id));
        assert_eq!(project.table(), &transposed);
        assert!(!project.can_redo());
    }

    #[test]
    fn overwide_table_is_rejected() {
        let mut t = table();
        t.rows[0].cells.push(gridshape_core::types::Cell::new(9));
        assert!(matches!(
            Project::new(t, &EngineConfig::default()),
            Err(HistoryError::Table(_))
        ));
    }

    #[test]
    fn nothing_to_undo_or_redo() {
        let mut project = Project::new(table(), &EngineConfig::default()).unwrap();
        assert_eq!(project.undo(), None);
        assert_eq!(project.redo(), None);
    }

    #[test]
    fn failed_operation_leaves_project_untouched() {
        let original = table();
        let mut project = Project::new(original.clone(), &EngineConfig::default()).unwrap();
        let op = TransposeColumnsIntoRows::new(TransposeConfig::new("nope", 2));

        assert!(matches!(
            project.apply_operation(&op),
            Err(HistoryError::Operation(OpError::Config(_)))
        ));
        assert_eq!(project.table(), &original);
        assert!(!project.can_undo());
    }

    #[test]
    fn apply_record_uses_configured_policy() {
        let cfg = EngineConfig {
            unmatched_start: UnmatchedStartPolicy::NoOp,
            ..EngineConfig::default()
        };
        let original = table();
        let mut project = Project::new(original.clone(), &cfg).unwrap();
        let record = json!({
            "op": "transpose-columns-into-rows",
            "startColumnName": "missing",
            "columnCount": 2,
            "combinedColumnName": "",
            "prependColumnName": false,
            "separator": ":",
            "ignoreBlankCells": true
        });

        project.apply_record(&record).unwrap();
        assert_eq!(project.table(), &original);
        assert!(project.can_undo());
    }

    #[test]
    fn manifest_links_before_and_after() {
        let mut project = Project::new(table(), &EngineConfig::default()).unwrap();
        project.apply_operation(&transpose()).unwrap();
        project
            .apply_operation(&TransposeColumnsIntoRows::new(TransposeConfig::new("ID", 1)))
            .unwrap();

        let manifests: Vec<_> = project.history().manifests().collect();
        assert_eq!(manifests.len(), 2);
        assert_eq!(manifests[0].after, manifests[1].before);
    }
}
