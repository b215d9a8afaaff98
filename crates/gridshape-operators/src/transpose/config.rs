//! Typed parameters of the transpose operation.

use serde::{Deserialize, Deserializer, Serialize};

use crate::traits::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransposeConfig {
    pub start_column_name: String,

    pub column_count: usize,

    /// Empty means "reuse the start column's name".
    #[serde(default, deserialize_with = "null_as_empty")]
    pub combined_column_name: String,

    pub prepend_column_name: bool,

    pub separator: String,

    pub ignore_blank_cells: bool,
}

fn null_as_empty<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

impl TransposeConfig {
    /// Transpose `column_count` columns starting at `start_column_name`,
    /// keeping the start column's name, skipping blanks, no label prefix.
    pub fn new(start_column_name: impl Into<String>, column_count: usize) -> Self {
        Self {
            start_column_name: start_column_name.into(),
            column_count,
            combined_column_name: String::new(),
            prepend_column_name: false,
            separator: ":".to_string(),
            ignore_blank_cells: true,
        }
    }

    pub fn with_combined_column_name(mut self, name: impl Into<String>) -> Self {
        self.combined_column_name = name.into();
        self
    }

    /// Prefix every transposed value with its source column name and `separator`.
    pub fn with_prepended_column_name(mut self, separator: impl Into<String>) -> Self {
        self.prepend_column_name = true;
        self.separator = separator.into();
        self
    }

    pub fn with_ignore_blank_cells(mut self, ignore: bool) -> Self {
        self.ignore_blank_cells = ignore;
        self
    }

    /// Name of the combined column, given the matched start column's name.
    pub fn combined_name<'a>(&'a self, start_column: &'a str) -> &'a str {
        if self.combined_column_name.is_empty() {
            start_column
        } else {
            &self.combined_column_name
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "Transpose cells in {} column(s) starting with {} into rows",
            self.column_count, self.start_column_name
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.column_count == 0 {
            return Err(ConfigError::ZeroColumnCount);
        }
        Ok(())
    }
}
