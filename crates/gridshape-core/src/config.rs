//! Engine configuration that downstream crates can serialize/deserialize.
//!
//! Operation parameters travel in persisted records and must stay
//! field-for-field compatible, so the knobs that decide how lenient an
//! operation is live here instead and are handed to operations as a
//! `TransformPolicy` snapshot.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// What to do when an operation names a start column the table does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedStartPolicy {
    /// Fail with a configuration error before any data is touched.
    #[default]
    Reject,
    /// Legacy behavior: leave columns and rows unchanged.
    NoOp,
}

impl FromStr for UnmatchedStartPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" | "strict" => Ok(Self::Reject),
            "noop" | "no-op" | "legacy" => Ok(Self::NoOp),
            other => Err(Error::Config(format!(
                "unknown unmatched-start policy '{}'",
                other
            ))),
        }
    }
}

/// What to do when a column range runs past the last column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnOverflowPolicy {
    /// Legacy behavior: the range silently stops at the last column.
    #[default]
    Truncate,
    /// Fail with a configuration error.
    Reject,
}

impl FromStr for ColumnOverflowPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truncate" | "legacy" => Ok(Self::Truncate),
            "reject" | "strict" => Ok(Self::Reject),
            other => Err(Error::Config(format!(
                "unknown column-overflow policy '{}'",
                other
            ))),
        }
    }
}

/// Policy snapshot handed to operations when they are reconstructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransformPolicy {
    pub unmatched_start: UnmatchedStartPolicy,
    pub column_overflow: ColumnOverflowPolicy,
}

impl TransformPolicy {
    /// The behavior persisted operation histories were recorded under.
    pub fn legacy() -> Self {
        Self {
            unmatched_start: UnmatchedStartPolicy::NoOp,
            column_overflow: ColumnOverflowPolicy::Truncate,
        }
    }

    /// Fail on every questionable configuration.
    pub fn strict() -> Self {
        Self {
            unmatched_start: UnmatchedStartPolicy::Reject,
            column_overflow: ColumnOverflowPolicy::Reject,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub unmatched_start: UnmatchedStartPolicy,

    pub column_overflow: ColumnOverflowPolicy,

    /// Maximum number of undoable entries kept; the oldest are evicted first.
    pub history_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unmatched_start: UnmatchedStartPolicy::default(),
            column_overflow: ColumnOverflowPolicy::default(),
            history_limit: 100,
        }
    }
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `GRIDSHAPE_UNMATCHED_START`: `reject` or `noop`
    /// - `GRIDSHAPE_COLUMN_OVERFLOW`: `truncate` or `reject`
    /// - `GRIDSHAPE_HISTORY_LIMIT`: number of undoable entries
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(s) = lookup("GRIDSHAPE_UNMATCHED_START") {
            if let Ok(v) = s.parse() {
                cfg.unmatched_start = v;
            }
        }

        if let Some(s) = lookup("GRIDSHAPE_COLUMN_OVERFLOW") {
            if let Ok(v) = s.parse() {
                cfg.column_overflow = v;
            }
        }

        if let Some(s) = lookup("GRIDSHAPE_HISTORY_LIMIT") {
            if let Ok(v) = s.trim().parse::<usize>() {
                cfg.history_limit = v;
            }
        }

        cfg
    }

    /// Produce the policy snapshot operations are reconstructed with.
    pub fn transform_policy(&self) -> TransformPolicy {
        TransformPolicy {
            unmatched_start: self.unmatched_start,
            column_overflow: self.column_overflow,
        }
    }
}
