//! Execution boundary: the engine that runs resolved queries.
//!
//! The core never executes anything itself; it hands a [`ResolvedQuery`] to
//! a [`QueryExecutor`] and consumes the tabular result. `Ok(None)` means
//! "no result" - not necessarily an error - and must propagate as absent
//! through every layer above.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::types::DataType;
use crate::translate::ResolvedQuery;

/// One column descriptor of a tabular result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultColumn {
    pub name: String,
    pub data_type: DataType,
    /// Locale-keyed display labels, resolved by the encoders.
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

impl ResultColumn {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            labels: HashMap::new(),
        }
    }

    pub fn with_label(mut self, locale: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(locale.into(), label.into());
        self
    }
}

/// Tabular query result: ordered column descriptors plus row-major cells.
/// Cells are loosely typed (string, number, bool, null).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabularResult {
    pub columns: Vec<ResultColumn>,
    pub rows: Vec<Vec<Value>>,
}

impl TabularResult {
    pub fn new(columns: Vec<ResultColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }
}

/// Execution failure reported by the engine.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Query execution failed: {0}")]
pub struct ExecuteError(pub String);

/// The external execution engine.
pub trait QueryExecutor {
    /// Run a resolved query, optionally capped at `row_limit` rows.
    ///
    /// `Ok(None)` signals "no result"; callers convert it into a
    /// caller-visible "no data" response rather than an error.
    fn execute(
        &self,
        query: &ResolvedQuery<'_>,
        row_limit: Option<u32>,
    ) -> Result<Option<TabularResult>, ExecuteError>;
}
