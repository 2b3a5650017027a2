use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::Record;

/// Filter criteria handed to the search collaborator.
///
/// The dispatcher builds the base query, the search collaborator refines it
/// and runs it; the criteria themselves are opaque to this crate beyond
/// their ordered shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Query {
    pub conditions: IndexMap<String, Value>,
    /// Related-data names to eager-load.
    pub contain: Vec<String>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_condition(mut self, field: impl Into<String>, value: Value) -> Self {
        self.conditions.insert(field.into(), value);
        self
    }

    #[must_use]
    pub fn with_contain(mut self, contain: Vec<String>) -> Self {
        self.contain = contain;
        self
    }
}

/// Pagination configuration for an index query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub limit: u32,
    /// 1-based page number.
    pub page: u32,
    pub order_by: String,
    pub ascending: bool,
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Page {
    pub records: Vec<Record>,
    /// 1-based page number.
    pub page: u32,
    pub page_count: u32,
    pub total: u64,
}

impl Page {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}
