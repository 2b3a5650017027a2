//! The search/filter boundary.
//!
//! Query refinement and pagination live outside this crate: the dispatcher
//! hands the base query plus the type's configured filters to a [`Search`]
//! collaborator and receives a page of results back. Filter semantics are
//! the collaborator's business; only the ordered handoff is specified here.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;

use crate::storage::{Page, PageRequest, Query, StorageError};

/// External query refinement and pagination.
#[async_trait]
pub trait Search: Send + Sync {
    /// Apply the named filters to the base query, in map order.
    fn filter(&self, query: Query, filters: &IndexMap<String, Value>) -> Query;

    /// Execute the query and return the requested page.
    async fn paginate(&self, query: Query, page: PageRequest) -> Result<Page, StorageError>;
}
