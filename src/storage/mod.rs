//! The persistence boundary.
//!
//! Storage is an external collaborator: the dispatcher only ever talks to
//! the [`Storage`] trait, resolved per request from the active type's model
//! ref through a [`ModelSource`]. Records travel as ordered field maps with
//! embedded validation state; a failed save is `Ok(false)` with the errors
//! written into the record, never a hard failure.

mod query;
mod record;

pub use query::{Page, PageRequest, Query};
pub use record::Record;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::fields::FieldSpec;
use crate::hooks::RequestContext;
use crate::request::DataMap;

/// Failures surfaced by a storage collaborator.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Record not found: {0}")]
    RecordNotFound(String),
    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// Optional capability a backing model implements to hook the lifecycle.
///
/// Presence is discovered through [`Storage::field_hooks`]; a model that
/// returns `None` simply has no hooks. Configured callback points without
/// the capability are skipped.
pub trait FieldHooks: Send + Sync {
    /// Early in request setup, before authorization and the operation body.
    fn before_filter(&self, _ctx: &mut RequestContext) {}

    /// Supply the list/table field specs when the type leaves them unset.
    fn table_fields(&self, _ctx: &RequestContext) -> Option<Vec<FieldSpec>> {
        None
    }

    /// Supply the form field specs when the type leaves them unset.
    fn form_fields(&self, _ctx: &RequestContext) -> Option<Vec<FieldSpec>> {
        None
    }
}

/// One backing collection.
#[async_trait]
pub trait Storage: Send + Sync {
    /// The collection name, for logging and ordering.
    fn name(&self) -> &str;

    /// Primary key column, the default index ordering.
    fn primary_key(&self) -> &str {
        "id"
    }

    /// Base query over the whole collection.
    async fn find(&self) -> Result<Query, StorageError>;

    /// Fetch exactly one record by id, eager-loading `contain`.
    async fn get(&self, id: &str, contain: &[String]) -> Result<Record, StorageError>;

    /// Construct a new, unsaved record, optionally from submitted data.
    fn new_record(&self, data: Option<&DataMap>) -> Record;

    /// Apply submitted data onto a fetched record.
    fn patch(&self, record: &mut Record, data: &DataMap);

    /// Persist the record. `Ok(false)` means validation rejected it; the
    /// errors are written into the record and the caller degrades to a
    /// re-display. `Err` is an infrastructure failure.
    async fn save(&self, record: &mut Record) -> Result<bool, StorageError>;

    /// Remove the record. `Ok(false)` means the backend declined.
    async fn delete(&self, record: &Record) -> Result<bool, StorageError>;

    /// Ordered column names of the backing collection.
    async fn columns(&self) -> Result<Vec<String>, StorageError>;

    /// The model's lifecycle capability, if it implements one.
    fn field_hooks(&self) -> Option<&dyn FieldHooks> {
        None
    }
}

/// Resolves a type's model ref to its storage collaborator.
pub trait ModelSource: Send + Sync {
    fn model(&self, name: &str) -> Option<Arc<dyn Storage>>;
}
