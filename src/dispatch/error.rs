use thiserror::Error;

use crate::hooks::Operation;
use crate::request::Method;
use crate::storage::StorageError;

/// Structural request failures.
///
/// Every variant aborts the whole request before any further hook fires;
/// the boundary layer turns them into error responses. Validation failure
/// is deliberately absent: a rejected save degrades to a re-display and
/// never reaches this type.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Content type not found: {0}")]
    TypeNotFound(String),
    #[error("No storage model registered for: {0}")]
    ModelNotFound(String),
    #[error("Record not found: {0}")]
    RecordNotFound(String),
    #[error("Method {method} not allowed for {operation}")]
    MethodNotAllowed { operation: Operation, method: Method },
    #[error("Authorization denied for {operation} on {type_name}")]
    AuthorizationDenied {
        type_name: String,
        operation: Operation,
    },
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl From<StorageError> for DispatchError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::RecordNotFound(id) => DispatchError::RecordNotFound(id),
            StorageError::Backend(message) => DispatchError::Storage(message),
        }
    }
}
