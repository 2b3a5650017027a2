//! The navigation boundary.
//!
//! Registering a type with `menu: true` asks this collaborator for a
//! navigation entry. Only admin-scoped registries emit entries; everything
//! else is a no-op.

use serde::{Deserialize, Serialize};

use crate::hooks::Operation;

/// Where a navigation entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuTarget {
    /// Routing scope of the entry, e.g. `"admin"`.
    pub prefix: String,
    pub operation: Operation,
    /// Canonical name of the type the entry opens.
    pub type_name: String,
}

/// External navigation registration.
pub trait Menu: Send + Sync {
    fn add(&self, label: &str, target: &MenuTarget);
}
