use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields::{FieldMap, FieldSpec};
use crate::hooks::{CallbackPoint, Operation};

/// Per-operation view template overrides.
///
/// An unset or empty entry falls back to the process-wide default template
/// for that operation; delete never renders and has no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<String>,
}

impl ViewOverrides {
    /// The non-empty override for `operation`, if one is configured.
    #[must_use]
    pub fn for_operation(&self, operation: Operation) -> Option<&str> {
        let entry = match operation {
            Operation::Index => self.index.as_deref(),
            Operation::View => self.view.as_deref(),
            Operation::Add => self.add.as_deref(),
            Operation::Edit => self.edit.as_deref(),
            Operation::Delete => None,
        };
        entry.filter(|template| !template.is_empty())
    }
}

/// One registered content type.
///
/// Created at registration, immutable thereafter; requests work on their
/// own copy so lazy field derivation never writes back into the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    /// Canonical name: the registry key.
    pub name: String,
    /// Backing storage collection ref, resolved through a model source.
    pub model: String,
    /// Presentation identifier, defaults to the raw registration name.
    pub alias: String,
    pub display_name: String,
    /// Singular form of the canonical name, derived once at registration.
    pub singular: String,
    /// Whether a navigation entry was requested for this type.
    pub menu: bool,
    /// Related-data names to eager-load on fetch, in order.
    pub contain: Vec<String>,
    /// `None` = derive lazily from the backing model at first use.
    pub table_fields: Option<FieldMap>,
    /// `None` = derive lazily from the backing model at first use.
    pub form_fields: Option<FieldMap>,
    /// Named index filters, applied in declaration order.
    pub filters: IndexMap<String, Value>,
    pub views: ViewOverrides,
    /// Lifecycle points at which the backing model's callback capability is
    /// consulted, with a label per point for logs.
    pub callbacks: IndexMap<CallbackPoint, String>,
    /// Consulted by external routing to decide API exposure.
    pub api: bool,
}

impl TypeDefinition {
    #[must_use]
    pub fn api_allowed(&self) -> bool {
        self.api
    }

    /// Whether the model callback at `point` is enabled for this type.
    #[must_use]
    pub fn callback_enabled(&self, point: CallbackPoint) -> bool {
        self.callbacks.contains_key(&point)
    }
}

/// Caller-supplied registration options; every field optional, merged over
/// the registry defaults with the caller winning on conflicts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeOptions {
    pub menu: Option<bool>,
    pub model: Option<String>,
    pub contain: Option<Vec<String>>,
    pub table_fields: Option<Vec<FieldSpec>>,
    pub form_fields: Option<Vec<FieldSpec>>,
    pub alias: Option<String>,
    pub display_name: Option<String>,
    pub singular: Option<String>,
    pub filters: Option<IndexMap<String, Value>>,
    pub views: Option<ViewOverrides>,
    pub callbacks: Option<IndexMap<CallbackPoint, String>>,
    pub api: Option<bool>,
}

impl TypeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_menu(mut self, menu: bool) -> Self {
        self.menu = Some(menu);
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn with_contain(mut self, contain: Vec<String>) -> Self {
        self.contain = Some(contain);
        self
    }

    #[must_use]
    pub fn with_table_fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.table_fields = Some(fields);
        self
    }

    #[must_use]
    pub fn with_form_fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.form_fields = Some(fields);
        self
    }

    #[must_use]
    pub fn with_filter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.filters
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_views(mut self, views: ViewOverrides) -> Self {
        self.views = Some(views);
        self
    }

    #[must_use]
    pub fn with_callback(mut self, point: CallbackPoint, label: impl Into<String>) -> Self {
        self.callbacks
            .get_or_insert_with(IndexMap::new)
            .insert(point, label.into());
        self
    }

    #[must_use]
    pub fn with_api(mut self, api: bool) -> Self {
        self.api = Some(api);
        self
    }
}
