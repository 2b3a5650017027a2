use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fully-populated presentation options for a single field.
///
/// Every mapped field carries the complete record: context defaults with any
/// caller overrides merged on top. Options beyond the known flags land in
/// the `extra` bag so renderers can carry custom knobs per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldOptions {
    /// Hide the field from the rendered output.
    pub hide: bool,
    /// Render via a getter/formatter instead of the raw value.
    pub get: bool,
    /// Content injected before the field value.
    pub before: String,
    /// Content injected after the field value.
    pub after: String,
    /// Any further options the caller supplied.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl FieldOptions {
    /// Context defaults for list/table rendering.
    #[must_use]
    pub fn list_defaults() -> Self {
        Self {
            hide: false,
            get: false,
            before: String::new(),
            after: String::new(),
            extra: IndexMap::new(),
        }
    }

    /// Context defaults for form rendering: an empty option set.
    #[must_use]
    pub fn form_defaults() -> Self {
        Self::default()
    }

    /// Shallow-merge `overrides` on top of these options; supplied keys win.
    #[must_use]
    pub fn merged(&self, overrides: &FieldOverrides) -> Self {
        let mut out = self.clone();
        if let Some(hide) = overrides.hide {
            out.hide = hide;
        }
        if let Some(get) = overrides.get {
            out.get = get;
        }
        if let Some(before) = &overrides.before {
            out.before = before.clone();
        }
        if let Some(after) = &overrides.after {
            out.after = after.clone();
        }
        for (key, value) in &overrides.extra {
            out.extra.insert(key.clone(), value.clone());
        }
        out
    }
}

/// Per-field option overrides as supplied by the caller.
///
/// Absent keys fall back to the context defaults during mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl FieldOverrides {
    #[must_use]
    pub fn with_hide(mut self, hide: bool) -> Self {
        self.hide = Some(hide);
        self
    }

    #[must_use]
    pub fn with_get(mut self, get: bool) -> Self {
        self.get = Some(get);
        self
    }

    #[must_use]
    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    #[must_use]
    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// One element of a caller-supplied field list.
///
/// Deserializes from the two shapes declaration files use:
///
/// ```yaml
/// - title
/// - body: { hide: true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSpec {
    /// A bare field name; options come entirely from the context defaults.
    Name(String),
    /// Field names with per-field option overrides, in declaration order.
    Configured(Box<IndexMap<String, FieldOverrides>>),
}

impl FieldSpec {
    /// A bare field taking the context defaults.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// A field with option overrides.
    #[must_use]
    pub fn with(name: impl Into<String>, overrides: FieldOverrides) -> Self {
        let mut entries = IndexMap::new();
        entries.insert(name.into(), overrides);
        Self::Configured(Box::new(entries))
    }
}
