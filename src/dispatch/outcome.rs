use indexmap::IndexMap;
use serde_json::Value;

use crate::hooks::Operation;
use crate::registry::TypeDefinition;
use crate::storage::{Page, Record};

/// Everything the boundary needs to render a template.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderData {
    /// Resolved template identifier: the type's override or the
    /// process-wide default for the operation.
    pub template: String,
    /// The request's settings copy, including any lazily derived field
    /// maps; renderers read table/form field order from here.
    pub settings: TypeDefinition,
    /// The single record for view/add/edit renders; carries attempted
    /// values and validation errors after a failed save.
    pub record: Option<Record>,
    /// The result page for index renders.
    pub page: Option<Page>,
    /// Request-scoped vars accumulated by hooks and the dispatcher.
    pub vars: IndexMap<String, Value>,
}

/// Where a redirect points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub operation: Operation,
    /// The type's alias, for route reconstruction.
    pub type_alias: String,
}

/// How a completed operation finishes: render a template or redirect.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render(Box<RenderData>),
    Redirect(Box<RedirectTarget>),
}

impl Outcome {
    /// The redirect every save/delete outcome targets.
    #[must_use]
    pub fn redirect_to_index(settings: &TypeDefinition) -> Self {
        Self::Redirect(Box::new(RedirectTarget {
            operation: Operation::Index,
            type_alias: settings.alias.clone(),
        }))
    }

    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self, Outcome::Redirect(_))
    }

    /// The resolved template, when this outcome renders.
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        match self {
            Outcome::Render(data) => Some(&data.template),
            Outcome::Redirect(_) => None,
        }
    }

    /// The rendered record, when one is exposed.
    #[must_use]
    pub fn record(&self) -> Option<&Record> {
        match self {
            Outcome::Render(data) => data.record.as_ref(),
            Outcome::Redirect(_) => None,
        }
    }

    /// The rendered page, when one is exposed.
    #[must_use]
    pub fn page(&self) -> Option<&Page> {
        match self {
            Outcome::Render(data) => data.page.as_ref(),
            Outcome::Redirect(_) => None,
        }
    }

    /// The settings the render carries, when this outcome renders.
    #[must_use]
    pub fn settings(&self) -> Option<&TypeDefinition> {
        match self {
            Outcome::Render(data) => Some(&data.settings),
            Outcome::Redirect(_) => None,
        }
    }
}
