use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five CRUD operations the dispatcher serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Index,
    View,
    Add,
    Edit,
    Delete,
}

impl Operation {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Index => "index",
            Operation::View => "view",
            Operation::Add => "add",
            Operation::Edit => "edit",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "index" => Ok(Operation::Index),
            "view" => Ok(Operation::View),
            "add" => Ok(Operation::Add),
            "edit" => Ok(Operation::Edit),
            "delete" => Ok(Operation::Delete),
            other => Err(format!("unknown operation: '{other}'")),
        }
    }
}

/// Whether a lifecycle hook fires before or after an operation's body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Before,
    After,
}

impl Phase {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Before => "before",
            Phase::After => "after",
        }
    }
}

/// A typed extension point in the request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// Brackets an operation: `before`/`after` the operation body.
    Lifecycle { phase: Phase, operation: Operation },
    /// Fires before the authorization decision is computed. Listeners may
    /// reshape the gate's rule table through the context; return values are
    /// ignored, so this point cannot veto.
    IsAuthorized,
}

impl HookPoint {
    #[must_use]
    pub fn before(operation: Operation) -> Self {
        Self::Lifecycle {
            phase: Phase::Before,
            operation,
        }
    }

    #[must_use]
    pub fn after(operation: Operation) -> Self {
        Self::Lifecycle {
            phase: Phase::After,
            operation,
        }
    }

    /// Stable label for logs, e.g. `"before:index"` or `"isAuthorized"`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            HookPoint::Lifecycle { phase, operation } => {
                format!("{}:{}", phase.as_str(), operation.as_str())
            }
            HookPoint::IsAuthorized => "isAuthorized".to_string(),
        }
    }
}

/// Which registered types a listener observes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookScope {
    /// Fires for every type.
    AnyType,
    /// Fires only for the named type (canonical name).
    Type(String),
}

impl HookScope {
    #[must_use]
    pub fn matches(&self, type_name: &str) -> bool {
        match self {
            HookScope::AnyType => true,
            HookScope::Type(name) => name == type_name,
        }
    }

    /// Type-scoped listeners outrank any-type listeners.
    #[must_use]
    pub fn specificity(&self) -> u8 {
        match self {
            HookScope::AnyType => 0,
            HookScope::Type(_) => 1,
        }
    }
}

/// Lifecycle points at which a configured model callback may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CallbackPoint {
    /// Early in request setup, before authorization and the operation body.
    BeforeFilter,
    /// Lazy derivation of the list/table field map.
    TableFields,
    /// Lazy derivation of the form field map.
    FormFields,
}

impl CallbackPoint {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackPoint::BeforeFilter => "beforeFilter",
            CallbackPoint::TableFields => "tableFields",
            CallbackPoint::FormFields => "formFields",
        }
    }
}

#[cfg(test)]
#[path = "point_tests.rs"]
mod point_tests;
