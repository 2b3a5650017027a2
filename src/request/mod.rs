//! Transport-agnostic request model.
//!
//! Hosts translate whatever their HTTP layer produces into a [`Request`]
//! before handing it to the dispatcher. The crate never sees sockets or
//! routing tables; it sees the operation the router selected, the method,
//! the ordered positional params, and any submitted data.

mod resolver;

pub use resolver::resolve_type;

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::hooks::Operation;

/// Submitted form data, in field order.
pub type DataMap = IndexMap<String, Value>;

/// HTTP-style request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Methods that carry a submission body the dispatcher applies to a
    /// record (add/edit save paths).
    #[must_use]
    pub fn carries_data(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inbound operation request.
#[derive(Debug, Clone)]
pub struct Request {
    /// The operation the router selected.
    pub operation: Operation,
    pub method: Method,
    /// Routing scope, e.g. `"admin"`.
    pub prefix: Option<String>,
    /// Ordered positional route params. By convention param 0 names the
    /// target type and param 1 carries the record id.
    pub params: Vec<String>,
    pub query: HashMap<String, String>,
    /// Submitted form body, when the method carries one.
    pub data: Option<DataMap>,
}

impl Request {
    #[must_use]
    pub fn new(operation: Operation, method: Method) -> Self {
        Self {
            operation,
            method,
            prefix: None,
            params: Vec::new(),
            query: HashMap::new(),
            data: None,
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: DataMap) -> Self {
        self.data = Some(data);
        self
    }

    /// Positional route param, if present.
    #[must_use]
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Whether the request targets the admin routing scope.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.prefix.as_deref() == Some("admin")
    }
}
