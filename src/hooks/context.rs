use indexmap::IndexMap;
use serde_json::Value;

use crate::auth::AuthorizationGate;
use crate::registry::TypeDefinition;
use crate::request::Request;

/// Which positional route param carries the record id.
pub const ID_PARAM_POSITION: usize = 1;

/// Request-scoped state shared with hook listeners and model callbacks.
///
/// `settings` is this request's own copy of the resolved type definition:
/// lazy field derivation and listener mutations land here and are discarded
/// with the request; the registry's definition is never touched.
#[derive(Debug)]
pub struct RequestContext {
    pub request: Request,
    /// Canonical name of the resolved type.
    pub type_name: String,
    pub settings: TypeDefinition,
    pub gate: AuthorizationGate,
    /// Free-form state listeners and the dispatcher accumulate; exposed to
    /// the render outcome.
    pub vars: IndexMap<String, Value>,
}

impl RequestContext {
    #[must_use]
    pub fn new(request: Request, definition: TypeDefinition) -> Self {
        let gate = AuthorizationGate::new(definition.model.clone(), ID_PARAM_POSITION);
        Self {
            type_name: definition.name.clone(),
            settings: definition,
            request,
            gate,
            vars: IndexMap::new(),
        }
    }

    /// The record id for single-record operations, read from the param
    /// position the gate is configured with.
    #[must_use]
    pub fn record_id(&self) -> Option<&str> {
        self.request.param(self.gate.id_param())
    }
}
