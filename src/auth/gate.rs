use indexmap::IndexMap;
use tracing::debug;

use crate::hooks::Operation;

/// Role id granted every action by the bootstrap policy.
pub const ADMIN_ROLE: u32 = 1;

/// The requesting principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Option<String>,
    pub role: u32,
}

impl User {
    /// An unauthenticated principal; role 0 matches no rule unless a
    /// listener grants it explicitly.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { id: None, role: 0 }
    }

    #[must_use]
    pub fn with_role(role: u32) -> Self {
        Self { id: None, role }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Which operations a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionMatcher {
    /// The wildcard rule: any operation.
    Any,
    One(Operation),
}

impl ActionMatcher {
    #[must_use]
    pub fn matches(&self, operation: Operation) -> bool {
        match self {
            ActionMatcher::Any => true,
            ActionMatcher::One(op) => *op == operation,
        }
    }
}

/// A matcher plus the roles it admits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRule {
    matcher: ActionMatcher,
    roles: Vec<u32>,
}

impl ActionRule {
    #[must_use]
    pub fn new(matcher: ActionMatcher) -> Self {
        Self {
            matcher,
            roles: Vec::new(),
        }
    }

    /// Admit a role; repeated grants are collapsed.
    pub fn allow_role(&mut self, role: u32) -> &mut Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    #[must_use]
    pub fn allows(&self, role: u32) -> bool {
        self.roles.contains(&role)
    }

    #[must_use]
    pub fn matcher(&self) -> ActionMatcher {
        self.matcher
    }
}

/// Per-request authorization decision point.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    /// The collection the decision pertains to.
    model: String,
    /// Which positional request param carries the record id, so rules can
    /// be id-aware for single-record operations.
    id_param: usize,
    rules: IndexMap<ActionMatcher, ActionRule>,
}

impl AuthorizationGate {
    #[must_use]
    pub fn new(model: impl Into<String>, id_param: usize) -> Self {
        Self {
            model: model.into(),
            id_param,
            rules: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn id_param(&self) -> usize {
        self.id_param
    }

    /// Find or create the rule for `matcher`, for configuration:
    ///
    /// ```
    /// # use typecrud::auth::{ActionMatcher, AuthorizationGate};
    /// let mut gate = AuthorizationGate::new("Articles", 1);
    /// gate.action(ActionMatcher::Any).allow_role(1);
    /// ```
    pub fn action(&mut self, matcher: ActionMatcher) -> &mut ActionRule {
        self.rules
            .entry(matcher)
            .or_insert_with(|| ActionRule::new(matcher))
    }

    /// Drop every configured rule. Listeners use this to replace the
    /// bootstrap policy wholesale.
    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    /// Deny by default; allow only if a rule matches the operation and
    /// admits the user's role.
    #[must_use]
    pub fn authorize(&self, user: &User, operation: Operation) -> bool {
        let allowed = self
            .rules
            .values()
            .any(|rule| rule.matcher().matches(operation) && rule.allows(user.role));
        debug!(
            model = %self.model,
            role = user.role,
            operation = %operation,
            allowed,
            "Authorization decision"
        );
        allowed
    }
}
