//! Per-type, per-action authorization.
//!
//! Every request gets a fresh [`AuthorizationGate`] configured with the
//! model the decision pertains to and the position of the record-id param.
//! The dispatcher installs the bootstrap policy (administrators may do
//! anything), fires the `isAuthorized` hook so listeners can reshape the
//! rule table, then asks the gate for a decision. Deny is the default.

mod gate;

pub use gate::{ActionMatcher, ActionRule, AuthorizationGate, User, ADMIN_ROLE};
