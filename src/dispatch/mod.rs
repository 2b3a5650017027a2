//! The lifecycle dispatcher.
//!
//! One [`Dispatcher`] serves every registered type: it resolves the active
//! type from the request, authorizes the caller, fires the typed lifecycle
//! hooks around the operation body, delegates persistence to the storage
//! collaborator, and resolves the view template (or redirect) that finishes
//! the request. Structural failures abort the request as a
//! [`DispatchError`]; a rejected save degrades to an error notification
//! plus a re-render of the form with the attempted values intact.

mod config;
mod dispatcher;
mod error;
mod outcome;

pub use config::{DispatchConfig, ViewDefaults, PAGE_LIMIT};
pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use outcome::{Outcome, RedirectTarget, RenderData};
