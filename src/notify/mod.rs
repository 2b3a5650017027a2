//! The user-notification boundary.
//!
//! Save and delete outcomes surface through this collaborator; the exact
//! transport (flash message, response field) is the host's concern.

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}
