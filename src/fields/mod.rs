//! Field-spec normalization.
//!
//! Content types declare their list and form fields as a heterogeneous
//! sequence: bare names for fields that take the context defaults, and
//! name-to-overrides entries for fields that customize them. [`map_fields`]
//! normalizes either shape into an ordered [`FieldMap`] whose key order is
//! the order of first occurrence in the input.

mod mapper;
mod options;

pub use mapper::{map_fields, FieldMap};
pub use options::{FieldOptions, FieldOverrides, FieldSpec};
