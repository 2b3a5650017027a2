use indexmap::IndexMap;

use super::options::{FieldOptions, FieldSpec};

/// Ordered mapping of field name to fully-populated options.
pub type FieldMap = IndexMap<String, FieldOptions>;

/// Normalize a field list into an ordered [`FieldMap`].
///
/// Bare names take a copy of `defaults`; configured entries take `defaults`
/// shallow-merged under their overrides. Output key order equals the order
/// of first occurrence in the input; a repeated name re-merges into its
/// existing entry without moving it.
#[must_use]
pub fn map_fields(specs: &[FieldSpec], defaults: &FieldOptions) -> FieldMap {
    let mut mapped = FieldMap::new();

    for spec in specs {
        match spec {
            FieldSpec::Name(name) => {
                mapped.insert(name.clone(), defaults.clone());
            }
            FieldSpec::Configured(entries) => {
                for (name, overrides) in entries.iter() {
                    mapped.insert(name.clone(), defaults.merged(overrides));
                }
            }
        }
    }

    mapped
}
