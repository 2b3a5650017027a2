use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::definition::{TypeDefinition, TypeOptions};
use crate::fields::{map_fields, FieldOptions};
use crate::hooks::Operation;
use crate::menu::{Menu, MenuTarget};
use crate::utils::{capitalize, singularize};

/// Static regex for validating registration names (compiled once on first use)
#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[A-Za-z][A-Za-z0-9_]*$").expect("NAME_PATTERN is a valid regex literal")
});

/// Failures during registration or declaration loading.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid content type name: '{0}'")]
    InvalidName(String),
    #[error("Unknown content type: {0}")]
    UnknownType(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Which routing scope the registry serves. Only admin-scoped registries
/// emit navigation entries for menu-enabled types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistryScope {
    #[default]
    Public,
    Admin,
}

/// Process-wide store of registered type definitions.
///
/// Write-once-then-read-many: populate during bootstrap, seal with
/// [`TypeRegistry::into_shared`], and hand the shared handle to every
/// request-handling unit. Nothing mutates a definition after registration.
pub struct TypeRegistry {
    scope: RegistryScope,
    menu: Option<Arc<dyn Menu>>,
    list_field_defaults: FieldOptions,
    form_field_defaults: FieldOptions,
    types: IndexMap<String, TypeDefinition>,
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("scope", &self.scope)
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// A public-scope registry with no menu collaborator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scope: RegistryScope::Public,
            menu: None,
            list_field_defaults: FieldOptions::list_defaults(),
            form_field_defaults: FieldOptions::form_defaults(),
            types: IndexMap::new(),
        }
    }

    /// An admin-scope registry that emits navigation entries through `menu`.
    #[must_use]
    pub fn for_admin(menu: Arc<dyn Menu>) -> Self {
        Self {
            scope: RegistryScope::Admin,
            menu: Some(menu),
            list_field_defaults: FieldOptions::list_defaults(),
            form_field_defaults: FieldOptions::form_defaults(),
            types: IndexMap::new(),
        }
    }

    /// Replace the context defaults applied to list/table field specs.
    pub fn set_list_field_defaults(&mut self, defaults: FieldOptions) {
        self.list_field_defaults = defaults;
    }

    /// Replace the context defaults applied to form field specs.
    pub fn set_form_field_defaults(&mut self, defaults: FieldOptions) {
        self.form_field_defaults = defaults;
    }

    /// Context defaults applied to list/table field specs; the dispatcher
    /// reuses these for lazily derived field maps.
    #[must_use]
    pub fn list_field_defaults(&self) -> &FieldOptions {
        &self.list_field_defaults
    }

    /// Context defaults applied to form field specs.
    #[must_use]
    pub fn form_field_defaults(&self) -> &FieldOptions {
        &self.form_field_defaults
    }

    /// Register a content type.
    ///
    /// The canonical (capitalized) name is the storage key; registering a
    /// name that canonicalizes onto an existing key overwrites the previous
    /// definition wholesale. The overwrite is logged, not prevented.
    pub fn register(&mut self, name: &str, options: TypeOptions) -> Result<(), RegistryError> {
        if !NAME_PATTERN.is_match(name) {
            return Err(RegistryError::InvalidName(name.to_string()));
        }

        let canonical = capitalize(name);
        let definition = TypeDefinition {
            model: options.model.unwrap_or_else(|| canonical.clone()),
            alias: options.alias.unwrap_or_else(|| name.to_string()),
            display_name: options.display_name.unwrap_or_else(|| canonical.clone()),
            singular: options.singular.unwrap_or_else(|| singularize(&canonical)),
            menu: options.menu.unwrap_or(false),
            contain: options.contain.unwrap_or_default(),
            table_fields: options
                .table_fields
                .map(|specs| map_fields(&specs, &self.list_field_defaults)),
            form_fields: options
                .form_fields
                .map(|specs| map_fields(&specs, &self.form_field_defaults)),
            filters: options.filters.unwrap_or_default(),
            views: options.views.unwrap_or_default(),
            callbacks: options.callbacks.unwrap_or_default(),
            api: options.api.unwrap_or(false),
            name: canonical.clone(),
        };

        if definition.menu {
            self.emit_menu(&definition);
        }

        if self.types.insert(canonical.clone(), definition).is_some() {
            warn!(name = %canonical, "Re-registration overwrote an existing content type");
        }
        info!(name = %canonical, "Registered content type");
        Ok(())
    }

    /// Register every entry of a YAML declaration file, in file order.
    ///
    /// ```yaml
    /// articles:
    ///   menu: true
    ///   tableFields:
    ///     - title
    ///     - body: { hide: true }
    /// pages: {}
    /// ```
    ///
    /// Returns the canonical names registered.
    pub fn load_declarations(&mut self, path: &Path) -> Result<Vec<String>, RegistryError> {
        let raw = std::fs::read_to_string(path)?;
        let declared: IndexMap<String, TypeOptions> = serde_yaml::from_str(&raw)?;

        let mut registered = Vec::with_capacity(declared.len());
        for (name, options) in declared {
            self.register(&name, options)?;
            registered.push(capitalize(&name));
        }
        info!(count = registered.len(), path = %path.display(), "Loaded type declarations");
        Ok(registered)
    }

    /// Whether a type with this name (canonicalized) is registered.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.types.contains_key(&capitalize(name))
    }

    /// Soft lookup: canonicalize and fetch, `None` on a miss.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(&capitalize(name))
    }

    /// Checked lookup: a miss is a hard failure, for callers that treat an
    /// unknown type as fatal rather than answerable.
    pub fn get_or_fail(&self, name: &str) -> Result<&TypeDefinition, RegistryError> {
        let canonical = capitalize(name);
        self.types
            .get(&canonical)
            .ok_or(RegistryError::UnknownType(canonical))
    }

    /// Canonical names, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&String> {
        self.types.keys().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Seal the registry for the read-many phase.
    #[must_use]
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn emit_menu(&self, definition: &TypeDefinition) {
        if self.scope != RegistryScope::Admin {
            return;
        }
        let Some(menu) = &self.menu else {
            return;
        };
        let target = MenuTarget {
            prefix: "admin".to_string(),
            operation: Operation::Index,
            type_name: definition.name.clone(),
        };
        debug!(name = %definition.name, "Adding navigation entry");
        menu.add(&definition.alias, &target);
    }
}
