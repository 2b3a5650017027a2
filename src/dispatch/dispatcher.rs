use std::sync::Arc;

use tracing::{debug, info, warn};

use super::config::DispatchConfig;
use super::error::DispatchError;
use super::outcome::{Outcome, RenderData};
use crate::auth::{ActionMatcher, User, ADMIN_ROLE};
use crate::fields::{map_fields, FieldSpec};
use crate::hooks::{CallbackPoint, HookBus, HookPoint, Operation, RequestContext};
use crate::notify::Notifier;
use crate::registry::TypeRegistry;
use crate::request::{resolve_type, Method, Request};
use crate::search::Search;
use crate::storage::{ModelSource, Page, PageRequest, Record, Storage};

/// The generic operation dispatcher.
///
/// Composed once at bootstrap from the sealed registry, the sealed hook
/// bus, and the collaborator handles; every request then runs the same
/// fixed protocol: resolve the type, authorize, bracket the operation body
/// with hooks, delegate persistence, resolve a view or redirect.
pub struct Dispatcher {
    registry: Arc<TypeRegistry>,
    hooks: Arc<HookBus>,
    models: Arc<dyn ModelSource>,
    search: Arc<dyn Search>,
    notifier: Arc<dyn Notifier>,
    config: DispatchConfig,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        registry: Arc<TypeRegistry>,
        hooks: Arc<HookBus>,
        models: Arc<dyn ModelSource>,
        search: Arc<dyn Search>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            registry,
            hooks,
            models,
            search,
            notifier,
            config: DispatchConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one request through the lifecycle protocol.
    pub async fn handle(&self, request: Request, user: &User) -> Result<Outcome, DispatchError> {
        let operation = request.operation;

        let raw = resolve_type(&request)
            .ok_or_else(|| DispatchError::TypeNotFound("<unaddressed>".to_string()))?;
        let Some(definition) = self.registry.get(raw) else {
            return Err(DispatchError::TypeNotFound(raw.to_string()));
        };
        let definition = definition.clone();
        info!(type_name = %definition.name, %operation, method = %request.method, "Dispatching");

        let storage = self
            .models
            .model(&definition.model)
            .ok_or_else(|| DispatchError::ModelNotFound(definition.model.clone()))?;

        let mut ctx = RequestContext::new(request, definition);
        self.derive_fields(storage.as_ref(), &mut ctx);
        self.run_before_filter(storage.as_ref(), &mut ctx);

        self.authorize(user, operation, &mut ctx)?;

        match operation {
            Operation::Index => self.index(storage.as_ref(), &mut ctx).await,
            Operation::View => self.view(storage.as_ref(), &mut ctx).await,
            Operation::Add => self.add(storage.as_ref(), &mut ctx).await,
            Operation::Edit => self.edit(storage.as_ref(), &mut ctx).await,
            Operation::Delete => self.delete(storage.as_ref(), &mut ctx).await,
        }
    }

    async fn index(
        &self,
        storage: &dyn Storage,
        ctx: &mut RequestContext,
    ) -> Result<Outcome, DispatchError> {
        self.hooks.dispatch(HookPoint::before(Operation::Index), ctx);

        let query = storage
            .find()
            .await?
            .with_contain(ctx.settings.contain.clone());
        let query = self.search.filter(query, &ctx.settings.filters);
        let page_request = PageRequest {
            limit: self.config.page_limit,
            page: requested_page(&ctx.request),
            order_by: storage.primary_key().to_string(),
            ascending: true,
        };
        let page = self.search.paginate(query, page_request).await?;

        if let Ok(value) = serde_json::to_value(&page.records) {
            ctx.vars.insert("records".to_string(), value);
        }
        self.hooks.dispatch(HookPoint::after(Operation::Index), ctx);
        Ok(self.render_page(Operation::Index, ctx, page))
    }

    async fn view(
        &self,
        storage: &dyn Storage,
        ctx: &mut RequestContext,
    ) -> Result<Outcome, DispatchError> {
        self.hooks.dispatch(HookPoint::before(Operation::View), ctx);

        let id = required_id(ctx)?;
        let record = storage.get(&id, &ctx.settings.contain).await?;

        expose_record(ctx, &record);
        self.hooks.dispatch(HookPoint::after(Operation::View), ctx);
        Ok(self.render_record(Operation::View, ctx, record))
    }

    async fn add(
        &self,
        storage: &dyn Storage,
        ctx: &mut RequestContext,
    ) -> Result<Outcome, DispatchError> {
        self.ensure_form_fields(storage, ctx).await?;
        self.hooks.dispatch(HookPoint::before(Operation::Add), ctx);

        let mut record = storage.new_record(None);
        if ctx.request.method == Method::Post {
            if let Some(data) = ctx.request.data.clone() {
                record = storage.new_record(Some(&data));
                if storage.save(&mut record).await? {
                    self.notifier.success("The record has been saved.");
                    return Ok(Outcome::redirect_to_index(&ctx.settings));
                }
                self.notifier
                    .error("The record could not be saved. Please, try again.");
            }
        }

        expose_record(ctx, &record);
        self.hooks.dispatch(HookPoint::after(Operation::Add), ctx);
        Ok(self.render_record(Operation::Add, ctx, record))
    }

    async fn edit(
        &self,
        storage: &dyn Storage,
        ctx: &mut RequestContext,
    ) -> Result<Outcome, DispatchError> {
        self.hooks.dispatch(HookPoint::before(Operation::Edit), ctx);

        let id = required_id(ctx)?;
        let mut record = storage.get(&id, &ctx.settings.contain).await?;

        if ctx.request.method.carries_data() {
            if let Some(data) = ctx.request.data.clone() {
                storage.patch(&mut record, &data);
                if storage.save(&mut record).await? {
                    self.notifier.success("The record has been saved.");
                    return Ok(Outcome::redirect_to_index(&ctx.settings));
                }
                self.notifier
                    .error("The record could not be saved. Please, try again.");
            }
        }

        expose_record(ctx, &record);
        self.hooks.dispatch(HookPoint::after(Operation::Edit), ctx);
        Ok(self.render_record(Operation::Edit, ctx, record))
    }

    async fn delete(
        &self,
        storage: &dyn Storage,
        ctx: &mut RequestContext,
    ) -> Result<Outcome, DispatchError> {
        self.hooks.dispatch(HookPoint::before(Operation::Delete), ctx);

        let id = required_id(ctx)?;
        let record = storage.get(&id, &ctx.settings.contain).await?;

        if !matches!(ctx.request.method, Method::Post | Method::Delete) {
            return Err(DispatchError::MethodNotAllowed {
                operation: Operation::Delete,
                method: ctx.request.method,
            });
        }

        if storage.delete(&record).await? {
            self.notifier.success("The record has been deleted.");
        } else {
            self.notifier
                .error("The record could not be deleted. Please, try again.");
        }

        // Both outcomes redirect straight to index; the after:delete point
        // is never dispatched on this path.
        Ok(Outcome::redirect_to_index(&ctx.settings))
    }

    /// Install the bootstrap policy, give listeners their chance to reshape
    /// it, then decide. Deny stops the request before any operation hook.
    fn authorize(
        &self,
        user: &User,
        operation: Operation,
        ctx: &mut RequestContext,
    ) -> Result<(), DispatchError> {
        ctx.gate.action(ActionMatcher::Any).allow_role(ADMIN_ROLE);
        self.hooks.dispatch(HookPoint::IsAuthorized, ctx);

        if ctx.gate.authorize(user, operation) {
            Ok(())
        } else {
            warn!(type_name = %ctx.type_name, %operation, role = user.role, "Request denied");
            Err(DispatchError::AuthorizationDenied {
                type_name: ctx.type_name.clone(),
                operation,
            })
        }
    }

    /// Fill in whichever field maps the registration left unset, from the
    /// model's callback capability. Writes go to the per-request settings
    /// copy only.
    fn derive_fields(&self, storage: &dyn Storage, ctx: &mut RequestContext) {
        if ctx.settings.form_fields.is_none() {
            if let Some(specs) = self.model_fields(storage, ctx, CallbackPoint::FormFields) {
                ctx.settings.form_fields =
                    Some(map_fields(&specs, self.registry.form_field_defaults()));
            }
        }
        if ctx.settings.table_fields.is_none() {
            if let Some(specs) = self.model_fields(storage, ctx, CallbackPoint::TableFields) {
                ctx.settings.table_fields =
                    Some(map_fields(&specs, self.registry.list_field_defaults()));
            }
        }
    }

    /// The configured model callback at `point`, when the type enables it
    /// and the model implements the capability.
    fn model_fields(
        &self,
        storage: &dyn Storage,
        ctx: &RequestContext,
        point: CallbackPoint,
    ) -> Option<Vec<FieldSpec>> {
        if !ctx.settings.callback_enabled(point) {
            return None;
        }
        let hooks = storage.field_hooks()?;
        debug!(point = point.as_str(), type_name = %ctx.type_name, "Invoking model callback");
        match point {
            CallbackPoint::TableFields => hooks.table_fields(ctx),
            CallbackPoint::FormFields => hooks.form_fields(ctx),
            CallbackPoint::BeforeFilter => None,
        }
    }

    fn run_before_filter(&self, storage: &dyn Storage, ctx: &mut RequestContext) {
        if !ctx.settings.callback_enabled(CallbackPoint::BeforeFilter) {
            return;
        }
        if let Some(hooks) = storage.field_hooks() {
            debug!(point = "beforeFilter", type_name = %ctx.type_name, "Invoking model callback");
            hooks.before_filter(ctx);
        }
    }

    /// Derive the form field map from the backing model's columns when the
    /// type and its callbacks left it unset, excluding the configured
    /// column denylist.
    async fn ensure_form_fields(
        &self,
        storage: &dyn Storage,
        ctx: &mut RequestContext,
    ) -> Result<(), DispatchError> {
        if ctx.settings.form_fields.is_some() {
            return Ok(());
        }

        let specs: Vec<FieldSpec> = storage
            .columns()
            .await?
            .into_iter()
            .filter(|column| !self.config.filtered_columns.contains(column))
            .map(FieldSpec::Name)
            .collect();
        debug!(count = specs.len(), type_name = %ctx.type_name, "Derived form fields from model columns");

        ctx.settings.form_fields = Some(map_fields(&specs, self.registry.form_field_defaults()));
        Ok(())
    }

    /// The type's override template when configured and non-empty, else the
    /// process-wide default for the operation.
    fn resolve_template(&self, operation: Operation, ctx: &RequestContext) -> String {
        match ctx.settings.views.for_operation(operation) {
            Some(template) => template.to_string(),
            None => self.config.views.for_operation(operation).to_string(),
        }
    }

    fn render_record(
        &self,
        operation: Operation,
        ctx: &mut RequestContext,
        record: Record,
    ) -> Outcome {
        Outcome::Render(Box::new(RenderData {
            template: self.resolve_template(operation, ctx),
            settings: ctx.settings.clone(),
            record: Some(record),
            page: None,
            vars: std::mem::take(&mut ctx.vars),
        }))
    }

    fn render_page(&self, operation: Operation, ctx: &mut RequestContext, page: Page) -> Outcome {
        Outcome::Render(Box::new(RenderData {
            template: self.resolve_template(operation, ctx),
            settings: ctx.settings.clone(),
            record: None,
            page: Some(page),
            vars: std::mem::take(&mut ctx.vars),
        }))
    }
}

/// The 1-based page number the request asks for, defaulting to the first.
fn requested_page(request: &Request) -> u32 {
    request
        .query
        .get("page")
        .and_then(|value| value.parse().ok())
        .unwrap_or(1)
}

/// Single-record operations need the id param; its absence reads as a
/// missing record.
fn required_id(ctx: &RequestContext) -> Result<String, DispatchError> {
    ctx.record_id()
        .map(str::to_string)
        .ok_or_else(|| DispatchError::RecordNotFound("<missing id>".to_string()))
}

/// Expose the record to hook listeners through the context vars.
fn expose_record(ctx: &mut RequestContext, record: &Record) {
    if let Ok(value) = serde_json::to_value(record) {
        ctx.vars.insert("record".to_string(), value);
    }
}
