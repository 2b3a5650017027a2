// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        clippy::get_unwrap
    )
)]

pub mod auth;
pub mod dispatch;
pub mod fields;
pub mod hooks;
pub mod logging;
pub mod menu;
pub mod notify;
pub mod registry;
pub mod request;
pub mod search;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use auth::{ActionMatcher, ActionRule, AuthorizationGate, User, ADMIN_ROLE};
pub use dispatch::{
    DispatchConfig, DispatchError, Dispatcher, Outcome, RedirectTarget, RenderData, ViewDefaults,
    PAGE_LIMIT,
};
pub use fields::{map_fields, FieldMap, FieldOptions, FieldOverrides, FieldSpec};
pub use hooks::{
    CallbackPoint, HookBus, HookPoint, HookScope, Operation, Phase, RequestContext,
    ID_PARAM_POSITION,
};
pub use menu::{Menu, MenuTarget};
pub use notify::Notifier;
pub use registry::{
    RegistryError, RegistryScope, TypeDefinition, TypeOptions, TypeRegistry, ViewOverrides,
};
pub use request::{resolve_type, DataMap, Method, Request};
pub use search::Search;
pub use storage::{
    FieldHooks, ModelSource, Page, PageRequest, Query, Record, Storage, StorageError,
};
