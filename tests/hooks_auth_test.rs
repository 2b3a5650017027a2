#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing,
    clippy::cast_possible_truncation,
    clippy::get_unwrap
)]

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use common::{build_env, TestEnv};
use serde_json::json;
use typecrud::auth::{ActionMatcher, User, ADMIN_ROLE};
use typecrud::hooks::{HookBus, HookPoint, HookScope, Operation};
use typecrud::registry::{TypeOptions, TypeRegistry};
use typecrud::request::{Method, Request};
use typecrud::DispatchError;

fn admin() -> User {
    User::with_role(ADMIN_ROLE)
}

fn articles_env(hooks: HookBus) -> TestEnv {
    let mut registry = TypeRegistry::new();
    registry.register("articles", TypeOptions::new()).unwrap();
    build_env(registry, hooks, "Articles")
}

#[tokio::test]
async fn test_before_and_after_hooks_bracket_index() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let mut hooks = HookBus::new();
    {
        let order = order.clone();
        hooks.subscribe(
            HookPoint::before(Operation::Index),
            HookScope::AnyType,
            move |_ctx| order.lock().unwrap().push("before"),
        );
    }
    {
        let order = order.clone();
        hooks.subscribe(
            HookPoint::after(Operation::Index),
            HookScope::AnyType,
            move |_ctx| order.lock().unwrap().push("after"),
        );
    }

    let env = articles_env(hooks);
    let request = Request::new(Operation::Index, Method::Get).with_param("articles");
    env.dispatcher.handle(request, &admin()).await.unwrap();

    assert_eq!(*order.lock().unwrap(), ["before", "after"]);
}

#[tokio::test]
async fn test_hook_vars_flow_into_render_outcome() {
    let mut hooks = HookBus::new();
    hooks.subscribe(
        HookPoint::before(Operation::Index),
        HookScope::Type("Articles".to_string()),
        |ctx| {
            ctx.vars.insert("banner".to_string(), json!("hello"));
        },
    );

    let env = articles_env(hooks);
    let request = Request::new(Operation::Index, Method::Get).with_param("articles");
    let outcome = env.dispatcher.handle(request, &admin()).await.unwrap();

    match outcome {
        typecrud::Outcome::Render(data) => {
            assert_eq!(data.vars.get("banner"), Some(&json!("hello")));
        }
        typecrud::Outcome::Redirect(_) => panic!("index renders"),
    }
}

#[tokio::test]
async fn test_after_hooks_see_the_fetched_record() {
    let seen = Arc::new(Mutex::new(None));
    let mut hooks = HookBus::new();
    {
        let seen = seen.clone();
        hooks.subscribe(
            HookPoint::after(Operation::View),
            HookScope::AnyType,
            move |ctx| {
                *seen.lock().unwrap() = ctx.vars.get("record").cloned();
            },
        );
    }

    let env = articles_env(hooks);
    let id = env.storage.seed(&[("title", json!("Hello"))]);
    let request = Request::new(Operation::View, Method::Get)
        .with_param("articles")
        .with_param(id);
    env.dispatcher.handle(request, &admin()).await.unwrap();

    let record = seen.lock().unwrap().clone().unwrap();
    assert_eq!(record.pointer("/fields/title"), Some(&json!("Hello")));
}

#[tokio::test]
async fn test_after_delete_hook_fires_on_neither_path() {
    let after_fired = Arc::new(AtomicBool::new(false));
    let before_fired = Arc::new(AtomicBool::new(false));
    let mut hooks = HookBus::new();
    {
        let after_fired = after_fired.clone();
        hooks.subscribe(
            HookPoint::after(Operation::Delete),
            HookScope::AnyType,
            move |_ctx| after_fired.store(true, Ordering::SeqCst),
        );
    }
    {
        let before_fired = before_fired.clone();
        hooks.subscribe(
            HookPoint::before(Operation::Delete),
            HookScope::AnyType,
            move |_ctx| before_fired.store(true, Ordering::SeqCst),
        );
    }

    let env = articles_env(hooks);

    // Success path.
    let id = env.storage.seed(&[("title", json!("one"))]);
    let request = Request::new(Operation::Delete, Method::Post)
        .with_param("articles")
        .with_param(id);
    let outcome = env.dispatcher.handle(request, &admin()).await.unwrap();
    assert!(outcome.is_redirect());

    // Failure path.
    let id = env.storage.seed(&[("title", json!("two"))]);
    env.storage.set_fail_deletes(true);
    let request = Request::new(Operation::Delete, Method::Post)
        .with_param("articles")
        .with_param(id);
    let outcome = env.dispatcher.handle(request, &admin()).await.unwrap();
    assert!(outcome.is_redirect());

    assert!(before_fired.load(Ordering::SeqCst));
    assert!(!after_fired.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_non_admin_denied_by_default() {
    let env = articles_env(HookBus::new());
    let request = Request::new(Operation::Index, Method::Get).with_param("articles");

    let err = env
        .dispatcher
        .handle(request, &User::with_role(2))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::AuthorizationDenied {
            type_name,
            operation: Operation::Index,
        } if type_name == "Articles"
    ));
}

#[tokio::test]
async fn test_denied_request_fires_no_operation_hooks() {
    let before_fired = Arc::new(AtomicBool::new(false));
    let mut hooks = HookBus::new();
    {
        let before_fired = before_fired.clone();
        hooks.subscribe(
            HookPoint::before(Operation::Index),
            HookScope::AnyType,
            move |_ctx| before_fired.store(true, Ordering::SeqCst),
        );
    }

    let env = articles_env(hooks);
    let request = Request::new(Operation::Index, Method::Get).with_param("articles");
    let result = env.dispatcher.handle(request, &User::anonymous()).await;

    assert!(result.is_err());
    assert!(!before_fired.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_is_authorized_listener_extends_policy() {
    let mut hooks = HookBus::new();
    hooks.subscribe(
        HookPoint::IsAuthorized,
        HookScope::Type("Articles".to_string()),
        |ctx| {
            ctx.gate
                .action(ActionMatcher::One(Operation::Index))
                .allow_role(2);
        },
    );

    let env = articles_env(hooks);
    let editor = User::with_role(2);

    // The listener granted index to role 2.
    let request = Request::new(Operation::Index, Method::Get).with_param("articles");
    assert!(env.dispatcher.handle(request, &editor).await.is_ok());

    // Everything else stays denied for that role.
    let id = env.storage.seed(&[("title", json!("Hello"))]);
    let request = Request::new(Operation::Delete, Method::Post)
        .with_param("articles")
        .with_param(id);
    let err = env.dispatcher.handle(request, &editor).await.unwrap_err();
    assert!(matches!(err, DispatchError::AuthorizationDenied { .. }));
}

#[tokio::test]
async fn test_is_authorized_listener_can_revoke_bootstrap_policy() {
    let mut hooks = HookBus::new();
    hooks.subscribe(HookPoint::IsAuthorized, HookScope::AnyType, |ctx| {
        ctx.gate.clear_rules();
    });

    let env = articles_env(hooks);
    let request = Request::new(Operation::Index, Method::Get).with_param("articles");
    let err = env.dispatcher.handle(request, &admin()).await.unwrap_err();
    assert!(matches!(err, DispatchError::AuthorizationDenied { .. }));
}
