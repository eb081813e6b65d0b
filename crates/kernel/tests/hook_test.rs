#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Hook tests.
//!
//! Series, waterfall and parallel runs through the registry and the sealed
//! render context.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use atelier_kernel::customization::CustomConfiguration;
use atelier_kernel::hook::{HookHandler, names};
use atelier_kernel::store::{Action, INIT_ACTION, SharedReducer};
use atelier_kernel::{AdminApp, RegistryError};
use parking_lot::Mutex;
use serde_json::{Value, json};

fn app_with_hook(name: &str) -> AdminApp {
    let mut app = AdminApp::new(CustomConfiguration::default(), Vec::new());
    app.create_hook(name);
    app
}

fn arithmetic(op: fn(i64) -> i64) -> HookHandler {
    HookHandler::sync(move |input| json!(op(input.value.as_i64().unwrap_or(0))))
}

#[test]
fn test_series_logs_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut app = app_with_hook("x");
    for id in ["first", "second", "third"] {
        let log = Arc::clone(&log);
        app.register_hook(
            "x",
            HookHandler::sync(move |_| {
                log.lock().push(id);
                Value::Null
            }),
        )
        .unwrap();
    }

    app.run_hook_series("x").unwrap();
    assert_eq!(*log.lock(), vec!["first", "second", "third"]);
}

#[test]
fn test_waterfall_arithmetic() {
    let mut app = app_with_hook("x");
    app.register_hook("x", arithmetic(|v| v + 1)).unwrap();
    app.register_hook("x", arithmetic(|v| v * 2)).unwrap();
    app.register_hook("x", arithmetic(|v| v - 3)).unwrap();

    assert_eq!(app.run_hook_waterfall("x", json!(0), None).unwrap(), json!(-1));
}

#[test]
fn test_register_hook_before_create_fails() {
    let mut app = AdminApp::new(CustomConfiguration::default(), Vec::new());
    let err = app
        .register_hook("x", HookHandler::sync(|input| input.value))
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownHook(name) if name == "x"));
}

#[test]
fn test_sync_run_with_async_handler_fails() {
    let mut app = app_with_hook("x");
    app.register_hook("x", HookHandler::from_async(|input| async move { input.value }))
        .unwrap();
    assert!(matches!(
        app.run_hook_series("x"),
        Err(RegistryError::AsyncHandlerInSyncRun { position: 0, .. })
    ));
    assert!(app.run_hook_waterfall("x", Value::Null, None).is_err());
}

#[tokio::test]
async fn test_async_series_is_sequential() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut app = app_with_hook("x");
    for (id, delay) in [("a", 40u64), ("b", 10), ("c", 0)] {
        let log = Arc::clone(&log);
        app.register_hook(
            "x",
            HookHandler::from_async(move |_| {
                let log = Arc::clone(&log);
                async move {
                    log.lock().push(format!("{id}:start"));
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    log.lock().push(format!("{id}:end"));
                    json!(id)
                }
            }),
        )
        .unwrap();
    }

    let results = app.run_hook_series_async("x").await.unwrap();
    assert_eq!(results, vec![json!("a"), json!("b"), json!("c")]);
    assert_eq!(
        *log.lock(),
        vec!["a:start", "a:end", "b:start", "b:end", "c:start", "c:end"]
    );
}

#[tokio::test]
async fn test_parallel_starts_all_before_any_finishes() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut app = app_with_hook("x");
    for id in ["a", "b", "c"] {
        let log = Arc::clone(&log);
        app.register_hook(
            "x",
            HookHandler::from_async(move |_| {
                let log = Arc::clone(&log);
                async move {
                    log.lock().push(format!("{id}:start"));
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    log.lock().push(format!("{id}:end"));
                    Value::Null
                }
            }),
        )
        .unwrap();
    }

    let results = app.run_hook_parallel("x").await.unwrap();
    assert_eq!(results.len(), 3);

    let log = log.lock();
    assert_eq!(log.len(), 6);
    assert!(log[..3].iter().all(|entry| entry.ends_with(":start")));
}

#[tokio::test]
async fn test_sealed_waterfall_receives_the_store() {
    let reducer: SharedReducer = Arc::new(|state: &Value, action: &Action| {
        if action.kind == INIT_ACTION {
            json!({ "hiddenFields": ["password"] })
        } else {
            state.clone()
        }
    });

    let mut app = AdminApp::new(CustomConfiguration::default(), Vec::new());
    app.add_reducers(BTreeMap::from([("cm".to_string(), reducer)]));
    app.bootstrap_admin();
    app.register_hook(
        names::MUTATE_EDIT_VIEW_LAYOUT,
        HookHandler::sync(|input| {
            let hidden = input
                .store
                .and_then(|store| store.slice("cm"))
                .map(|slice| slice["hiddenFields"].clone())
                .unwrap_or(Value::Null);
            json!({ "layout": input.value, "hidden": hidden })
        }),
    )
    .unwrap();

    let admin = app.seal();
    let context = admin.render_context();
    let result = context
        .run_hook_waterfall(names::MUTATE_EDIT_VIEW_LAYOUT, json!(["title"]))
        .unwrap();
    assert_eq!(result, json!({ "layout": ["title"], "hidden": ["password"] }));

    let result = context
        .run_hook_waterfall_async(names::MUTATE_EDIT_VIEW_LAYOUT, json!([]))
        .await
        .unwrap();
    assert_eq!(result["hidden"], json!(["password"]));
}

#[test]
fn test_builtin_hooks_exist_after_bootstrap_admin() {
    let mut app = AdminApp::new(CustomConfiguration::default(), Vec::new());
    assert!(!app.hooks().contains(names::INJECT_COLUMN_IN_TABLE));
    app.bootstrap_admin();
    let mut created: Vec<_> = app.hooks().hook_names().collect();
    created.sort_unstable();
    let mut expected = names::BUILTIN.to_vec();
    expected.sort_unstable();
    assert_eq!(created, expected);
}
