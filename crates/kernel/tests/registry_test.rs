#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Extension registry tests.
//!
//! Registration rules, capability tiers and boot ordering, driven through
//! the public API the way extensions use it.

use std::collections::BTreeMap;
use std::sync::Arc;

use atelier_kernel::customization::CustomConfiguration;
use atelier_kernel::extension::{CustomBootstrap, PluginBootstrap, PluginDescriptor};
use atelier_kernel::injection::InjectedComponent;
use atelier_kernel::library::{Component, Field};
use atelier_kernel::models::{IntlLabel, MenuLink, OneOrMany};
use atelier_kernel::store::{Action, SharedMiddleware, SharedReducer};
use atelier_kernel::{AdminApp, RegistryError, RegistryResult};
use atelier_test_utils::{
    RecordingExtension, assert, test_menu_link, test_section, test_settings_link,
};
use serde_json::{Value, json};

fn app() -> AdminApp {
    AdminApp::new(CustomConfiguration::default(), Vec::new())
}

#[test]
fn test_add_menu_link_appends_in_order() {
    let mut app = app();
    for to in ["/plugins/a", "/plugins/b", "/plugins/c"] {
        app.add_menu_link(test_menu_link(to)).unwrap();
    }
    let targets: Vec<_> = app.menu().iter().map(|link| link.to.as_str()).collect();
    assert_eq!(targets, vec!["/plugins/a", "/plugins/b", "/plugins/c"]);
}

#[test]
fn test_add_menu_link_rejects_incomplete_links() {
    let mut app = app();

    let mut no_target = test_menu_link("/plugins/a");
    no_target.to.clear();
    assert!(matches!(
        app.add_menu_link(no_target),
        Err(RegistryError::MissingLinkTarget { .. })
    ));

    let mut no_message = test_menu_link("/plugins/a");
    no_message.intl_label.default_message.clear();
    assert!(matches!(
        app.add_menu_link(no_message),
        Err(RegistryError::IncompleteLabel { .. })
    ));

    let mut no_icon = test_menu_link("/plugins/a");
    no_icon.icon = None;
    assert!(matches!(
        app.add_menu_link(no_icon),
        Err(RegistryError::MissingComponent { .. })
    ));

    assert!(app.menu().is_empty());
}

#[test]
fn test_menu_link_with_non_string_target_does_not_deserialize() {
    let parsed: Result<MenuLink, _> = serde_json::from_value(json!({
        "to": 42,
        "intlLabel": { "id": "a", "defaultMessage": "A" }
    }));
    assert!(parsed.is_err());
}

#[test]
fn test_core_plugin_links_are_allow_listed() {
    let mut app = app();
    let mut upload = test_menu_link("/plugins/upload");
    upload.component = None;
    upload.icon = None;
    app.add_core_plugin_menu_link(upload).unwrap();

    let err = app
        .add_core_plugin_menu_link(test_menu_link("/plugins/seo"))
        .unwrap_err();
    assert!(matches!(err, RegistryError::CorePluginLinkNotAllowed { .. }));
    assert!(err.to_string().contains("/plugins/content-type-builder"));
    assert_eq!(app.menu().len(), 1);
}

#[test]
fn test_create_setting_section_twice_fails() {
    let mut app = app();
    app.create_setting_section(
        test_section("email"),
        vec![test_settings_link("smtp"), test_settings_link("templates")],
    )
    .unwrap();

    let section = app.settings_section("email").unwrap();
    let ids: Vec<_> = section.links.iter().map(|link| link.id.as_str()).collect();
    assert_eq!(ids, vec!["smtp", "templates"]);

    let err = app
        .create_setting_section(test_section("email"), Vec::new())
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateSection(_)));
}

#[test]
fn test_create_setting_section_requires_id_and_label() {
    let mut app = app();
    assert!(matches!(
        app.create_setting_section(test_section(""), Vec::new()),
        Err(RegistryError::MissingSectionId)
    ));

    let mut unlabeled = test_section("email");
    unlabeled.intl_label = IntlLabel::default();
    assert!(matches!(
        app.create_setting_section(unlabeled, Vec::new()),
        Err(RegistryError::IncompleteLabel { .. })
    ));
    assert_eq!(app.settings().len(), 1);
}

#[test]
fn test_add_settings_link_to_unknown_section_mutates_nothing() {
    let mut app = app();
    let before = app.settings().to_vec();

    let err = app
        .add_settings_link("does-not-exist", test_settings_link("x"))
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownSection(id) if id == "does-not-exist"));
    assert_eq!(app.settings(), before.as_slice());
}

#[test]
fn test_plugin_registered_twice_keeps_second() {
    let mut app = app();
    app.register_plugin(PluginDescriptor::new("upload", "First").with_api("version", 1u32));
    app.register_plugin(PluginDescriptor::new("upload", "Second").with_api("version", 2u32));

    let plugin = app.get_plugin("upload").unwrap();
    assert_eq!(plugin.name(), "Second");
    assert_eq!(plugin.api::<u32>("version"), Some(&2));
    assert_eq!(app.plugins().count(), 1);
}

#[test]
fn test_get_plugin_missing_is_none() {
    assert!(app().get_plugin("nope").is_none());
}

#[test]
fn test_inject_admin_component_requires_declared_zone() {
    let mut app = app();
    let err = app
        .inject_admin_component("header", "actions", InjectedComponent::new("x", "X"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "the header actions zone is not defined in the admin"
    );

    for name in ["one", "two"] {
        app.inject_admin_component("tutorials", "links", InjectedComponent::new(name, "Link"))
            .unwrap();
    }
    let names: Vec<_> = app
        .get_admin_injected_components("admin", "tutorials", "links")
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["one", "two"]);
}

#[test]
fn test_inject_content_manager_component() {
    let mut app = app();
    app.inject_content_manager_component(
        "listView",
        "actions",
        InjectedComponent::new("bulk-publish", "BulkPublish"),
    )
    .unwrap();
    assert_eq!(
        app.get_admin_injected_components("contentManager", "listView", "actions")
            .len(),
        1
    );
    assert!(
        app.inject_content_manager_component(
            "listView",
            "footer",
            InjectedComponent::new("x", "X")
        )
        .is_err()
    );
}

#[test]
fn test_libraries_accept_one_or_many() {
    let mut app = app();
    app.add_components(Component::new("media-library", "MediaLibrary"))
        .unwrap();
    app.add_components(vec![
        Component::new("color-picker", "ColorPicker"),
        Component::new("media-library", "MediaLibraryV2"),
    ])
    .unwrap();
    assert_eq!(app.components().len(), 2);
    assert_eq!(
        app.components().get("media-library").unwrap().name(),
        "MediaLibraryV2"
    );

    app.add_fields(OneOrMany::One(Field::new("media", "MediaInput")))
        .unwrap();
    assert!(app.fields().get("media").is_some());
}

#[tokio::test]
async fn test_boot_runs_phases_in_order() {
    let a = RecordingExtension::new("a");
    let log = a.log();
    let b = RecordingExtension::new("b").with_log(a.log());

    AdminApp::new(CustomConfiguration::default(), vec![a.shared(), b.shared()])
        .boot()
        .await
        .unwrap();

    assert_eq!(
        *log.lock(),
        vec![
            "a:register",
            "b:register",
            "a:bootstrap",
            "b:bootstrap",
            "a:register_trads",
            "b:register_trads",
        ]
    );
}

#[tokio::test]
async fn test_register_gets_full_registry() {
    let ext = RecordingExtension::new("upload").on_register(|app| {
        app.register_plugin(PluginDescriptor::new("upload", "Media Library"));
        app.create_hook("upload/after-upload");
        app.add_menu_link(test_menu_link("/plugins/upload"))
    });

    let admin = AdminApp::new(CustomConfiguration::default(), vec![ext.shared()])
        .boot()
        .await
        .unwrap();
    assert!(admin.get_plugin("upload").is_some());
    assert!(admin.hooks().contains("upload/after-upload"));
    assert_eq!(admin.menu().len(), 1);
}

#[tokio::test]
async fn test_bootstrap_sees_every_registered_plugin() {
    let seen = Arc::new(parking_lot::Mutex::new(false));
    let flag = Arc::clone(&seen);

    let first = RecordingExtension::new("i18n").on_bootstrap(move |app| {
        *flag.lock() = app.get_plugin("upload").is_some();
        Ok(())
    });
    let second = RecordingExtension::new("upload").on_register(|app| {
        app.register_plugin(PluginDescriptor::new("upload", "Media Library"));
        Ok(())
    });

    AdminApp::new(
        CustomConfiguration::default(),
        vec![first.shared(), second.shared()],
    )
    .boot()
    .await
    .unwrap();
    assert!(*seen.lock());
}

#[tokio::test]
async fn test_custom_bootstrap_gets_broad_capabilities() {
    let ext = RecordingExtension::new("settings").on_bootstrap(|app: &mut dyn PluginBootstrap| {
        app.add_settings_link("global", test_settings_link("webhooks"))
    });

    let counter: SharedReducer = Arc::new(|state: &Value, action: &Action| {
        match action.kind.as_str() {
            "increment" => json!(state.as_i64().unwrap_or(0) + 1),
            _ => json!(state.as_i64().unwrap_or(0)),
        }
    });

    let admin = AdminApp::new(CustomConfiguration::default(), vec![ext.shared()])
        .with_custom_bootstrap(move |app: &mut dyn CustomBootstrap| -> RegistryResult<()> {
            app.add_menu_link(test_menu_link("/plugins/custom"))?;
            app.add_components(OneOrMany::One(Component::new("logo", "Logo")))?;
            app.add_fields(OneOrMany::One(Field::new("color", "ColorInput")))?;
            app.add_reducers(BTreeMap::from([("count".to_string(), Arc::clone(&counter))]));
            app.add_settings_link("global", test_settings_link("branding"))
        })
        .boot()
        .await
        .unwrap();

    let links: Vec<_> = admin
        .settings_section("global")
        .unwrap()
        .links
        .iter()
        .map(|link| link.id.as_str())
        .collect();
    assert_eq!(links, vec!["webhooks", "branding"]);
    assert_eq!(admin.menu().len(), 1);
    assert!(admin.components().get("logo").is_some());
    assert!(admin.fields().get("color").is_some());

    assert!(admin.store().dispatch(Action::new("increment", Value::Null)));
    assert_eq!(admin.store().slice("count"), Some(json!(1)));
}

#[tokio::test]
async fn test_failing_extension_aborts_boot() {
    let bad = RecordingExtension::new("bad")
        .on_register(|app| app.add_settings_link("missing", test_settings_link("x")));
    let after = RecordingExtension::new("after");

    let err = AdminApp::new(
        CustomConfiguration::default(),
        vec![bad.clone().shared(), after.clone().shared()],
    )
    .boot()
    .await
    .unwrap_err();

    assert!(matches!(err, RegistryError::UnknownSection(_)));
    assert::contains(&err.to_string(), "missing");
    assert_eq!(bad.calls(), vec!["bad:register"]);
    assert!(after.calls().is_empty());
}

#[tokio::test]
async fn test_bootstrap_cannot_register_unknown_hook() {
    let ext = RecordingExtension::new("cm").on_bootstrap(|app| {
        app.register_hook(
            "Admin/CM/pages/Unknown",
            atelier_kernel::hook::HookHandler::sync(|input| input.value),
        )
    });
    let err = AdminApp::new(CustomConfiguration::default(), vec![ext.shared()])
        .boot()
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Admin/CM/pages/Unknown"));
}

#[test]
fn test_reducers_and_middlewares_reach_the_store() {
    let first: SharedReducer = Arc::new(|_: &Value, _: &Action| json!("first"));
    let second: SharedReducer = Arc::new(|_: &Value, _: &Action| json!("second"));
    let other: SharedReducer = Arc::new(|state: &Value, _: &Action| state.clone());
    let passthrough: SharedMiddleware = Arc::new(|action: Action, _: &Value| Some(action));

    let mut app = app();
    app.add_reducers(BTreeMap::from([
        ("upload".to_string(), first),
        ("cm".to_string(), other),
    ]));
    app.add_reducers(BTreeMap::from([("upload".to_string(), second)]));
    app.add_middlewares(vec![Arc::clone(&passthrough), passthrough]);

    assert_eq!(app.reducer_keys().collect::<Vec<_>>(), vec!["cm", "upload"]);
    assert_eq!(app.middleware_count(), 2);

    let admin = app.seal();
    let store = admin.store();
    assert_eq!(store.reducer_keys().collect::<Vec<_>>(), vec!["cm", "upload"]);
    assert_eq!(store.slice("upload"), Some(json!("second")));
}
