#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Render context tests: what the shell receives once the registry is sealed.

use atelier_kernel::AdminApp;
use atelier_kernel::builtin;
use atelier_kernel::customization::{CustomConfiguration, LogoOverride};
use atelier_kernel::hook::names;
use atelier_test_utils::assert;
use serde_json::json;

async fn booted(custom: CustomConfiguration) -> atelier_kernel::SealedAdmin {
    AdminApp::new(custom, builtin::extensions())
        .boot()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_render_context_shape() {
    let admin = booted(CustomConfiguration::default()).await;
    let value = serde_json::to_value(admin.render_context()).unwrap();

    for key in [
        "authLogo",
        "components",
        "fields",
        "customFields",
        "localeNames",
        "messages",
        "menu",
        "menuLogo",
        "plugins",
        "themes",
        "settings",
        "showTutorials",
        "showReleaseNotification",
        "store",
        "favicon",
    ] {
        assert::has_key(&value, key);
    }

    assert_eq!(value["localeNames"], json!({ "en": "English" }));
    assert_eq!(value["plugins"]["upload"]["name"], json!("Media Library"));
    assert_eq!(value["settings"][0]["id"], json!("global"));
    assert_eq!(value["menu"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_overrides_reach_the_render_context() {
    let custom = CustomConfiguration {
        locales: Some(vec!["fr".to_string()]),
        menu: Some(LogoOverride {
            logo: Some("/custom/menu.svg".to_string()),
        }),
        tutorials: Some(false),
        ..Default::default()
    };
    let admin = booted(custom).await;
    let context = admin.render_context();

    assert_eq!(context.menu_logo, "/custom/menu.svg");
    assert!(!context.show_tutorials);
    assert!(context.show_release_notification);
    assert_eq!(context.locale_names["fr"], "Français");
    assert!(context.messages.contains_key("fr"));
}

#[tokio::test]
async fn test_render_context_reads_injections_and_hooks() {
    let admin = booted(CustomConfiguration::default()).await;
    let context = admin.render_context();

    let informations =
        context.get_admin_injected_components("contentManager", "editView", "informations");
    assert_eq!(informations.len(), 1);
    assert_eq!(informations[0].name, "i18n-locale-filter");

    assert!(
        context
            .get_admin_injected_components("admin", "nowhere", "at-all")
            .is_empty()
    );
    assert!(context.get_plugin("i18n").is_some());

    let layout = context
        .run_hook_waterfall(names::MUTATE_EDIT_VIEW_LAYOUT, json!({}))
        .unwrap();
    assert_eq!(layout["i18n"]["localized"], json!(true));
}
