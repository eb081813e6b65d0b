//! Extensions shipped with the admin shell.
//!
//! They are what `atelier inspect` boots, and a working reference for
//! extension authors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::RegistryResult;
use crate::extension::{Extension, PluginBootstrap, PluginDescriptor};
use crate::hook::{HookHandler, names};
use crate::injection::InjectedComponent;
use crate::locale::{LocaleMessages, Messages};
use crate::models::{IntlLabel, MenuLink, SettingsLink};
use crate::registry::AdminApp;

/// Every built-in extension, in load order.
pub fn extensions() -> Vec<Arc<dyn Extension>> {
    vec![
        Arc::new(ContentTypeBuilder),
        Arc::new(Upload),
        Arc::new(I18n),
    ]
}

/// Content model editor.
#[derive(Debug, Default)]
pub struct ContentTypeBuilder;

#[async_trait]
impl Extension for ContentTypeBuilder {
    fn id(&self) -> &str {
        "content-type-builder"
    }

    fn register(&self, app: &mut AdminApp) -> RegistryResult<()> {
        app.add_core_plugin_menu_link(MenuLink {
            to: "/plugins/content-type-builder".to_string(),
            intl_label: IntlLabel::new(
                "content-type-builder.plugin.name",
                "Content-Type Builder",
            ),
            component: Some("ContentTypeBuilder.App".into()),
            icon: Some("Layout".into()),
            permissions: vec!["plugin::content-type-builder.read".to_string()],
        })?;
        app.register_plugin(PluginDescriptor::new(
            "content-type-builder",
            "Content-Type Builder",
        ));
        Ok(())
    }

    async fn register_trads(&self, locales: &[String]) -> Option<Vec<LocaleMessages>> {
        Some(prefixed_trads(
            locales,
            "content-type-builder",
            &[("plugin.name", "Content-Type Builder")],
        ))
    }
}

/// Media library.
#[derive(Debug, Default)]
pub struct Upload;

#[async_trait]
impl Extension for Upload {
    fn id(&self) -> &str {
        "upload"
    }

    fn register(&self, app: &mut AdminApp) -> RegistryResult<()> {
        app.add_core_plugin_menu_link(MenuLink {
            to: "/plugins/upload".to_string(),
            intl_label: IntlLabel::new("upload.plugin.name", "Media Library"),
            component: Some("Upload.App".into()),
            icon: Some("Images".into()),
            permissions: vec!["plugin::upload.read".to_string()],
        })?;
        app.register_plugin(
            PluginDescriptor::new("upload", "Media Library").with_zone("assetDialog", "actions"),
        );
        Ok(())
    }

    fn bootstrap(&self, app: &mut dyn PluginBootstrap) -> RegistryResult<()> {
        app.add_settings_link(
            "global",
            SettingsLink::new(
                "media-library-settings",
                IntlLabel::new("upload.plugin.name", "Media Library"),
                "/settings/media-library",
                "Upload.SettingsPage",
            ),
        )
    }

    async fn register_trads(&self, locales: &[String]) -> Option<Vec<LocaleMessages>> {
        Some(prefixed_trads(
            locales,
            "upload",
            &[("plugin.name", "Media Library")],
        ))
    }
}

/// Localized content.
#[derive(Debug, Default)]
pub struct I18n;

#[async_trait]
impl Extension for I18n {
    fn id(&self) -> &str {
        "i18n"
    }

    fn register(&self, app: &mut AdminApp) -> RegistryResult<()> {
        app.register_plugin(PluginDescriptor::new("i18n", "Internationalization"));
        Ok(())
    }

    fn bootstrap(&self, app: &mut dyn PluginBootstrap) -> RegistryResult<()> {
        app.add_settings_link(
            "global",
            SettingsLink::new(
                "internationalization",
                IntlLabel::new("i18n.plugin.name", "Internationalization"),
                "/settings/internationalization",
                "I18n.SettingsPage",
            ),
        )?;
        app.inject_content_manager_component(
            "editView",
            "informations",
            InjectedComponent::new("i18n-locale-filter", "I18n.CMEditViewLocalePicker"),
        )?;
        if app.get_plugin("upload").is_some() {
            app.inject_plugin_component(
                "upload",
                "assetDialog",
                "actions",
                InjectedComponent::new("i18n-asset-locale", "I18n.AssetLocale"),
            )?;
        }
        app.register_hook(
            names::MUTATE_EDIT_VIEW_LAYOUT,
            HookHandler::sync(|input| add_locale_field(input.value)),
        )
    }

    async fn register_trads(&self, locales: &[String]) -> Option<Vec<LocaleMessages>> {
        Some(prefixed_trads(
            locales,
            "i18n",
            &[("plugin.name", "Internationalization")],
        ))
    }
}

/// Mark the layout as localized so the edit view shows the locale picker.
fn add_locale_field(mut layout: Value) -> Value {
    if let Some(object) = layout.as_object_mut() {
        object.insert("i18n".to_string(), json!({ "localized": true }));
    }
    layout
}

/// English-source messages for every requested locale, keyed under `prefix`.
fn prefixed_trads(
    locales: &[String],
    prefix: &str,
    entries: &[(&str, &str)],
) -> Vec<LocaleMessages> {
    let data: Messages = entries
        .iter()
        .map(|(key, value)| (format!("{prefix}.{key}"), (*value).to_string()))
        .collect();
    locales
        .iter()
        .map(|locale| LocaleMessages::new(locale.clone(), data.clone()))
        .collect()
}
