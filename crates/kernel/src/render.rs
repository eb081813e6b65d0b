//! The render context: the single read-only view the rendering layer gets.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::customization::Themes;
use crate::error::RegistryResult;
use crate::extension::Plugin;
use crate::injection::InjectedComponent;
use crate::library::{ComponentLibrary, CustomFieldRegistry, FieldLibrary};
use crate::locale::{Messages, locale_names};
use crate::models::{MenuLink, SettingsSection};
use crate::registry::SealedAdmin;
use crate::store::Store;

/// Borrowed view over a sealed registry.
///
/// Serializing it gives a JSON snapshot of everything the shell renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext<'a> {
    pub auth_logo: &'a str,
    pub components: &'a ComponentLibrary,
    pub fields: &'a FieldLibrary,
    pub custom_fields: &'a CustomFieldRegistry,
    pub locale_names: BTreeMap<String, String>,
    pub messages: &'a BTreeMap<String, Messages>,
    pub menu: &'a [MenuLink],
    pub menu_logo: &'a str,
    pub plugins: &'a BTreeMap<String, Plugin>,
    pub themes: &'a Themes,
    pub settings: &'a [SettingsSection],
    pub show_tutorials: bool,
    pub show_release_notification: bool,
    pub store: &'a Store,
    pub favicon: &'a str,
    #[serde(skip)]
    admin: &'a SealedAdmin,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(admin: &'a SealedAdmin) -> Self {
        let configuration = admin.configuration();
        Self {
            auth_logo: &configuration.auth_logo,
            components: admin.components(),
            fields: admin.fields(),
            custom_fields: admin.custom_fields(),
            locale_names: locale_names(&configuration.locales),
            messages: &configuration.translations,
            menu: admin.menu(),
            menu_logo: &configuration.menu_logo,
            plugins: admin.plugins(),
            themes: &configuration.themes,
            settings: admin.settings(),
            show_tutorials: configuration.tutorials,
            show_release_notification: configuration.notifications.releases,
            store: admin.store(),
            favicon: &configuration.head.favicon,
            admin,
        }
    }

    pub fn get_admin_injected_components(
        &self,
        module: &str,
        container: &str,
        block: &str,
    ) -> &'a [InjectedComponent] {
        self.admin
            .get_admin_injected_components(module, container, block)
    }

    pub fn get_plugin(&self, id: &str) -> Option<&'a Plugin> {
        self.admin.get_plugin(id)
    }

    pub fn run_hook_series(&self, name: &str) -> RegistryResult<Vec<Value>> {
        self.admin.run_hook_series(name)
    }

    pub async fn run_hook_series_async(&self, name: &str) -> RegistryResult<Vec<Value>> {
        self.admin.run_hook_series_async(name).await
    }

    /// Waterfall run; handlers receive the store bound to this context.
    pub fn run_hook_waterfall(&self, name: &str, initial: Value) -> RegistryResult<Value> {
        self.admin.run_hook_waterfall(name, initial)
    }

    pub async fn run_hook_waterfall_async(
        &self,
        name: &str,
        initial: Value,
    ) -> RegistryResult<Value> {
        self.admin.run_hook_waterfall_async(name, initial).await
    }

    pub async fn run_hook_parallel(&self, name: &str) -> RegistryResult<Vec<Value>> {
        self.admin.run_hook_parallel(name).await
    }
}
