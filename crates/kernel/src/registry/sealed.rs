//! The read-only registry produced by [`AdminApp::seal`](super::AdminApp::seal).

use std::collections::BTreeMap;

use serde_json::Value;

use super::injected_or_empty;
use crate::customization::AdminConfiguration;
use crate::error::RegistryResult;
use crate::extension::Plugin;
use crate::hook::HookRegistry;
use crate::injection::{InjectedComponent, InjectionZones};
use crate::library::{ComponentLibrary, CustomFieldRegistry, FieldLibrary};
use crate::models::{MenuLink, SettingsSection};
use crate::render::RenderContext;
use crate::store::Store;

/// Everything the extensions registered, frozen.
///
/// There is no way to add to a sealed registry; only hooks can still be run
/// and the store still accepts actions.
#[derive(Debug)]
pub struct SealedAdmin {
    pub(super) configuration: AdminConfiguration,
    pub(super) menu: Vec<MenuLink>,
    pub(super) settings: Vec<SettingsSection>,
    pub(super) components: ComponentLibrary,
    pub(super) fields: FieldLibrary,
    pub(super) custom_fields: CustomFieldRegistry,
    pub(super) plugins: BTreeMap<String, Plugin>,
    pub(super) injection_zones: InjectionZones,
    pub(super) hooks: HookRegistry,
    pub(super) store: Store,
}

impl SealedAdmin {
    pub fn configuration(&self) -> &AdminConfiguration {
        &self.configuration
    }

    pub fn menu(&self) -> &[MenuLink] {
        &self.menu
    }

    pub fn settings(&self) -> &[SettingsSection] {
        &self.settings
    }

    pub fn settings_section(&self, id: &str) -> Option<&SettingsSection> {
        self.settings.iter().find(|section| section.id == id)
    }

    pub fn components(&self) -> &ComponentLibrary {
        &self.components
    }

    pub fn fields(&self) -> &FieldLibrary {
        &self.fields
    }

    pub fn custom_fields(&self) -> &CustomFieldRegistry {
        &self.custom_fields
    }

    pub fn plugins(&self) -> &BTreeMap<String, Plugin> {
        &self.plugins
    }

    pub fn get_plugin(&self, id: &str) -> Option<&Plugin> {
        self.plugins.get(id)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Components injected into a host zone; empty if the zone is unknown.
    pub fn get_admin_injected_components(
        &self,
        module: &str,
        container: &str,
        block: &str,
    ) -> &[InjectedComponent] {
        injected_or_empty(&self.injection_zones, module, container, block)
    }

    pub fn run_hook_series(&self, name: &str) -> RegistryResult<Vec<Value>> {
        self.hooks.run_series(name)
    }

    pub async fn run_hook_series_async(&self, name: &str) -> RegistryResult<Vec<Value>> {
        self.hooks.run_series_async(name).await
    }

    /// Waterfall run with this registry's store handed to every handler.
    pub fn run_hook_waterfall(&self, name: &str, initial: Value) -> RegistryResult<Value> {
        self.hooks.run_waterfall(name, initial, Some(&self.store))
    }

    pub async fn run_hook_waterfall_async(
        &self,
        name: &str,
        initial: Value,
    ) -> RegistryResult<Value> {
        self.hooks
            .run_waterfall_async(name, initial, Some(&self.store))
            .await
    }

    pub async fn run_hook_parallel(&self, name: &str) -> RegistryResult<Vec<Value>> {
        self.hooks.run_parallel(name).await
    }

    /// The context handed to the rendering layer.
    pub fn render_context(&self) -> RenderContext<'_> {
        RenderContext::new(self)
    }
}
