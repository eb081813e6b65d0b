//! The extension registry.
//!
//! [`AdminApp`] is the mutable registration-phase registry. Extensions get a
//! `&mut AdminApp` in `register` and a capability trait object in
//! `bootstrap`. Once the boot phases have run, [`AdminApp::seal`] turns it into
//! a read-only [`SealedAdmin`] that the render layer consumes.
//!
//! Every registration call validates its input and returns a
//! [`RegistryError`] without touching any collection when the input is
//! rejected.

mod lifecycle;
mod sealed;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error};

pub use sealed::SealedAdmin;

use crate::customization::{AdminConfiguration, CustomConfiguration};
use crate::error::{RegistryError, RegistryResult};
use crate::extension::{
    CustomBootstrap, CustomBootstrapFn, Extension, Plugin, PluginBootstrap, PluginDescriptor,
};
use crate::hook::{HookHandler, HookRegistry};
use crate::injection::{ADMIN_MODULE, CONTENT_MANAGER_MODULE, InjectedComponent, InjectionZones};
use crate::library::{
    Component, ComponentLibrary, CustomField, CustomFieldRegistry, Field, FieldLibrary,
};
use crate::locale::{StaticTranslations, TranslationSource};
use crate::models::{MenuLink, OneOrMany, SettingsLink, SettingsSection};
use crate::store::{SharedMiddleware, SharedReducer, Store};

/// The registration-phase registry.
pub struct AdminApp {
    configuration: AdminConfiguration,
    custom_configuration: CustomConfiguration,
    extensions: Vec<Arc<dyn Extension>>,
    custom_bootstrap: Option<Arc<dyn CustomBootstrapFn>>,
    translation_source: Arc<dyn TranslationSource>,
    extension_timeout: Option<Duration>,

    menu: Vec<MenuLink>,
    settings: Vec<SettingsSection>,
    components: ComponentLibrary,
    fields: FieldLibrary,
    custom_fields: CustomFieldRegistry,
    middlewares: Vec<SharedMiddleware>,
    reducers: BTreeMap<String, SharedReducer>,
    plugins: BTreeMap<String, Plugin>,
    injection_zones: InjectionZones,
    hooks: HookRegistry,
}

impl AdminApp {
    /// Create a registry with default configuration, the global settings
    /// section and the host's injection zones.
    ///
    /// `custom_configuration` is only applied once `bootstrap_admin` runs.
    pub fn new(
        custom_configuration: CustomConfiguration,
        extensions: Vec<Arc<dyn Extension>>,
    ) -> Self {
        Self {
            configuration: AdminConfiguration::default(),
            custom_configuration,
            extensions,
            custom_bootstrap: None,
            translation_source: Arc::new(StaticTranslations::new()),
            extension_timeout: None,
            menu: Vec::new(),
            settings: vec![SettingsSection::global()],
            components: ComponentLibrary::default(),
            fields: FieldLibrary::default(),
            custom_fields: CustomFieldRegistry::new(),
            middlewares: Vec::new(),
            reducers: BTreeMap::new(),
            plugins: BTreeMap::new(),
            injection_zones: InjectionZones::host_defaults(),
            hooks: HookRegistry::new(),
        }
    }

    /// Run `bootstrap` after every extension's own bootstrap.
    pub fn with_custom_bootstrap(mut self, bootstrap: impl CustomBootstrapFn + 'static) -> Self {
        self.custom_bootstrap = Some(Arc::new(bootstrap));
        self
    }

    /// Where the admin's own translation files are read from.
    pub fn with_translation_source(mut self, source: impl TranslationSource + 'static) -> Self {
        self.translation_source = Arc::new(source);
        self
    }

    /// Bound every extension translation load and translation file read.
    ///
    /// Without a bound the boot waits as long as an extension takes.
    pub fn with_extension_timeout(mut self, timeout: Duration) -> Self {
        self.extension_timeout = Some(timeout);
        self
    }

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

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn reducer_keys(&self) -> impl Iterator<Item = &str> {
        self.reducers.keys().map(String::as_str)
    }

    pub fn middleware_count(&self) -> usize {
        self.middlewares.len()
    }

    // -------------------------------------------------------------------------
    // Menu
    // -------------------------------------------------------------------------

    /// Append a link to the main menu.
    pub fn add_menu_link(&mut self, link: MenuLink) -> RegistryResult<()> {
        link.validate()?;
        debug!(to = %link.to, "menu link added");
        self.menu.push(link);
        Ok(())
    }

    /// Append a link for one of the core plugins.
    ///
    /// Core plugins may omit the component and icon; only their target and
    /// label are checked.
    pub fn add_core_plugin_menu_link(&mut self, link: MenuLink) -> RegistryResult<()> {
        link.validate_core()?;
        debug!(to = %link.to, "core plugin menu link added");
        self.menu.push(link);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    /// Declare a settings section and fill it with `links`.
    ///
    /// The section and every link are validated before anything is stored.
    pub fn create_setting_section(
        &mut self,
        section: SettingsSection,
        links: Vec<SettingsLink>,
    ) -> RegistryResult<()> {
        section.validate()?;
        if self.settings_section(&section.id).is_some() {
            return Err(RegistryError::DuplicateSection(section.id));
        }
        for link in &links {
            link.validate()?;
        }

        let id = section.id.clone();
        self.settings.push(SettingsSection {
            links: Vec::new(),
            ..section
        });
        debug!(section = %id, "settings section created");
        self.add_settings_links(&id, links)
    }

    /// Append a link to an existing section.
    pub fn add_settings_link(
        &mut self,
        section_id: &str,
        link: SettingsLink,
    ) -> RegistryResult<()> {
        self.add_settings_links(section_id, vec![link])
    }

    /// Append links to an existing section, in order.
    ///
    /// Either every link is added or none is.
    pub fn add_settings_links(
        &mut self,
        section_id: &str,
        links: Vec<SettingsLink>,
    ) -> RegistryResult<()> {
        let section = self
            .settings
            .iter_mut()
            .find(|section| section.id == section_id)
            .ok_or_else(|| RegistryError::UnknownSection(section_id.to_string()))?;

        for link in &links {
            link.validate()?;
        }

        for link in links {
            debug!(section = %section_id, link = %link.id, "settings link added");
            section.links.push(link);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Plugins
    // -------------------------------------------------------------------------

    /// Store a plugin under its id. A later registration with the same id
    /// replaces the earlier one.
    pub fn register_plugin(&mut self, descriptor: PluginDescriptor) {
        let plugin = Plugin::from(descriptor);
        let id = plugin.id().to_string();
        if self.plugins.insert(id.clone(), plugin).is_some() {
            debug!(plugin = %id, "plugin re-registered, previous descriptor replaced");
        } else {
            debug!(plugin = %id, "plugin registered");
        }
    }

    pub fn get_plugin(&self, id: &str) -> Option<&Plugin> {
        self.plugins.get(id)
    }

    pub fn plugins(&self) -> impl Iterator<Item = &Plugin> {
        self.plugins.values()
    }

    // -------------------------------------------------------------------------
    // Injection zones
    // -------------------------------------------------------------------------

    pub fn inject_content_manager_component(
        &mut self,
        container: &str,
        block: &str,
        component: InjectedComponent,
    ) -> RegistryResult<()> {
        self.inject(CONTENT_MANAGER_MODULE, container, block, component)
    }

    pub fn inject_admin_component(
        &mut self,
        container: &str,
        block: &str,
        component: InjectedComponent,
    ) -> RegistryResult<()> {
        self.inject(ADMIN_MODULE, container, block, component)
    }

    /// Inject into a zone declared by a registered plugin.
    pub fn inject_plugin_component(
        &mut self,
        plugin_id: &str,
        container: &str,
        block: &str,
        component: InjectedComponent,
    ) -> RegistryResult<()> {
        let plugin = self
            .plugins
            .get_mut(plugin_id)
            .ok_or_else(|| RegistryError::UnknownPlugin(plugin_id.to_string()))?;
        debug!(plugin = %plugin_id, container, block, name = %component.name, "component injected");
        plugin.inject_component(container, block, component)
    }

    fn inject(
        &mut self,
        module: &str,
        container: &str,
        block: &str,
        component: InjectedComponent,
    ) -> RegistryResult<()> {
        debug!(module, container, block, name = %component.name, "component injected");
        self.injection_zones.inject(module, container, block, component)
    }

    /// Components injected into a host zone, in injection order.
    pub fn get_admin_injected_components(
        &self,
        module: &str,
        container: &str,
        block: &str,
    ) -> &[InjectedComponent] {
        injected_or_empty(&self.injection_zones, module, container, block)
    }

    // -------------------------------------------------------------------------
    // Hooks
    // -------------------------------------------------------------------------

    /// Declare a hook, replacing any hook of the same name.
    pub fn create_hook(&mut self, name: &str) {
        self.hooks.create(name);
    }

    /// Attach a handler to a hook declared with `create_hook`.
    pub fn register_hook(&mut self, name: &str, handler: HookHandler) -> RegistryResult<()> {
        self.hooks.register(name, handler)
    }

    pub fn run_hook_series(&self, name: &str) -> RegistryResult<Vec<Value>> {
        self.hooks.run_series(name)
    }

    pub async fn run_hook_series_async(&self, name: &str) -> RegistryResult<Vec<Value>> {
        self.hooks.run_series_async(name).await
    }

    pub fn run_hook_waterfall(
        &self,
        name: &str,
        initial: Value,
        store: Option<&Store>,
    ) -> RegistryResult<Value> {
        self.hooks.run_waterfall(name, initial, store)
    }

    pub async fn run_hook_waterfall_async(
        &self,
        name: &str,
        initial: Value,
        store: Option<&Store>,
    ) -> RegistryResult<Value> {
        self.hooks.run_waterfall_async(name, initial, store).await
    }

    pub async fn run_hook_parallel(&self, name: &str) -> RegistryResult<Vec<Value>> {
        self.hooks.run_parallel(name).await
    }

    // -------------------------------------------------------------------------
    // Libraries and store
    // -------------------------------------------------------------------------

    pub fn add_components(
        &mut self,
        components: impl Into<OneOrMany<Component>>,
    ) -> RegistryResult<()> {
        for component in components.into().into_vec() {
            debug!(name = %component.name, "library component added");
            self.components.add(component)?;
        }
        Ok(())
    }

    pub fn add_fields(&mut self, fields: impl Into<OneOrMany<Field>>) -> RegistryResult<()> {
        for field in fields.into().into_vec() {
            debug!(field_type = %field.field_type, "library field added");
            self.fields.add(field)?;
        }
        Ok(())
    }

    pub fn register_custom_field(&mut self, field: CustomField) -> RegistryResult<()> {
        self.custom_fields.register(field)
    }

    /// Append middlewares to the dispatch chain, in order.
    pub fn add_middlewares(&mut self, middlewares: Vec<SharedMiddleware>) {
        debug!(count = middlewares.len(), "middlewares added");
        self.middlewares.extend(middlewares);
    }

    /// Register reducers by key. A later reducer for a key replaces the
    /// earlier one.
    pub fn add_reducers(&mut self, reducers: BTreeMap<String, SharedReducer>) {
        for (key, reducer) in reducers {
            if self.reducers.insert(key.clone(), reducer).is_some() {
                debug!(reducer = %key, "reducer replaced");
            } else {
                debug!(reducer = %key, "reducer added");
            }
        }
    }
}

impl std::fmt::Debug for AdminApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminApp")
            .field(
                "extensions",
                &self.extensions.iter().map(|e| e.id()).collect::<Vec<_>>(),
            )
            .field("menu", &self.menu.len())
            .field("settings", &self.settings.len())
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .field("hooks", &self.hooks)
            .field("extension_timeout", &self.extension_timeout)
            .finish()
    }
}

/// Look up a host zone, logging and returning an empty list when the path
/// was never declared.
fn injected_or_empty<'a>(
    zones: &'a InjectionZones,
    module: &str,
    container: &str,
    block: &str,
) -> &'a [InjectedComponent] {
    match zones.get(module, container, block) {
        Some(components) => components,
        None => {
            error!(
                module,
                container,
                block,
                "cannot get injected components: zone is not declared"
            );
            &[]
        }
    }
}

impl PluginBootstrap for AdminApp {
    fn add_settings_link(&mut self, section_id: &str, link: SettingsLink) -> RegistryResult<()> {
        AdminApp::add_settings_link(self, section_id, link)
    }

    fn add_settings_links(
        &mut self,
        section_id: &str,
        links: Vec<SettingsLink>,
    ) -> RegistryResult<()> {
        AdminApp::add_settings_links(self, section_id, links)
    }

    fn get_plugin(&self, id: &str) -> Option<&Plugin> {
        AdminApp::get_plugin(self, id)
    }

    fn inject_content_manager_component(
        &mut self,
        container: &str,
        block: &str,
        component: InjectedComponent,
    ) -> RegistryResult<()> {
        AdminApp::inject_content_manager_component(self, container, block, component)
    }

    fn inject_admin_component(
        &mut self,
        container: &str,
        block: &str,
        component: InjectedComponent,
    ) -> RegistryResult<()> {
        AdminApp::inject_admin_component(self, container, block, component)
    }

    fn inject_plugin_component(
        &mut self,
        plugin_id: &str,
        container: &str,
        block: &str,
        component: InjectedComponent,
    ) -> RegistryResult<()> {
        AdminApp::inject_plugin_component(self, plugin_id, container, block, component)
    }

    fn register_hook(&mut self, name: &str, handler: HookHandler) -> RegistryResult<()> {
        AdminApp::register_hook(self, name, handler)
    }
}

impl CustomBootstrap for AdminApp {
    fn add_components(&mut self, components: OneOrMany<Component>) -> RegistryResult<()> {
        AdminApp::add_components(self, components)
    }

    fn add_fields(&mut self, fields: OneOrMany<Field>) -> RegistryResult<()> {
        AdminApp::add_fields(self, fields)
    }

    fn add_menu_link(&mut self, link: MenuLink) -> RegistryResult<()> {
        AdminApp::add_menu_link(self, link)
    }

    fn add_reducers(&mut self, reducers: BTreeMap<String, SharedReducer>) {
        AdminApp::add_reducers(self, reducers)
    }
}
