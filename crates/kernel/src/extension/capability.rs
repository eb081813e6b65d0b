//! Capability sets handed to bootstrap code.
//!
//! Extensions get [`PluginBootstrap`]; the project's custom bootstrap gets
//! [`CustomBootstrap`], which adds the library, menu and reducer operations.
//! Both are object safe so the registry can hand itself out as `&mut dyn`.

use std::collections::BTreeMap;

use crate::error::RegistryResult;
use crate::hook::HookHandler;
use crate::injection::InjectedComponent;
use crate::library::{Component, Field};
use crate::models::{MenuLink, OneOrMany, SettingsLink};
use crate::store::SharedReducer;

use super::Plugin;

/// Operations available to an extension's `bootstrap`.
pub trait PluginBootstrap {
    fn add_settings_link(&mut self, section_id: &str, link: SettingsLink) -> RegistryResult<()>;

    fn add_settings_links(
        &mut self,
        section_id: &str,
        links: Vec<SettingsLink>,
    ) -> RegistryResult<()>;

    fn get_plugin(&self, id: &str) -> Option<&Plugin>;

    fn inject_content_manager_component(
        &mut self,
        container: &str,
        block: &str,
        component: InjectedComponent,
    ) -> RegistryResult<()>;

    fn inject_admin_component(
        &mut self,
        container: &str,
        block: &str,
        component: InjectedComponent,
    ) -> RegistryResult<()>;

    fn inject_plugin_component(
        &mut self,
        plugin_id: &str,
        container: &str,
        block: &str,
        component: InjectedComponent,
    ) -> RegistryResult<()>;

    fn register_hook(&mut self, name: &str, handler: HookHandler) -> RegistryResult<()>;
}

/// Operations available to the project's custom bootstrap.
pub trait CustomBootstrap: PluginBootstrap {
    fn add_components(&mut self, components: OneOrMany<Component>) -> RegistryResult<()>;

    fn add_fields(&mut self, fields: OneOrMany<Field>) -> RegistryResult<()>;

    fn add_menu_link(&mut self, link: MenuLink) -> RegistryResult<()>;

    fn add_reducers(&mut self, reducers: BTreeMap<String, SharedReducer>);
}
