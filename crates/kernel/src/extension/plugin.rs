//! Registered plugins.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::error::RegistryResult;
use crate::injection::{InjectedComponent, ZoneSet};

/// A value a plugin exposes to other extensions.
pub type PluginApi = Arc<dyn Any + Send + Sync>;

/// What an extension passes to `register_plugin`.
#[derive(Clone, Default)]
pub struct PluginDescriptor {
    pub id: String,
    pub name: String,
    /// Defaults to ready when not set.
    pub is_ready: Option<bool>,
    pub apis: HashMap<String, PluginApi>,
    /// Zones the plugin renders and lets others inject into.
    pub injection_zones: ZoneSet,
}

impl PluginDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn ready(mut self, is_ready: bool) -> Self {
        self.is_ready = Some(is_ready);
        self
    }

    /// Expose a typed API under `name`.
    pub fn with_api<T: Any + Send + Sync>(mut self, name: impl Into<String>, api: T) -> Self {
        self.apis.insert(name.into(), Arc::new(api));
        self
    }

    pub fn with_zone(mut self, container: &str, block: &str) -> Self {
        self.injection_zones.declare(container, block);
        self
    }
}

impl std::fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("is_ready", &self.is_ready)
            .field("apis", &self.apis.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A plugin as stored in the registry.
#[derive(Clone)]
pub struct Plugin {
    id: String,
    name: String,
    is_ready: bool,
    apis: HashMap<String, PluginApi>,
    injection_zones: ZoneSet,
}

impl Plugin {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    /// A typed API, or `None` if absent or of another type.
    pub fn api<T: Any + Send + Sync>(&self, name: &str) -> Option<&T> {
        self.apis.get(name).and_then(|api| api.downcast_ref::<T>())
    }

    pub fn api_names(&self) -> impl Iterator<Item = &str> {
        self.apis.keys().map(String::as_str)
    }

    pub fn injection_zones(&self) -> &ZoneSet {
        &self.injection_zones
    }

    /// Components injected into one of this plugin's zones.
    pub fn get_injected_components(
        &self,
        container: &str,
        block: &str,
    ) -> Option<&[InjectedComponent]> {
        self.injection_zones.get(container, block)
    }

    pub(crate) fn inject_component(
        &mut self,
        container: &str,
        block: &str,
        component: InjectedComponent,
    ) -> RegistryResult<()> {
        let scope = format!("plugin '{}'", self.id);
        self.injection_zones
            .inject(&scope, container, block, component)
    }
}

impl From<PluginDescriptor> for Plugin {
    fn from(descriptor: PluginDescriptor) -> Self {
        Self {
            id: descriptor.id,
            name: descriptor.name,
            is_ready: descriptor.is_ready.unwrap_or(true),
            apis: descriptor.apis,
            injection_zones: descriptor.injection_zones,
        }
    }
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("is_ready", &self.is_ready)
            .field("apis", &self.apis.keys().collect::<Vec<_>>())
            .field("injection_zones", &self.injection_zones)
            .finish()
    }
}

impl Serialize for Plugin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut apis: Vec<&str> = self.api_names().collect();
        apis.sort_unstable();

        let mut state = serializer.serialize_struct("Plugin", 5)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("isReady", &self.is_ready)?;
        state.serialize_field("apis", &apis)?;
        state.serialize_field("injectionZones", &self.injection_zones)?;
        state.end()
    }
}
