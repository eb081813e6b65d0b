//! Injection zones: pre-declared UI slots that extensions append components to.
//!
//! Zones are organized as module → container → block. The host declares every
//! zone up front; injecting into an undeclared path is an error rather than a
//! silent creation. Components render in injection order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};
use crate::models::ComponentRef;

/// Module key for zones owned by the admin shell itself.
pub const ADMIN_MODULE: &str = "admin";

/// Module key for zones owned by the content manager.
pub const CONTENT_MANAGER_MODULE: &str = "contentManager";

/// A component contributed to a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectedComponent {
    /// Identifier used by the rendering layer as a key.
    pub name: String,
    /// The component to render.
    pub component: ComponentRef,
}

impl InjectedComponent {
    pub fn new(name: impl Into<String>, component: impl Into<ComponentRef>) -> Self {
        Self {
            name: name.into(),
            component: component.into(),
        }
    }
}

/// Zones of one module (or one plugin): container → block → components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneSet {
    containers: BTreeMap<String, BTreeMap<String, Vec<InjectedComponent>>>,
}

impl ZoneSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an empty block, builder style.
    pub fn with_block(mut self, container: &str, block: &str) -> Self {
        self.declare(container, block);
        self
    }

    /// Declare an empty block. Declaring an existing block keeps its contents.
    pub fn declare(&mut self, container: &str, block: &str) {
        self.containers
            .entry(container.to_string())
            .or_default()
            .entry(block.to_string())
            .or_default();
    }

    /// Append a component to a declared block.
    ///
    /// `scope` only names the owner in the error message.
    pub fn inject(
        &mut self,
        scope: &str,
        container: &str,
        block: &str,
        component: InjectedComponent,
    ) -> RegistryResult<()> {
        let Some(slot) = self
            .containers
            .get_mut(container)
            .and_then(|blocks| blocks.get_mut(block))
        else {
            return Err(RegistryError::undeclared_zone(scope, container, block));
        };

        if !component.component.is_valid() {
            return Err(RegistryError::missing_component(
                "component",
                format!("{container}.{block}"),
            ));
        }

        slot.push(component);
        Ok(())
    }

    /// Components of a block in injection order, or `None` if undeclared.
    pub fn get(&self, container: &str, block: &str) -> Option<&[InjectedComponent]> {
        self.containers
            .get(container)
            .and_then(|blocks| blocks.get(block))
            .map(Vec::as_slice)
    }
}

/// The full zone tree declared by the host shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InjectionZones {
    modules: BTreeMap<String, ZoneSet>,
}

impl Default for InjectionZones {
    fn default() -> Self {
        Self::host_defaults()
    }
}

impl InjectionZones {
    /// The zones the admin shell renders.
    pub fn host_defaults() -> Self {
        let mut modules = BTreeMap::new();
        modules.insert(
            ADMIN_MODULE.to_string(),
            ZoneSet::new().with_block("tutorials", "links"),
        );
        modules.insert(
            CONTENT_MANAGER_MODULE.to_string(),
            ZoneSet::new()
                .with_block("editView", "informations")
                .with_block("editView", "right-links")
                .with_block("listView", "actions")
                .with_block("listView", "deleteModalAdditionalInfos")
                .with_block("listView", "publishModalAdditionalInfos")
                .with_block("listView", "unpublishModalAdditionalInfos"),
        );
        Self { modules }
    }

    /// Append a component to `module.container.block`.
    pub fn inject(
        &mut self,
        module: &str,
        container: &str,
        block: &str,
        component: InjectedComponent,
    ) -> RegistryResult<()> {
        match self.modules.get_mut(module) {
            Some(zones) => zones.inject(&scope_label(module), container, block, component),
            None => Err(RegistryError::undeclared_zone(
                scope_label(module),
                container,
                block,
            )),
        }
    }

    /// Components of a block, or `None` if any part of the path is undeclared.
    pub fn get(&self, module: &str, container: &str, block: &str) -> Option<&[InjectedComponent]> {
        self.modules
            .get(module)
            .and_then(|zones| zones.get(container, block))
    }
}

fn scope_label(module: &str) -> String {
    match module {
        ADMIN_MODULE => "the admin".to_string(),
        CONTENT_MANAGER_MODULE => "the content manager".to_string(),
        other => format!("module '{other}'"),
    }
}
