//! Main navigation links.
//!
//! Links are immutable once added to the registry. Their order in the menu is
//! the order in which extensions added them.

use serde::{Deserialize, Serialize};

use super::component::{ComponentRef, is_renderable};
use super::{IntlLabel, describe};
use crate::error::{RegistryError, RegistryResult};

/// Paths that `add_core_plugin_menu_link` accepts.
pub const CORE_PLUGIN_LINKS: &[&str] = &["/plugins/content-type-builder", "/plugins/upload"];

/// A link in the left-hand navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuLink {
    /// Destination path (e.g. "/plugins/upload").
    #[serde(default)]
    pub to: String,

    /// Label shown in the menu.
    #[serde(default)]
    pub intl_label: IntlLabel,

    /// Page rendered when the link is followed.
    #[serde(default)]
    pub component: Option<ComponentRef>,

    /// Icon shown next to the label.
    #[serde(default)]
    pub icon: Option<ComponentRef>,

    /// Permissions required to see the link (empty = everyone).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
}

impl MenuLink {
    /// Create a complete menu link.
    pub fn new(
        to: impl Into<String>,
        intl_label: IntlLabel,
        component: impl Into<ComponentRef>,
        icon: impl Into<ComponentRef>,
    ) -> Self {
        Self {
            to: to.into(),
            intl_label,
            component: Some(component.into()),
            icon: Some(icon.into()),
            permissions: Vec::new(),
        }
    }

    /// Require the given permissions.
    pub fn with_permissions(mut self, permissions: Vec<String>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Check the target and label, the subset shared by core plugin links.
    pub(crate) fn validate_target_and_label(&self) -> RegistryResult<()> {
        if self.to.trim().is_empty() {
            return Err(RegistryError::MissingLinkTarget {
                link: describe(self),
            });
        }
        if !self.intl_label.is_complete() {
            return Err(RegistryError::incomplete_label(describe(self)));
        }
        Ok(())
    }

    /// Check every field a regular menu link must carry.
    pub fn validate(&self) -> RegistryResult<()> {
        self.validate_target_and_label()?;
        if !is_renderable(self.component.as_ref()) {
            return Err(RegistryError::missing_component("link.Component", &self.to));
        }
        if !is_renderable(self.icon.as_ref()) {
            return Err(RegistryError::missing_component("link.icon", &self.to));
        }
        Ok(())
    }

    /// Check a core plugin link: target, label, allow-list.
    pub fn validate_core(&self) -> RegistryResult<()> {
        self.validate_target_and_label()?;
        if !CORE_PLUGIN_LINKS.contains(&self.to.as_str()) {
            return Err(RegistryError::core_link_not_allowed(
                &self.to,
                CORE_PLUGIN_LINKS,
            ));
        }
        Ok(())
    }
}
