//! Settings sections and their links.

use serde::{Deserialize, Serialize};

use super::component::{ComponentRef, is_renderable};
use super::{IntlLabel, describe};
use crate::error::{RegistryError, RegistryResult};

/// Id of the section that exists from construction.
pub const GLOBAL_SECTION_ID: &str = "global";

/// A link inside a settings section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsLink {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub intl_label: IntlLabel,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub component: Option<ComponentRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
}

impl SettingsLink {
    pub fn new(
        id: impl Into<String>,
        intl_label: IntlLabel,
        to: impl Into<String>,
        component: impl Into<ComponentRef>,
    ) -> Self {
        Self {
            id: id.into(),
            intl_label,
            to: to.into(),
            component: Some(component.into()),
            permissions: Vec::new(),
        }
    }

    /// Check id, label, target and component.
    pub fn validate(&self) -> RegistryResult<()> {
        if self.id.trim().is_empty() {
            return Err(RegistryError::MissingLinkId {
                link: describe(self),
            });
        }
        if !self.intl_label.is_complete() {
            return Err(RegistryError::incomplete_label(describe(self)));
        }
        if self.to.trim().is_empty() {
            return Err(RegistryError::MissingLinkTarget {
                link: describe(self),
            });
        }
        if !is_renderable(self.component.as_ref()) {
            return Err(RegistryError::missing_component("link.Component", &self.id));
        }
        Ok(())
    }
}

/// A named, ordered group of settings links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSection {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub intl_label: IntlLabel,
    #[serde(default)]
    pub links: Vec<SettingsLink>,
}

impl SettingsSection {
    /// Declare an empty section.
    pub fn new(id: impl Into<String>, intl_label: IntlLabel) -> Self {
        Self {
            id: id.into(),
            intl_label,
            links: Vec::new(),
        }
    }

    /// The section every admin starts with.
    pub fn global() -> Self {
        Self::new(
            GLOBAL_SECTION_ID,
            IntlLabel::new("Settings.global", "Global Settings"),
        )
    }

    /// Check the section header (links are validated one by one on insert).
    pub fn validate(&self) -> RegistryResult<()> {
        if self.id.trim().is_empty() {
            return Err(RegistryError::MissingSectionId);
        }
        if !self.intl_label.is_complete() {
            return Err(RegistryError::incomplete_label(format!(
                "section '{}'",
                self.id
            )));
        }
        Ok(())
    }
}
