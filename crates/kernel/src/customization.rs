//! Admin configuration: built-in defaults plus the project's overrides.
//!
//! The defaults are created with the registry. A project may ship a custom
//! configuration file (TOML or JSON) whose values are applied once, during
//! `bootstrap_admin`. Nothing changes the configuration afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::locale::Messages;

/// The locale every admin ships with. It is always first.
pub const DEFAULT_LOCALE: &str = "en";

/// Asset path of the default logo.
pub const DEFAULT_LOGO: &str = "/admin/assets/logo.svg";

/// Asset path of the default favicon.
pub const DEFAULT_FAVICON: &str = "/admin/assets/favicon.png";

/// `<head>` settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Head {
    pub favicon: String,
}

/// Notification toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notifications {
    pub releases: bool,
}

/// Light and dark theme token trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Themes {
    pub light: Value,
    pub dark: Value,
}

impl Default for Themes {
    fn default() -> Self {
        Self {
            light: json!({
                "colors": {
                    "primary100": "#f0f0ff",
                    "primary500": "#7b79ff",
                    "primary600": "#4945ff",
                    "primary700": "#271fe0",
                    "neutral0": "#ffffff",
                    "neutral100": "#f6f6f9",
                    "neutral800": "#32324d",
                    "danger600": "#d02b20",
                    "success600": "#328048"
                },
                "fontSizes": [11, 12, 14, 16, 18, 20, 24, 32],
                "shadows": {
                    "filterShadow": "0px 1px 4px rgba(33, 33, 52, 0.1)"
                }
            }),
            dark: json!({
                "colors": {
                    "primary100": "#181826",
                    "primary500": "#4945ff",
                    "primary600": "#7b79ff",
                    "primary700": "#9593ff",
                    "neutral0": "#212134",
                    "neutral100": "#32324d",
                    "neutral800": "#ffffff",
                    "danger600": "#ee5e52",
                    "success600": "#5cb176"
                },
                "fontSizes": [11, 12, 14, 16, 18, 20, 24, 32],
                "shadows": {
                    "filterShadow": "1px 1px 10px rgba(3, 3, 5, 0.35)"
                }
            }),
        }
    }
}

/// The admin configuration read by the render layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminConfiguration {
    pub auth_logo: String,
    pub head: Head,
    pub locales: Vec<String>,
    pub menu_logo: String,
    pub notifications: Notifications,
    pub themes: Themes,
    pub translations: BTreeMap<String, Messages>,
    pub tutorials: bool,
}

impl Default for AdminConfiguration {
    fn default() -> Self {
        Self {
            auth_logo: DEFAULT_LOGO.to_string(),
            head: Head {
                favicon: DEFAULT_FAVICON.to_string(),
            },
            locales: vec![DEFAULT_LOCALE.to_string()],
            menu_logo: DEFAULT_LOGO.to_string(),
            notifications: Notifications { releases: true },
            themes: Themes::default(),
            translations: BTreeMap::new(),
            tutorials: true,
        }
    }
}

impl AdminConfiguration {
    /// Apply a project's overrides on top of the current values.
    pub fn apply(&mut self, custom: &CustomConfiguration) {
        if let Some(locales) = &custom.locales {
            self.locales = std::iter::once(DEFAULT_LOCALE.to_string())
                .chain(
                    locales
                        .iter()
                        .filter(|locale| locale.as_str() != DEFAULT_LOCALE)
                        .cloned(),
                )
                .collect();
        }

        if let Some(logo) = custom.auth.as_ref().and_then(|auth| auth.logo.clone()) {
            self.auth_logo = logo;
        }

        if let Some(logo) = custom.menu.as_ref().and_then(|menu| menu.logo.clone()) {
            self.menu_logo = logo;
        }

        if let Some(favicon) = custom.head.as_ref().and_then(|head| head.favicon.clone()) {
            self.head.favicon = favicon;
        }

        if let Some(theme) = &custom.theme {
            self.apply_theme(theme);
        }

        if let Some(releases) = custom
            .notifications
            .as_ref()
            .and_then(|notifications| notifications.releases)
        {
            self.notifications.releases = releases;
        }

        if let Some(tutorials) = custom.tutorials {
            self.tutorials = tutorials;
        }

        debug!(locales = ?self.locales, "custom configuration applied");
    }

    fn apply_theme(&mut self, theme: &Value) {
        let light = theme.get("light");
        let dark = theme.get("dark");

        if light.is_none() && dark.is_none() {
            warn!(
                "[deprecated] a flat theme override is applied to the light theme only; \
                 use `theme.light` and `theme.dark` to customize each theme"
            );
            deep_merge(&mut self.themes.light, theme);
        }

        if let Some(light) = light {
            deep_merge(&mut self.themes.light, light);
        }

        if let Some(dark) = dark {
            deep_merge(&mut self.themes.dark, dark);
        }
    }
}

/// Logo override (`auth.logo`, `menu.logo`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogoOverride {
    pub logo: Option<String>,
}

/// `head.favicon` override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadOverride {
    pub favicon: Option<String>,
}

/// `notifications.releases` override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationsOverride {
    pub releases: Option<bool>,
}

/// A project's admin overrides. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomConfiguration {
    #[serde(default)]
    pub locales: Option<Vec<String>>,
    #[serde(default)]
    pub auth: Option<LogoOverride>,
    #[serde(default)]
    pub menu: Option<LogoOverride>,
    #[serde(default)]
    pub head: Option<HeadOverride>,
    /// Either `{ light, dark }` or a legacy flat token tree.
    #[serde(default)]
    pub theme: Option<Value>,
    #[serde(default)]
    pub notifications: Option<NotificationsOverride>,
    #[serde(default)]
    pub tutorials: Option<bool>,
    /// Per-locale messages that win over every other translation source.
    #[serde(default)]
    pub translations: BTreeMap<String, Messages>,
}

impl CustomConfiguration {
    /// Load overrides from a `.json` or `.toml` file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read admin config: {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse admin config JSON at {}", path.display()))
        } else {
            Self::parse_toml(&content)
                .with_context(|| format!("failed to parse admin config TOML at {}", path.display()))
        }
    }

    /// Parse overrides from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let value: toml::Value = toml::from_str(content)?;
        // Round-trip through JSON so `theme` lands as a serde_json::Value.
        let json = serde_json::to_value(value)?;
        Ok(serde_json::from_value(json)?)
    }
}

/// Recursively merge `source` into `target`.
///
/// Objects merge key by key, arrays merge index by index, anything else in
/// `source` replaces the value in `target`.
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(source)) => {
            for (index, value) in source.iter().enumerate() {
                match target.get_mut(index) {
                    Some(existing) => deep_merge(existing, value),
                    None => target.push(value.clone()),
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}
