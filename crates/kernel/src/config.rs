//! Process configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::customization::CustomConfiguration;

/// Default directory holding `<locale>.json` admin translation files.
pub const DEFAULT_TRANSLATIONS_DIR: &str = "./translations";

/// Process configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Path to the project's admin overrides, TOML or JSON (ATELIER_ADMIN_CONFIG).
    pub admin_config: Option<PathBuf>,

    /// Directory of admin translation files (default: ./translations).
    pub translations_dir: PathBuf,

    /// Upper bound for each extension's translation loading. Unset means no
    /// bound.
    pub extension_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let admin_config = lookup("ATELIER_ADMIN_CONFIG")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let translations_dir = lookup("ATELIER_TRANSLATIONS_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TRANSLATIONS_DIR.to_string())
            .into();

        let extension_timeout = lookup("ATELIER_EXTENSION_TIMEOUT_SECS")
            .map(|secs| {
                secs.trim()
                    .parse::<u64>()
                    .context("ATELIER_EXTENSION_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(Self {
            admin_config,
            translations_dir,
            extension_timeout,
        })
    }

    /// Read the admin overrides file, or the empty override when none is set.
    pub fn load_custom_configuration(&self) -> Result<CustomConfiguration> {
        match &self.admin_config {
            Some(path) => CustomConfiguration::from_path(path),
            None => Ok(CustomConfiguration::default()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.admin_config, None);
        assert_eq!(config.translations_dir, PathBuf::from(DEFAULT_TRANSLATIONS_DIR));
        assert_eq!(config.extension_timeout, None);
        assert_eq!(
            config.load_custom_configuration().unwrap(),
            CustomConfiguration::default()
        );
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("ATELIER_ADMIN_CONFIG", "admin.toml"),
            ("ATELIER_TRANSLATIONS_DIR", "/srv/translations"),
            ("ATELIER_EXTENSION_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.admin_config, Some(PathBuf::from("admin.toml")));
        assert_eq!(config.translations_dir, PathBuf::from("/srv/translations"));
        assert_eq!(config.extension_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn zero_timeout_means_unbounded() {
        let config =
            Config::from_lookup(lookup(&[("ATELIER_EXTENSION_TIMEOUT_SECS", "0")])).unwrap();
        assert_eq!(config.extension_timeout, None);
    }

    #[test]
    fn invalid_timeout_is_an_error() {
        let err = Config::from_lookup(lookup(&[("ATELIER_EXTENSION_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("ATELIER_EXTENSION_TIMEOUT_SECS"));
    }
}
