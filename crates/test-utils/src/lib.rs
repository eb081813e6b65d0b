//! Atelier test utilities.
//!
//! Helpers for integration testing: model fixtures, a scriptable extension
//! that records what the registry asked of it, scratch directories and
//! assertion utilities.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

use atelier_kernel::extension::{Extension, PluginBootstrap};
use atelier_kernel::locale::LocaleMessages;
use atelier_kernel::models::{IntlLabel, MenuLink, SettingsLink, SettingsSection};
use atelier_kernel::registry::AdminApp;
use atelier_kernel::RegistryResult;

/// Create a complete menu link pointing at `to`.
pub fn test_menu_link(to: &str) -> MenuLink {
    let name = to.trim_start_matches('/').replace('/', ".");
    MenuLink::new(
        to,
        IntlLabel::new(format!("{name}.label"), name.clone()),
        format!("{name}.Page"),
        format!("{name}.Icon"),
    )
}

/// Create a complete settings link with the given id.
pub fn test_settings_link(id: &str) -> SettingsLink {
    SettingsLink::new(
        id,
        IntlLabel::new(format!("settings.{id}"), id),
        format!("/settings/{id}"),
        "Settings.Page",
    )
}

/// Create an empty settings section with the given id.
pub fn test_section(id: &str) -> SettingsSection {
    SettingsSection::new(id, IntlLabel::new(format!("{id}.section"), id))
}

type RegisterFn = dyn Fn(&mut AdminApp) -> RegistryResult<()> + Send + Sync;
type BootstrapFn = dyn Fn(&mut dyn PluginBootstrap) -> RegistryResult<()> + Send + Sync;

/// Shared, ordered record of extension calls, e.g. `"upload:register"`.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// An extension whose phases are closures, recording every call.
#[derive(Clone)]
pub struct RecordingExtension {
    id: String,
    log: CallLog,
    register: Option<Arc<RegisterFn>>,
    bootstrap: Option<Arc<BootstrapFn>>,
    trads: Option<Vec<LocaleMessages>>,
}

impl RecordingExtension {
    /// An extension that does nothing but record calls.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            log: Arc::new(Mutex::new(Vec::new())),
            register: None,
            bootstrap: None,
            trads: None,
        }
    }

    /// Record into an existing log, to observe ordering across extensions.
    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    pub fn on_register(
        mut self,
        f: impl Fn(&mut AdminApp) -> RegistryResult<()> + Send + Sync + 'static,
    ) -> Self {
        self.register = Some(Arc::new(f));
        self
    }

    pub fn on_bootstrap(
        mut self,
        f: impl Fn(&mut dyn PluginBootstrap) -> RegistryResult<()> + Send + Sync + 'static,
    ) -> Self {
        self.bootstrap = Some(Arc::new(f));
        self
    }

    /// Messages returned from `register_trads`.
    pub fn with_trads(mut self, trads: Vec<LocaleMessages>) -> Self {
        self.trads = Some(trads);
        self
    }

    pub fn log(&self) -> CallLog {
        Arc::clone(&self.log)
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    /// Box as a trait object for `AdminApp::new`.
    pub fn shared(self) -> Arc<dyn Extension> {
        Arc::new(self)
    }

    fn record(&self, phase: &str) {
        self.log.lock().push(format!("{}:{phase}", self.id));
    }
}

#[async_trait]
impl Extension for RecordingExtension {
    fn id(&self) -> &str {
        &self.id
    }

    fn register(&self, app: &mut AdminApp) -> RegistryResult<()> {
        self.record("register");
        match &self.register {
            Some(f) => f(app),
            None => Ok(()),
        }
    }

    fn bootstrap(&self, app: &mut dyn PluginBootstrap) -> RegistryResult<()> {
        self.record("bootstrap");
        match &self.bootstrap {
            Some(f) => f(app),
            None => Ok(()),
        }
    }

    async fn register_trads(&self, _locales: &[String]) -> Option<Vec<LocaleMessages>> {
        self.record("register_trads");
        self.trads.clone()
    }
}

/// A scratch directory under the system temp dir, removed on drop.
#[derive(Debug)]
pub struct TestDir {
    path: PathBuf,
}

impl TestDir {
    /// Create a fresh, uniquely named directory.
    pub fn new(prefix: &str) -> Self {
        let path = std::env::temp_dir().join(format!("atelier-{prefix}-{}", Uuid::now_v7()));
        std::fs::create_dir_all(&path).unwrap_or_else(|e| {
            panic!("failed to create test dir {}: {e}", path.display())
        });
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a file relative to the directory.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path.join(name);
        std::fs::write(&path, content)
            .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
        path
    }

    /// Read a file relative to the directory.
    pub fn read(&self, name: &str) -> String {
        let path = self.path.join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Assertion helpers.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_are_valid() {
        assert!(test_menu_link("/plugins/upload").validate().is_ok());
        assert!(test_settings_link("media").validate().is_ok());
        assert!(test_section("email").validate().is_ok());
    }

    #[test]
    fn test_dir_is_removed_on_drop() {
        let path = {
            let dir = TestDir::new("drop");
            dir.write("a.json", "{}");
            assert_eq!(dir.read("a.json"), "{}");
            dir.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
