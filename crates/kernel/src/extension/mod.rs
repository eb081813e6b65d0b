//! The extension contract.
//!
//! An extension is an independently loaded unit that contributes menu links,
//! settings, plugins, hooks or reducers. The host calls each extension at
//! fixed points of the boot:
//!
//! 1. `register` during `initialize`, with full access to the registry.
//! 2. `bootstrap` during `bootstrap`, with the narrow [`PluginBootstrap`]
//!    capability set.
//! 3. `register_trads` during `load_trads`, to contribute messages.

mod capability;
mod plugin;

use async_trait::async_trait;

pub use capability::{CustomBootstrap, PluginBootstrap};
pub use plugin::{Plugin, PluginDescriptor, PluginApi};

use crate::error::RegistryResult;
use crate::locale::LocaleMessages;
use crate::registry::AdminApp;

/// A unit of admin functionality loaded by the host.
#[async_trait]
pub trait Extension: Send + Sync {
    /// Stable identifier, used in logs and timeout errors.
    fn id(&self) -> &str;

    /// Contribute to the registry. Runs once, in registration order.
    fn register(&self, app: &mut AdminApp) -> RegistryResult<()>;

    /// Wire cross-extension behavior once every extension is registered.
    fn bootstrap(&self, _app: &mut dyn PluginBootstrap) -> RegistryResult<()> {
        Ok(())
    }

    /// Messages for the requested locales, or `None` if the extension ships
    /// no translations.
    async fn register_trads(&self, _locales: &[String]) -> Option<Vec<LocaleMessages>> {
        None
    }
}

/// The project's own bootstrap, run after every extension's `bootstrap`.
///
/// Blanket-implemented for closures.
pub trait CustomBootstrapFn: Send + Sync {
    fn run(&self, app: &mut dyn CustomBootstrap) -> RegistryResult<()>;
}

impl<F> CustomBootstrapFn for F
where
    F: Fn(&mut dyn CustomBootstrap) -> RegistryResult<()> + Send + Sync,
{
    fn run(&self, app: &mut dyn CustomBootstrap) -> RegistryResult<()> {
        self(app)
    }
}
