//! Boot phases of the registry.
//!
//! The host runs them in this order: `bootstrap_admin`, `initialize`,
//! `bootstrap`, `load_trads`, then `seal`. [`AdminApp::boot`] does all of it.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::{AdminApp, SealedAdmin};
use crate::error::{RegistryError, RegistryResult};
use crate::hook::names;
use crate::locale::{Messages, collect_contributions, merge_layers};
use crate::store::Store;

/// Name reported in timeout errors for the admin's own translation files.
const ADMIN_TRANSLATIONS: &str = "admin";

impl AdminApp {
    /// Run every boot phase and seal the registry.
    pub async fn boot(mut self) -> RegistryResult<SealedAdmin> {
        self.bootstrap_admin();
        self.initialize()?;
        self.bootstrap()?;
        self.load_trads().await?;
        Ok(self.seal())
    }

    /// Apply the custom configuration and declare the built-in hooks.
    pub fn bootstrap_admin(&mut self) {
        self.create_custom_configurations();
        for name in names::BUILTIN {
            self.create_hook(name);
        }
        info!(hooks = names::BUILTIN.len(), "admin bootstrapped");
    }

    /// Merge the project's overrides into the admin configuration.
    pub fn create_custom_configurations(&mut self) {
        self.configuration.apply(&self.custom_configuration);
    }

    /// Call every extension's `register`, in registration order.
    pub fn initialize(&mut self) -> RegistryResult<()> {
        let extensions = self.extensions.clone();
        for extension in &extensions {
            debug!(extension = %extension.id(), "registering extension");
            extension.register(self)?;
        }
        info!(extensions = extensions.len(), "extensions initialized");
        Ok(())
    }

    /// Call every extension's `bootstrap`, then the custom bootstrap.
    pub fn bootstrap(&mut self) -> RegistryResult<()> {
        let extensions = self.extensions.clone();
        for extension in &extensions {
            debug!(extension = %extension.id(), "bootstrapping extension");
            extension.bootstrap(self)?;
        }

        if let Some(custom) = self.custom_bootstrap.clone() {
            debug!("running custom bootstrap");
            custom.run(self)?;
        }

        info!("extensions bootstrapped");
        Ok(())
    }

    /// Load the admin's own messages for every configured locale.
    ///
    /// Locales are loaded concurrently. A locale without a resource, whose
    /// resource cannot be read, or whose load exceeds the extension timeout
    /// is absent from the result.
    pub async fn load_admin_trads(&self) -> BTreeMap<String, Messages> {
        let source = Arc::clone(&self.translation_source);
        let loads = self.configuration.locales.iter().map(|locale| {
            let source = Arc::clone(&source);
            async move {
                let loaded = self
                    .bounded(ADMIN_TRANSLATIONS, "translation loading", source.load(locale))
                    .await;
                let messages = match loaded {
                    Ok(Ok(messages)) => messages,
                    Ok(Err(e)) => {
                        let error = format!("{e:#}");
                        warn!(locale = %locale, error = %error, "admin translations unavailable");
                        None
                    }
                    Err(e) => {
                        warn!(locale = %locale, error = %e, "admin translations unavailable");
                        None
                    }
                };
                messages.map(|messages| (locale.clone(), messages))
            }
        });

        let translations: BTreeMap<String, Messages> =
            join_all(loads).await.into_iter().flatten().collect();
        debug!(locales = translations.len(), "admin translations loaded");
        translations
    }

    /// Build the final messages of every configured locale.
    ///
    /// Per locale, extension messages override the admin's own and custom
    /// configuration messages override both. Extensions are asked
    /// concurrently; their contributions are merged in registration order.
    pub async fn load_trads(&mut self) -> RegistryResult<()> {
        let admin = self.load_admin_trads().await;

        let locales = self.configuration.locales.clone();
        let this = &*self;
        let requests = this.extensions.iter().map(|extension| {
            let locales = &locales;
            async move {
                this.bounded(
                    extension.id(),
                    "translation registration",
                    extension.register_trads(locales),
                )
                .await
            }
        });

        let mut contributions = Vec::new();
        for contribution in join_all(requests).await {
            if let Some(messages) = contribution? {
                contributions.push(messages);
            }
        }
        let extensions = collect_contributions(contributions);

        self.configuration.translations = merge_layers(
            &locales,
            [&admin, &extensions, &self.custom_configuration.translations],
        );
        info!(locales = locales.len(), "translations loaded");
        Ok(())
    }

    /// Build a store from the registered middlewares and reducers.
    pub fn create_store(&self) -> Store {
        Store::new(self.middlewares.clone(), self.reducers.clone())
    }

    /// End the registration phase.
    pub fn seal(self) -> SealedAdmin {
        let store = self.create_store();
        info!(
            menu = self.menu.len(),
            plugins = self.plugins.len(),
            sections = self.settings.len(),
            "registry sealed"
        );
        SealedAdmin {
            configuration: self.configuration,
            menu: self.menu,
            settings: self.settings,
            components: self.components,
            fields: self.fields,
            custom_fields: self.custom_fields,
            plugins: self.plugins,
            injection_zones: self.injection_zones,
            hooks: self.hooks,
            store,
        }
    }

    /// Await `future`, bounded by the extension timeout when one is set.
    async fn bounded<F: Future>(
        &self,
        extension: &str,
        phase: &'static str,
        future: F,
    ) -> RegistryResult<F::Output> {
        match self.extension_timeout {
            Some(timeout) => tokio::time::timeout(timeout, future).await.map_err(|_| {
                RegistryError::ExtensionTimedOut {
                    extension: extension.to_string(),
                    phase,
                    timeout,
                }
            }),
            None => Ok(future.await),
        }
    }
}
