//! Hook registry - maps hook names to ordered handler lists and runs them.
//!
//! Handlers run in registration order. A hook must be created before any
//! handler can be attached to it or any run can reference it.

use std::collections::HashMap;

use futures::future::join_all;
use serde_json::Value;
use tracing::debug;

use super::{HookHandler, HookInput};
use crate::error::{RegistryError, RegistryResult};
use crate::store::Store;

/// A named list of handlers.
#[derive(Debug, Clone, Default)]
pub struct Hook {
    handlers: Vec<HookHandler>,
}

impl Hook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler.
    pub fn register(&mut self, handler: HookHandler) {
        self.handlers.push(handler);
    }

    pub fn handlers(&self) -> &[HookHandler] {
        &self.handlers
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Fail if any handler needs awaiting, before running anything.
    fn ensure_sync(&self, name: &str) -> RegistryResult<()> {
        match self.handlers.iter().position(HookHandler::is_async) {
            Some(position) => Err(RegistryError::AsyncHandlerInSyncRun {
                hook: name.to_string(),
                position,
            }),
            None => Ok(()),
        }
    }

    fn run_series(&self, name: &str) -> RegistryResult<Vec<Value>> {
        self.ensure_sync(name)?;
        Ok(self
            .handlers
            .iter()
            .filter_map(|handler| handler.call_sync(HookInput::empty()))
            .collect())
    }

    async fn run_series_async(&self) -> Vec<Value> {
        let mut results = Vec::with_capacity(self.handlers.len());
        for handler in &self.handlers {
            results.push(handler.call(HookInput::empty()).await);
        }
        results
    }

    fn run_waterfall(
        &self,
        name: &str,
        initial: Value,
        store: Option<&Store>,
    ) -> RegistryResult<Value> {
        self.ensure_sync(name)?;
        let mut acc = initial;
        for handler in &self.handlers {
            let input = HookInput::new(acc.clone(), store.cloned());
            if let Some(next) = handler.call_sync(input) {
                acc = next;
            }
        }
        Ok(acc)
    }

    async fn run_waterfall_async(&self, initial: Value, store: Option<&Store>) -> Value {
        let mut acc = initial;
        for handler in &self.handlers {
            acc = handler.call(HookInput::new(acc, store.cloned())).await;
        }
        acc
    }

    async fn run_parallel(&self) -> Vec<Value> {
        join_all(
            self.handlers
                .iter()
                .map(|handler| handler.call(HookInput::empty())),
        )
        .await
    }
}

/// Registry mapping hook names to their handlers.
#[derive(Debug, Default)]
pub struct HookRegistry {
    hooks: HashMap<String, Hook>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a hook. Creating an existing hook replaces it with an empty one.
    pub fn create(&mut self, name: &str) {
        if self.hooks.insert(name.to_string(), Hook::new()).is_some() {
            debug!(hook = %name, "hook re-created, previous handlers dropped");
        } else {
            debug!(hook = %name, "hook created");
        }
    }

    /// Attach a handler to a declared hook.
    pub fn register(&mut self, name: &str, handler: HookHandler) -> RegistryResult<()> {
        let hook = self
            .hooks
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownHook(name.to_string()))?;
        hook.register(handler);
        debug!(hook = %name, handlers = hook.len(), "hook handler registered");
        Ok(())
    }

    /// Look up a declared hook.
    pub fn get(&self, name: &str) -> RegistryResult<&Hook> {
        self.hooks
            .get(name)
            .ok_or_else(|| RegistryError::UnknownHook(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    /// Get all declared hook names.
    pub fn hook_names(&self) -> impl Iterator<Item = &str> {
        self.hooks.keys().map(String::as_str)
    }

    /// Number of handlers on a hook (0 if undeclared).
    pub fn handler_count(&self, name: &str) -> usize {
        self.hooks.get(name).map(Hook::len).unwrap_or(0)
    }

    /// Run every handler in order and collect their results.
    ///
    /// Fails without running anything if a handler is asynchronous.
    pub fn run_series(&self, name: &str) -> RegistryResult<Vec<Value>> {
        self.get(name)?.run_series(name)
    }

    /// Run every handler in order, awaiting each before starting the next.
    pub async fn run_series_async(&self, name: &str) -> RegistryResult<Vec<Value>> {
        let hook = self.get(name)?;
        Ok(hook.run_series_async().await)
    }

    /// Thread `initial` through the handlers; each output feeds the next.
    pub fn run_waterfall(
        &self,
        name: &str,
        initial: Value,
        store: Option<&Store>,
    ) -> RegistryResult<Value> {
        self.get(name)?.run_waterfall(name, initial, store)
    }

    /// Async waterfall: each handler is awaited before the next starts.
    pub async fn run_waterfall_async(
        &self,
        name: &str,
        initial: Value,
        store: Option<&Store>,
    ) -> RegistryResult<Value> {
        let hook = self.get(name)?;
        Ok(hook.run_waterfall_async(initial, store).await)
    }

    /// Start every handler and wait for all of them.
    ///
    /// Results are returned in registration order; completion order is not
    /// defined.
    pub async fn run_parallel(&self, name: &str) -> RegistryResult<Vec<Value>> {
        let hook = self.get(name)?;
        Ok(hook.run_parallel().await)
    }
}
