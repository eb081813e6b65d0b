//! Hook handlers: synchronous or asynchronous callbacks over JSON values.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::store::Store;

/// Input handed to a handler.
///
/// Series and parallel runs pass `Value::Null` and no store. Waterfall runs
/// pass the accumulated value and, when the caller supplies one, the store.
#[derive(Debug, Clone)]
pub struct HookInput {
    pub value: Value,
    pub store: Option<Store>,
}

impl HookInput {
    /// Input for runs that carry no context.
    pub fn empty() -> Self {
        Self {
            value: Value::Null,
            store: None,
        }
    }

    pub fn new(value: Value, store: Option<Store>) -> Self {
        Self { value, store }
    }
}

type SyncFn = dyn Fn(HookInput) -> Value + Send + Sync;
type AsyncFn = dyn Fn(HookInput) -> BoxFuture<'static, Value> + Send + Sync;

/// A callback registered on a hook.
#[derive(Clone)]
pub enum HookHandler {
    Sync(Arc<SyncFn>),
    Async(Arc<AsyncFn>),
}

impl HookHandler {
    /// Wrap a synchronous callback.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(HookInput) -> Value + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(f))
    }

    /// Wrap an asynchronous callback.
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn(HookInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Value> + Send + 'static,
    {
        Self::Async(Arc::new(move |input| Box::pin(f(input))))
    }

    pub fn is_async(&self) -> bool {
        matches!(self, Self::Async(_))
    }

    /// Invoke the handler, awaiting it if it is asynchronous.
    pub async fn call(&self, input: HookInput) -> Value {
        match self {
            Self::Sync(f) => f(input),
            Self::Async(f) => f(input).await,
        }
    }

    /// Invoke a synchronous handler. Returns `None` for async handlers.
    pub(crate) fn call_sync(&self, input: HookInput) -> Option<Value> {
        match self {
            Self::Sync(f) => Some(f(input)),
            Self::Async(_) => None,
        }
    }
}

impl std::fmt::Debug for HookHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("HookHandler::Sync"),
            Self::Async(_) => f.write_str("HookHandler::Async"),
        }
    }
}
