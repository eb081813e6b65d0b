//! Application state store assembled from extension reducers and middlewares.
//!
//! State is a JSON object with one slice per reducer key. Dispatching an
//! action runs the middleware chain in registration order (any middleware may
//! rewrite or swallow the action), then every reducer against its own slice.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Action type dispatched once when the store is created.
pub const INIT_ACTION: &str = "@@atelier/INIT";

/// An action dispatched to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Action type, e.g. "upload/SET_FOLDER".
    #[serde(rename = "type")]
    pub kind: String,
    /// Action data.
    #[serde(default)]
    pub payload: Value,
}

impl Action {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}

/// Computes the next slice state from the current slice and an action.
pub trait Reducer: Send + Sync {
    fn reduce(&self, state: &Value, action: &Action) -> Value;
}

impl<F> Reducer for F
where
    F: Fn(&Value, &Action) -> Value + Send + Sync,
{
    fn reduce(&self, state: &Value, action: &Action) -> Value {
        self(state, action)
    }
}

/// Intercepts actions before they reach the reducers.
///
/// Returning `None` swallows the action.
pub trait Middleware: Send + Sync {
    fn handle(&self, action: Action, state: &Value) -> Option<Action>;
}

impl<F> Middleware for F
where
    F: Fn(Action, &Value) -> Option<Action> + Send + Sync,
{
    fn handle(&self, action: Action, state: &Value) -> Option<Action> {
        self(action, state)
    }
}

pub type SharedReducer = Arc<dyn Reducer>;
pub type SharedMiddleware = Arc<dyn Middleware>;

struct StoreInner {
    middlewares: Vec<SharedMiddleware>,
    reducers: BTreeMap<String, SharedReducer>,
    state: RwLock<Map<String, Value>>,
}

/// Cheaply cloneable handle to the application store.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Build the store and initialize every reducer slice.
    pub fn new(
        middlewares: Vec<SharedMiddleware>,
        reducers: BTreeMap<String, SharedReducer>,
    ) -> Self {
        let init = Action::new(INIT_ACTION, Value::Null);
        let state: Map<String, Value> = reducers
            .iter()
            .map(|(key, reducer)| (key.clone(), reducer.reduce(&Value::Null, &init)))
            .collect();

        debug!(
            reducers = reducers.len(),
            middlewares = middlewares.len(),
            "store created"
        );

        Self {
            inner: Arc::new(StoreInner {
                middlewares,
                reducers,
                state: RwLock::new(state),
            }),
        }
    }

    /// Dispatch an action. Returns false if a middleware swallowed it.
    pub fn dispatch(&self, action: Action) -> bool {
        let snapshot = self.state();
        let mut current = action;
        for middleware in &self.inner.middlewares {
            match middleware.handle(current, &snapshot) {
                Some(next) => current = next,
                None => {
                    debug!("action swallowed by middleware");
                    return false;
                }
            }
        }

        let mut state = self.inner.state.write();
        for (key, reducer) in &self.inner.reducers {
            let previous = state.get(key).cloned().unwrap_or(Value::Null);
            state.insert(key.clone(), reducer.reduce(&previous, &current));
        }
        true
    }

    /// Snapshot of the whole state.
    pub fn state(&self) -> Value {
        Value::Object(self.inner.state.read().clone())
    }

    /// Snapshot of one reducer slice.
    pub fn slice(&self, key: &str) -> Option<Value> {
        self.inner.state.read().get(key).cloned()
    }

    /// Registered reducer keys, sorted.
    pub fn reducer_keys(&self) -> impl Iterator<Item = &str> {
        self.inner.reducers.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("reducers", &self.inner.reducers.keys().collect::<Vec<_>>())
            .field("middlewares", &self.inner.middlewares.len())
            .finish()
    }
}

impl Serialize for Store {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.state().serialize(serializer)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn counter() -> SharedReducer {
        Arc::new(|state: &Value, action: &Action| match action.kind.as_str() {
            INIT_ACTION => json!(0),
            "increment" => json!(state.as_i64().unwrap_or(0) + 1),
            _ => state.clone(),
        })
    }

    #[test]
    fn reducers_start_from_init_state() {
        let mut reducers = BTreeMap::new();
        reducers.insert("count".to_string(), counter());
        let store = Store::new(Vec::new(), reducers);
        assert_eq!(store.slice("count"), Some(json!(0)));
    }

    #[test]
    fn dispatch_updates_slices() {
        let mut reducers = BTreeMap::new();
        reducers.insert("count".to_string(), counter());
        let store = Store::new(Vec::new(), reducers);
        assert!(store.dispatch(Action::new("increment", Value::Null)));
        assert!(store.dispatch(Action::new("increment", Value::Null)));
        assert_eq!(store.state(), json!({ "count": 2 }));
    }

    #[test]
    fn middleware_can_swallow_and_rewrite() {
        let mut reducers = BTreeMap::new();
        reducers.insert("count".to_string(), counter());
        let block_noop: SharedMiddleware =
            Arc::new(|action: Action, _: &Value| (action.kind != "noop").then_some(action));
        let alias: SharedMiddleware = Arc::new(|action: Action, _: &Value| {
            if action.kind == "inc" {
                Some(Action::new("increment", action.payload))
            } else {
                Some(action)
            }
        });
        let store = Store::new(vec![block_noop, alias], reducers);

        assert!(!store.dispatch(Action::new("noop", Value::Null)));
        assert!(store.dispatch(Action::new("inc", Value::Null)));
        assert_eq!(store.slice("count"), Some(json!(1)));
    }
}
