//! Opaque references to renderables owned by the rendering layer.

use serde::{Deserialize, Serialize};

/// Named handle to a component rendered by the external UI layer.
///
/// The registry never renders anything; it only stores and orders these
/// handles. An empty name is treated as "no component".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentRef(String);

impl ComponentRef {
    /// Create a reference from a component name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The component name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether this reference points at something renderable.
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl From<&str> for ComponentRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ComponentRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true when an optional reference is present and valid.
pub(crate) fn is_renderable(component: Option<&ComponentRef>) -> bool {
    component.is_some_and(ComponentRef::is_valid)
}

/// A single item or a list of items, normalized into repeated insertions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Flatten into a list, preserving order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(item: T) -> Self {
        Self::One(item)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items)
    }
}
