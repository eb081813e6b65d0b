//! Component, field and custom-field libraries shared with the render layer.
//!
//! Libraries are keyed collections: adding an entry under an existing key
//! replaces the previous entry.

mod custom_fields;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use custom_fields::{
    CustomField, CustomFieldComponents, CustomFieldRegistry, SUPPORTED_FIELD_TYPES,
};

use crate::error::{RegistryError, RegistryResult};
use crate::models::ComponentRef;

/// A named component made available to every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub component: ComponentRef,
}

impl Component {
    pub fn new(name: impl Into<String>, component: impl Into<ComponentRef>) -> Self {
        Self {
            name: name.into(),
            component: component.into(),
        }
    }
}

/// An input component for a field type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "type")]
    pub field_type: String,
    pub component: ComponentRef,
}

impl Field {
    pub fn new(field_type: impl Into<String>, component: impl Into<ComponentRef>) -> Self {
        Self {
            field_type: field_type.into(),
            component: component.into(),
        }
    }
}

/// Components keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComponentLibrary {
    components: BTreeMap<String, ComponentRef>,
}

impl ComponentLibrary {
    pub fn add(&mut self, entry: Component) -> RegistryResult<()> {
        if !entry.component.is_valid() {
            return Err(RegistryError::InvalidLibraryEntry {
                kind: "component",
                reason: "a Component must be provided".to_string(),
            });
        }
        if entry.name.trim().is_empty() {
            return Err(RegistryError::InvalidLibraryEntry {
                kind: "component",
                reason: "a name must be provided".to_string(),
            });
        }
        self.components.insert(entry.name, entry.component);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ComponentRef> {
        self.components.get(name)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Field input components keyed by field type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldLibrary {
    fields: BTreeMap<String, ComponentRef>,
}

impl FieldLibrary {
    pub fn add(&mut self, entry: Field) -> RegistryResult<()> {
        if !entry.component.is_valid() {
            return Err(RegistryError::InvalidLibraryEntry {
                kind: "field",
                reason: "a Component must be provided".to_string(),
            });
        }
        if entry.field_type.trim().is_empty() {
            return Err(RegistryError::InvalidLibraryEntry {
                kind: "field",
                reason: "a type must be provided".to_string(),
            });
        }
        self.fields.insert(entry.field_type, entry.component);
        Ok(())
    }

    pub fn get(&self, field_type: &str) -> Option<&ComponentRef> {
        self.fields.get(field_type)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn later_component_with_same_name_wins() {
        let mut library = ComponentLibrary::default();
        library.add(Component::new("media-library", "V1")).unwrap();
        library.add(Component::new("media-library", "V2")).unwrap();
        assert_eq!(library.len(), 1);
        assert_eq!(library.get("media-library").unwrap().name(), "V2");
    }

    #[test]
    fn field_without_type_is_rejected() {
        let mut library = FieldLibrary::default();
        let err = library.add(Field::new("", "Input")).unwrap_err();
        assert!(err.to_string().contains("type"));
        assert!(library.is_empty());
    }
}
