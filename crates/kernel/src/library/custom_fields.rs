//! Custom field registry.
//!
//! A custom field wraps one of the supported base attribute types with its
//! own input component. Fields are keyed by uid: `plugin::<plugin>.<name>`
//! for plugin-provided fields, `global::<name>` otherwise.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::models::{ComponentRef, IntlLabel, is_renderable};

/// Base attribute types a custom field may be stored as.
pub const SUPPORTED_FIELD_TYPES: &[&str] = &[
    "biginteger",
    "boolean",
    "date",
    "datetime",
    "decimal",
    "email",
    "enumeration",
    "float",
    "integer",
    "json",
    "password",
    "richtext",
    "string",
    "text",
    "time",
    "uid",
];

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z][-A-Za-z0-9_]*$").expect("custom field name pattern is valid")
});

/// Components used to edit a custom field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldComponents {
    pub input: Option<ComponentRef>,
}

/// A custom field declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    pub name: String,
    #[serde(default, rename = "pluginId")]
    pub plugin_id: Option<String>,
    #[serde(rename = "type")]
    pub field_type: String,
    pub intl_label: IntlLabel,
    pub intl_description: IntlLabel,
    #[serde(default)]
    pub components: CustomFieldComponents,
    /// Settings form definition, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl CustomField {
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<String>,
        intl_label: IntlLabel,
        input: impl Into<ComponentRef>,
    ) -> Self {
        Self {
            name: name.into(),
            plugin_id: None,
            field_type: field_type.into(),
            intl_description: IntlLabel::new(
                format!("{}.description", intl_label.id),
                String::new(),
            ),
            intl_label,
            components: CustomFieldComponents {
                input: Some(input.into()),
            },
            options: None,
        }
    }

    /// Attach the field to a plugin namespace.
    pub fn with_plugin(mut self, plugin_id: impl Into<String>) -> Self {
        self.plugin_id = Some(plugin_id.into());
        self
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }

    /// `plugin::<plugin>.<name>` or `global::<name>`.
    pub fn uid(&self) -> String {
        match &self.plugin_id {
            Some(plugin) => format!("plugin::{plugin}.{}", self.name),
            None => format!("global::{}", self.name),
        }
    }

    fn validate(&self) -> RegistryResult<()> {
        if self.name.is_empty() {
            return Err(RegistryError::invalid_custom_field(
                "<unnamed>",
                "a name must be provided",
            ));
        }
        if !NAME_PATTERN.is_match(&self.name) {
            return Err(RegistryError::invalid_custom_field(
                &self.name,
                "the name must start with a letter and contain only letters, digits, '-' or '_'",
            ));
        }
        if self.field_type.is_empty() {
            return Err(RegistryError::invalid_custom_field(
                &self.name,
                "a type must be provided",
            ));
        }
        if !SUPPORTED_FIELD_TYPES.contains(&self.field_type.as_str()) {
            return Err(RegistryError::invalid_custom_field(
                &self.name,
                format!(
                    "type '{}' is not supported; expected one of: {}",
                    self.field_type,
                    SUPPORTED_FIELD_TYPES.join(", ")
                ),
            ));
        }
        if !is_renderable(self.components.input.as_ref()) {
            return Err(RegistryError::invalid_custom_field(
                &self.name,
                "an input component must be provided",
            ));
        }
        Ok(())
    }
}

/// Registered custom fields keyed by uid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CustomFieldRegistry {
    fields: BTreeMap<String, CustomField>,
}

impl CustomFieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add a field. Each uid may be registered once.
    pub fn register(&mut self, field: CustomField) -> RegistryResult<()> {
        field.validate()?;
        let uid = field.uid();
        if self.fields.contains_key(&uid) {
            return Err(RegistryError::DuplicateCustomField(uid));
        }
        debug!(uid = %uid, field_type = %field.field_type, "custom field registered");
        self.fields.insert(uid, field);
        Ok(())
    }

    pub fn get(&self, uid: &str) -> Option<&CustomField> {
        self.fields.get(uid)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CustomField)> {
        self.fields.iter().map(|(uid, field)| (uid.as_str(), field))
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

    fn color() -> CustomField {
        CustomField::new(
            "color",
            "string",
            IntlLabel::new("color-picker.label", "Color"),
            "ColorPickerInput",
        )
    }

    #[test]
    fn uid_depends_on_plugin() {
        assert_eq!(color().uid(), "global::color");
        assert_eq!(
            color().with_plugin("color-picker").uid(),
            "plugin::color-picker.color"
        );
    }

    #[test]
    fn registers_valid_field() {
        let mut registry = CustomFieldRegistry::new();
        registry.register(color().with_plugin("color-picker")).unwrap();
        assert!(registry.get("plugin::color-picker.color").is_some());
    }

    #[test]
    fn rejects_invalid_names() {
        let mut registry = CustomFieldRegistry::new();
        for name in ["1color", "color picker", "color.hex"] {
            let mut field = color();
            field.name = name.to_string();
            let err = registry.register(field).unwrap_err();
            assert!(matches!(err, RegistryError::InvalidCustomField { .. }), "{name}");
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn rejects_unsupported_type() {
        let mut registry = CustomFieldRegistry::new();
        let mut field = color();
        field.field_type = "media".to_string();
        let err = registry.register(field).unwrap_err();
        assert!(err.to_string().contains("media"));
    }

    #[test]
    fn rejects_missing_input_component() {
        let mut registry = CustomFieldRegistry::new();
        let mut field = color();
        field.components.input = None;
        assert!(registry.register(field).is_err());
    }

    #[test]
    fn rejects_duplicate_uid() {
        let mut registry = CustomFieldRegistry::new();
        registry.register(color()).unwrap();
        let err = registry.register(color()).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateCustomField(uid) if uid == "global::color"));
        assert_eq!(registry.len(), 1);
    }
}
