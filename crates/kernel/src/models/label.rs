//! Translatable labels.

use serde::{Deserialize, Serialize};

/// A translatable label: message id plus the message shown when no
/// translation exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntlLabel {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub default_message: String,
}

impl IntlLabel {
    pub fn new(id: impl Into<String>, default_message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            default_message: default_message.into(),
        }
    }

    /// Both the id and the default message are present.
    pub fn is_complete(&self) -> bool {
        !self.id.trim().is_empty() && !self.default_message.trim().is_empty()
    }
}
