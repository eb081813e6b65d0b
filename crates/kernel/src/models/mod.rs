//! Data models contributed by extensions.
//!
//! These are plain values: validation lives next to each model and is
//! invoked by the registry at registration time.

pub mod component;
pub mod label;
pub mod menu_link;
pub mod settings;

pub use component::{ComponentRef, OneOrMany};
pub(crate) use component::is_renderable;
pub use label::IntlLabel;
pub use menu_link::MenuLink;
pub use settings::{SettingsLink, SettingsSection};

/// Render a model as compact JSON for error messages.
pub(crate) fn describe<T: serde::Serialize + std::fmt::Debug>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
}
