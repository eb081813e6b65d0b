//! Registry error types with clear, actionable messages.
//!
//! Every variant is a precondition violation raised by a registration call.
//! They are returned immediately and propagated out of the boot phase; the
//! registry never catches or retries them.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by the extension registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A menu or settings link has no target path.
    #[error("link.to should be defined for {link}")]
    MissingLinkTarget { link: String },

    /// A label is missing its message id or default message.
    #[error("intlLabel.id & intlLabel.defaultMessage should be defined for {subject}")]
    IncompleteLabel { subject: String },

    /// A required renderable reference was not provided.
    #[error("{field} should be a valid component for {subject}")]
    MissingComponent { field: String, subject: String },

    /// `add_core_plugin_menu_link` was called with a path outside the allow-list.
    #[error("link '{to}' is not a core plugin link; allowed: {allowed}")]
    CorePluginLinkNotAllowed { to: String, allowed: String },

    /// A settings section was declared without an id.
    #[error("section.id should be defined")]
    MissingSectionId,

    /// A settings section id is already taken.
    #[error("a settings section with id '{0}' already exists")]
    DuplicateSection(String),

    /// A settings link targets a section that was never created.
    #[error("the settings section '{0}' does not exist")]
    UnknownSection(String),

    /// A settings link was declared without an id.
    #[error("link.id should be defined for {link}")]
    MissingLinkId { link: String },

    /// Injection into a zone the host never declared.
    #[error("the {container} {block} zone is not defined in {module}")]
    UndeclaredZone {
        module: String,
        container: String,
        block: String,
    },

    /// Injection into a plugin that is not registered.
    #[error("cannot inject into plugin '{0}': plugin is not registered")]
    UnknownPlugin(String),

    /// A hook was used before `create_hook` declared it.
    #[error(
        "the hook {0} is not defined. You are trying to use a hook that does not exist in the application"
    )]
    UnknownHook(String),

    /// A synchronous hook run reached an async handler.
    #[error("hook '{hook}' has an async handler at position {position}; use the async run mode")]
    AsyncHandlerInSyncRun { hook: String, position: usize },

    /// A library component or field entry is incomplete.
    #[error("invalid {kind} library entry: {reason}")]
    InvalidLibraryEntry { kind: &'static str, reason: String },

    /// A custom field failed validation.
    #[error("custom field '{name}': {reason}")]
    InvalidCustomField { name: String, reason: String },

    /// A custom field uid is already registered.
    #[error("custom field '{0}' is already registered")]
    DuplicateCustomField(String),

    /// An extension did not finish a phase within the configured bound.
    #[error("extension '{extension}' did not finish {phase} within {timeout:?}")]
    ExtensionTimedOut {
        extension: String,
        phase: &'static str,
        timeout: Duration,
    },
}

impl RegistryError {
    /// Create an incomplete label error.
    pub fn incomplete_label(subject: impl Into<String>) -> Self {
        Self::IncompleteLabel {
            subject: subject.into(),
        }
    }

    /// Create a missing component error.
    pub fn missing_component(field: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::MissingComponent {
            field: field.into(),
            subject: subject.into(),
        }
    }

    /// Create an undeclared injection zone error.
    pub fn undeclared_zone(
        module: impl Into<String>,
        container: impl Into<String>,
        block: impl Into<String>,
    ) -> Self {
        Self::UndeclaredZone {
            module: module.into(),
            container: container.into(),
            block: block.into(),
        }
    }

    /// Create a core plugin allow-list error.
    pub fn core_link_not_allowed(to: impl Into<String>, allowed: &[&str]) -> Self {
        Self::CorePluginLinkNotAllowed {
            to: to.into(),
            allowed: allowed.join(", "),
        }
    }

    /// Create a custom field validation error.
    pub fn invalid_custom_field(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCustomField {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias using RegistryError.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undeclared_zone_names_the_path() {
        let err = RegistryError::undeclared_zone("the admin", "tutorials", "footer");
        let msg = err.to_string();
        assert!(msg.contains("tutorials"));
        assert!(msg.contains("footer"));
        assert!(msg.contains("the admin"));
    }

    #[test]
    fn core_link_error_lists_allowed_paths() {
        let err = RegistryError::core_link_not_allowed("/plugins/blog", &["/a", "/b"]);
        let msg = err.to_string();
        assert!(msg.contains("/plugins/blog"));
        assert!(msg.contains("/a, /b"));
    }

    #[test]
    fn unknown_hook_is_actionable() {
        let msg = RegistryError::UnknownHook("Admin/missing".to_string()).to_string();
        assert!(msg.contains("Admin/missing"));
        assert!(msg.contains("not defined"));
    }
}
