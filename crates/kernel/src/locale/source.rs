//! Where the admin's own translation files come from.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

use super::Messages;

/// A lookup of translation resources keyed by locale code.
///
/// `Ok(None)` means the locale has no resource; that is not an error.
#[async_trait]
pub trait TranslationSource: Send + Sync {
    async fn load(&self, locale: &str) -> Result<Option<Messages>>;
}

/// Reads `<dir>/<locale>.json` files.
#[derive(Debug, Clone)]
pub struct DirectoryTranslations {
    dir: PathBuf,
}

impl DirectoryTranslations {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, locale: &str) -> PathBuf {
        self.dir.join(format!("{locale}.json"))
    }
}

#[async_trait]
impl TranslationSource for DirectoryTranslations {
    async fn load(&self, locale: &str) -> Result<Option<Messages>> {
        // Locale codes come from configuration; refuse anything path-like.
        if locale.is_empty() || locale.contains(['/', '\\', '.']) {
            warn!(locale = %locale, "ignoring locale with an invalid code");
            return Ok(None);
        }

        let path = self.path_for(locale);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(locale = %locale, path = %path.display(), "no translation file");
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to read translation file: {}", path.display())
                });
            }
        };

        let messages: Messages = serde_json::from_str(&content)
            .with_context(|| format!("invalid translation file: {}", path.display()))?;
        debug!(locale = %locale, count = messages.len(), "loaded translation file");
        Ok(Some(messages))
    }
}

/// In-memory translations, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticTranslations {
    locales: BTreeMap<String, Messages>,
}

impl StaticTranslations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add messages for a locale, builder style.
    pub fn with_locale(mut self, locale: &str, messages: Messages) -> Self {
        self.locales.insert(locale.to_string(), messages);
        self
    }
}

#[async_trait]
impl TranslationSource for StaticTranslations {
    async fn load(&self, locale: &str) -> Result<Option<Messages>> {
        Ok(self.locales.get(locale).cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_directory_yields_none() {
        let source = DirectoryTranslations::new("/nonexistent/atelier/translations");
        assert!(source.load("en").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn path_like_locale_is_ignored() {
        let source = DirectoryTranslations::new(".");
        assert!(source.load("../secrets").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn static_source_returns_known_locales() {
        let source = StaticTranslations::new().with_locale(
            "fr",
            Messages::from([("a".to_string(), "b".to_string())]),
        );
        assert!(source.load("fr").await.unwrap().is_some());
        assert!(source.load("de").await.unwrap().is_none());
    }
}
