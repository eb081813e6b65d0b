//! Interface translations.
//!
//! Messages come from three places, merged per locale with later sources
//! winning: the admin's own translation files, each extension's
//! `register_trads`, and the project's custom configuration.

mod language;
mod source;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use language::{LANGUAGE_NAMES, locale_names};
pub use source::{DirectoryTranslations, StaticTranslations, TranslationSource};

/// Message id → translated message.
pub type Messages = BTreeMap<String, String>;

/// Messages for one locale, as returned by an extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleMessages {
    pub locale: String,
    pub data: Messages,
}

impl LocaleMessages {
    pub fn new(locale: impl Into<String>, data: Messages) -> Self {
        Self {
            locale: locale.into(),
            data,
        }
    }
}

/// Merge per-locale layers for the configured locales.
///
/// Each layer is applied in order, so later layers override earlier ones.
/// Every configured locale gets an entry, even if no layer had messages for it.
pub fn merge_layers<'a>(
    locales: &[String],
    layers: impl IntoIterator<Item = &'a BTreeMap<String, Messages>>,
) -> BTreeMap<String, Messages> {
    let mut merged: BTreeMap<String, Messages> = locales
        .iter()
        .map(|locale| (locale.clone(), Messages::new()))
        .collect();

    for layer in layers {
        for (locale, target) in merged.iter_mut() {
            if let Some(messages) = layer.get(locale) {
                target.extend(messages.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
    }

    merged
}

/// Fold extension contributions into one per-locale layer.
///
/// Contributions are applied in order; for a repeated locale the later
/// contribution's messages are merged over the earlier ones.
pub fn collect_contributions(
    contributions: impl IntoIterator<Item = Vec<LocaleMessages>>,
) -> BTreeMap<String, Messages> {
    let mut layer: BTreeMap<String, Messages> = BTreeMap::new();
    for contribution in contributions {
        for LocaleMessages { locale, data } in contribution {
            layer.entry(locale).or_default().extend(data);
        }
    }
    layer
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn messages(pairs: &[(&str, &str)]) -> Messages {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn later_layers_win() {
        let locales = vec!["en".to_string(), "fr".to_string()];
        let admin = BTreeMap::from([(
            "en".to_string(),
            messages(&[("a", "admin"), ("b", "admin")]),
        )]);
        let plugins = BTreeMap::from([("en".to_string(), messages(&[("b", "plugin")]))]);
        let custom = BTreeMap::from([("en".to_string(), messages(&[("a", "custom")]))]);

        let merged = merge_layers(&locales, [&admin, &plugins, &custom]);
        assert_eq!(merged["en"], messages(&[("a", "custom"), ("b", "plugin")]));
        assert!(merged["fr"].is_empty());
    }

    #[test]
    fn locales_outside_configuration_are_dropped() {
        let locales = vec!["en".to_string()];
        let layer = BTreeMap::from([("de".to_string(), messages(&[("a", "x")]))]);
        let merged = merge_layers(&locales, [&layer]);
        assert_eq!(merged.len(), 1);
        assert!(merged.contains_key("en"));
    }

    #[test]
    fn contributions_fold_in_order() {
        let layer = collect_contributions([
            vec![LocaleMessages::new("en", messages(&[("k", "first")]))],
            vec![LocaleMessages::new("en", messages(&[("k", "second")]))],
        ]);
        assert_eq!(layer["en"]["k"], "second");
    }
}
