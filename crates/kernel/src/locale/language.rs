//! Native display names of the locales the admin can be translated into.

use std::collections::BTreeMap;

/// Locale code → name of the language in that language.
pub const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("ar", "العربية"),
    ("ca", "Català"),
    ("cs", "Čeština"),
    ("de", "Deutsch"),
    ("dk", "Dansk"),
    ("en", "English"),
    ("es", "Español"),
    ("eu", "Euskara"),
    ("fr", "Français"),
    ("gu", "Gujarati"),
    ("he", "עברית"),
    ("hi", "Hindi"),
    ("hu", "Magyar"),
    ("id", "Indonesian"),
    ("it", "Italiano"),
    ("ja", "日本語"),
    ("ko", "한국어"),
    ("ml", "Malayalam"),
    ("ms", "Melayu"),
    ("nl", "Nederlands"),
    ("no", "Norwegian"),
    ("pl", "Polski"),
    ("pt", "Português"),
    ("pt-BR", "Português (Brasil)"),
    ("ro", "Română"),
    ("ru", "Русский"),
    ("sk", "Slovenčina"),
    ("sv", "Swedish"),
    ("th", "ไทย"),
    ("tr", "Türkçe"),
    ("uk", "Українська"),
    ("uz", "O'zbekcha"),
    ("vi", "Tiếng Việt"),
    ("zh", "中文 (繁體)"),
    ("zh-Hans", "中文 (简体)"),
];

/// Display names for the given locales. Unknown codes are skipped.
pub fn locale_names(locales: &[String]) -> BTreeMap<String, String> {
    locales
        .iter()
        .filter_map(|locale| {
            LANGUAGE_NAMES
                .iter()
                .find(|(code, _)| *code == locale.as_str())
                .map(|(code, name)| (code.to_string(), name.to_string()))
        })
        .collect()
}
