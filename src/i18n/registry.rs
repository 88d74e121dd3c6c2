//! Language registry: Single source of truth for supported languages and locales.
//!
//! The built-in registry is initialized once behind a `OnceLock` and never
//! mutated afterwards. Custom registries can be constructed with
//! [`LanguageRegistry::new`] for applications that ship a different catalog.

use std::sync::OnceLock;

/// Languages with translation bundles. The first entry is the default language.
const SUPPORTED_LANGUAGES: &[&str] = &[
    "ar", "ca", "da", "de", "el", "en", "es", "fr", "he", "id", "ja", "ko", "nl", "pt", "ru", "uk",
    "zh", "no",
];

/// Regional locales with translation bundles. The first entry is the default locale.
const SUPPORTED_LOCALES: &[&str] = &[
    "ar-TN", "ca-ES", "da-DK", "de-DE", "el-GR", "en-GB", "en-US", "es-ES", "fr-FR", "he-IL",
    "id-ID", "ja-JP", "ko-KR", "nl-NL", "pt-BR", "ru-RU", "uk-UA", "zh-CN", "no-NO",
];

/// Languages written right-to-left. Not all of them are supported yet.
const RTL_LANGUAGES: &[&str] = &["ar", "fa", "he", "ur"];

/// Registry of supported languages, supported locales and right-to-left languages.
///
/// Languages and locales are ordered; the first element of each list is the
/// default. Locales are matched as full `language-REGION` strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRegistry {
    languages: Vec<String>,
    locales: Vec<String>,
    rtl_languages: Vec<String>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Build a registry from explicit lists.
    ///
    /// Returns `None` if either `languages` or `locales` is empty, since both
    /// lists must provide a default.
    pub fn new<L, C, R>(languages: L, locales: C, rtl_languages: R) -> Option<Self>
    where
        L: IntoIterator,
        L::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let languages: Vec<String> = languages.into_iter().map(Into::into).collect();
        let locales: Vec<String> = locales.into_iter().map(Into::into).collect();
        if languages.is_empty() || locales.is_empty() {
            return None;
        }

        Some(Self {
            languages,
            locales,
            rtl_languages: rtl_languages.into_iter().map(Into::into).collect(),
        })
    }

    /// Get the built-in registry instance.
    ///
    /// This method initializes the registry on first call and returns a reference
    /// to the singleton instance on subsequent calls.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: to_owned(SUPPORTED_LANGUAGES),
            locales: to_owned(SUPPORTED_LOCALES),
            rtl_languages: to_owned(RTL_LANGUAGES),
        })
    }

    /// The default language (first supported language).
    pub fn default_language(&self) -> &str {
        &self.languages[0]
    }

    /// The default locale (first supported locale), e.g. `"ar-TN"`.
    ///
    /// This is also the identifier of the bundle of last resort.
    pub fn default_locale(&self) -> &str {
        &self.locales[0]
    }

    /// All supported languages, in order.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// All supported locales, in order.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// Check whether `code` is a supported language.
    pub fn is_supported_language(&self, code: &str) -> bool {
        self.languages.iter().any(|lang| lang == code)
    }

    /// Check whether `tag` (a full `language-REGION` string) is a supported locale.
    pub fn is_supported_locale(&self, tag: &str) -> bool {
        self.locales.iter().any(|locale| locale == tag)
    }

    /// Check whether `code` is written right-to-left.
    ///
    /// Independent of support: a language may be RTL without being supported.
    pub fn is_rtl(&self, code: &str) -> bool {
        self.rtl_languages.iter().any(|lang| lang == code)
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::get().clone()
    }
}

fn to_owned(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|code| code.to_string()).collect()
}
