//! Selection type: the active language and optional regional locale.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The active `(language, locale)` pair.
///
/// `locale` is the region part only (e.g. `"US"`), or empty when no region is
/// selected. This is also the shape persisted to the selection store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    /// Language code (e.g., "en", "fr")
    pub language: String,

    /// Region code (e.g., "US"), empty when absent
    #[serde(default)]
    pub locale: String,
}

impl Selection {
    pub fn new(language: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            locale: locale.into(),
        }
    }

    /// Split a `language[-REGION]` tag on `-`.
    ///
    /// Only the first two segments are used; anything after the region is
    /// ignored. The region is kept as written.
    pub fn from_tag(tag: &str) -> Self {
        let mut parts = tag.split('-');
        let language = parts.next().unwrap_or_default();
        let locale = parts.next().unwrap_or_default();
        Self::new(language, locale)
    }

    /// The effective tag: `language` alone, or `language-locale`.
    pub fn effective_tag(&self) -> String {
        if self.locale.is_empty() {
            self.language.clone()
        } else {
            format!("{}-{}", self.language, self.locale)
        }
    }

    pub fn has_locale(&self) -> bool {
        !self.locale.is_empty()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.effective_tag())
    }
}

/// Text direction reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
