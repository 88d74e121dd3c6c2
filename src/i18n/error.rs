//! Error types for locale selection and bundle loading.

use thiserror::Error;

/// Errors surfaced by [`LocaleResolver`](crate::i18n::LocaleResolver) operations.
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("Language \"{0}\" is not supported.")]
    UnsupportedLanguage(String),

    #[error("Locale \"{0}\" is not supported.")]
    UnsupportedLocale(String),

    /// The default-locale bundle could not be loaded; there is no further fallback.
    #[error("default bundle \"{id}\" failed to load")]
    FatalBundleLoad {
        id: String,
        #[source]
        source: BundleLoadError,
    },

    #[error("selection store error: {0:#}")]
    Storage(#[source] anyhow::Error),
}

/// Failure to load a single bundle by identifier.
#[derive(Debug, Error)]
pub enum BundleLoadError {
    #[error("no bundle registered for \"{0}\"")]
    NotRegistered(String),

    #[error("failed to read bundle \"{id}\"")]
    Io {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse bundle \"{id}\"")]
    Parse {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("bundle \"{id}\" failed to load: {message}")]
    Other { id: String, message: String },
}

impl BundleLoadError {
    /// Identifier of the bundle that failed.
    pub fn id(&self) -> &str {
        match self {
            BundleLoadError::NotRegistered(id) => id,
            BundleLoadError::Io { id, .. }
            | BundleLoadError::Parse { id, .. }
            | BundleLoadError::Other { id, .. } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_messages() {
        assert_eq!(
            LocaleError::UnsupportedLanguage("xx".into()).to_string(),
            "Language \"xx\" is not supported."
        );
        assert_eq!(
            LocaleError::UnsupportedLocale("en-ZZ".into()).to_string(),
            "Locale \"en-ZZ\" is not supported."
        );
    }

    #[test]
    fn test_bundle_error_id() {
        assert_eq!(BundleLoadError::NotRegistered("zz-ZZ".into()).id(), "zz-ZZ");
        let err = BundleLoadError::Other {
            id: "fr".into(),
            message: "boom".into(),
        };
        assert_eq!(err.id(), "fr");
        assert!(err.to_string().contains("boom"));
    }
}
