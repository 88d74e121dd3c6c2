use anyhow::{Context, Result};
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    // Persistence
    pub store_path: PathBuf,

    // Bundles
    pub bundle_dir: PathBuf,

    // Override source
    pub page_url: Option<Url>,

    // Environment preference (falls back to the OS locale when unset)
    pub preferred_tag: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            store_path: std::env::var("LOCALE_STORE_PATH")
                .unwrap_or_else(|_| "locale-store.json".to_string())
                .into(),

            bundle_dir: std::env::var("LOCALE_BUNDLE_DIR")
                .unwrap_or_else(|_| "i18n".to_string())
                .into(),

            page_url: std::env::var("LOCALE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| Url::parse(&v).with_context(|| format!("LOCALE_URL is not a URL: {}", v)))
                .transpose()?,

            preferred_tag: std::env::var("LOCALE_PREFERENCE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .or_else(sys_locale::get_locale),
        })
    }
}
