//! Translation bundles and the registry of bundle loaders.
//!
//! Bundles are looked up by identifier (`language` or `language-REGION`) in an
//! explicit [`BundleRegistry`] built at startup. Nothing is resolved from a
//! constructed path at load time: an identifier either has a registered loader
//! or fails with [`BundleLoadError::NotRegistered`].

use crate::i18n::BundleLoadError;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Shown by lookups for keys that are not in the current bundle.
pub const MISSING_TRANSLATION: &str = "⛔️ Missing translation";

/// A loaded key→string translation table for one language or locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationBundle {
    id: String,
    strings: HashMap<String, String>,
}

impl TranslationBundle {
    pub fn new(id: impl Into<String>, strings: HashMap<String, String>) -> Self {
        Self {
            id: id.into(),
            strings,
        }
    }

    /// Identifier the bundle was loaded under. Empty for the initial bundle.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw value for `key`, without the missing-translation fallback.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// Look up `key`, degrading to [`MISSING_TRANSLATION`].
    ///
    /// Empty values count as missing.
    pub fn translate(&self, key: &str) -> &str {
        match self.get(key) {
            Some(value) if !value.is_empty() => value,
            _ => MISSING_TRANSLATION,
        }
    }

    /// Number of strings in the bundle.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the bundle holds no strings.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Result of a successful bundle load.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The bundle for the effective tag was loaded.
    Requested { id: String },

    /// The requested bundle failed and the default-locale bundle was loaded instead.
    Fallback {
        requested: String,
        fallback: String,
        error: BundleLoadError,
    },
}

impl LoadOutcome {
    /// Identifier of the bundle that is now active.
    pub fn loaded_id(&self) -> &str {
        match self {
            LoadOutcome::Requested { id } => id,
            LoadOutcome::Fallback { fallback, .. } => fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LoadOutcome::Fallback { .. })
    }
}

type LoaderFn =
    Arc<dyn Fn() -> BoxFuture<'static, Result<TranslationBundle, BundleLoadError>> + Send + Sync>;

/// Lookup table from bundle identifier to loader.
#[derive(Clone, Default)]
pub struct BundleRegistry {
    loaders: HashMap<String, LoaderFn>,
}

impl BundleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an async loader for `id`, replacing any previous one.
    pub fn register<F, Fut>(&mut self, id: impl Into<String>, load: F) -> &mut Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<HashMap<String, String>, BundleLoadError>>
            + Send
            + 'static,
    {
        let id = id.into();
        let bundle_id = id.clone();
        let loader: LoaderFn = Arc::new(move || {
            let bundle_id = bundle_id.clone();
            load()
                .map(move |strings| strings.map(|s| TranslationBundle::new(bundle_id, s)))
                .boxed()
        });
        self.loaders.insert(id, loader);
        self
    }

    /// Register an in-memory string table for `id`.
    pub fn register_strings<I, K, V>(&mut self, id: impl Into<String>, strings: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let strings: Arc<HashMap<String, String>> = Arc::new(
            strings
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self.register(id, move || {
            let strings = Arc::clone(&strings);
            async move { Ok((*strings).clone()) }
        })
    }

    /// Register a JSON file holding a flat `{"key": "value"}` object for `id`.
    ///
    /// The file is read on every load, not at registration.
    pub fn register_file(&mut self, id: impl Into<String>, path: impl Into<PathBuf>) -> &mut Self {
        let id = id.into();
        let path: PathBuf = path.into();
        let file_id = id.clone();
        self.register(id, move || read_bundle_file(file_id.clone(), path.clone()))
    }

    /// Register every `<id>.json` file in `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let mut registry = Self::new();
        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) {
                let id = id.to_string();
                registry.register_file(id, path);
            }
        }
        debug!(
            "Registered {} bundle files from {}",
            registry.len(),
            dir.as_ref().display()
        );
        Ok(registry)
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered identifiers.
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// Whether no loader is registered.
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Load the bundle registered under `id`.
    pub async fn load(&self, id: &str) -> Result<TranslationBundle, BundleLoadError> {
        let loader = self
            .loaders
            .get(id)
            .cloned()
            .ok_or_else(|| BundleLoadError::NotRegistered(id.to_string()))?;
        debug!("Loading bundle {}", id);
        loader().await
    }
}

impl std::fmt::Debug for BundleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

async fn read_bundle_file(
    id: String,
    path: PathBuf,
) -> Result<HashMap<String, String>, BundleLoadError> {
    let raw = tokio::fs::read(&path)
        .await
        .map_err(|source| BundleLoadError::Io {
            id: id.clone(),
            source,
        })?;
    serde_json::from_slice(&raw).map_err(|source| BundleLoadError::Parse { id, source })
}
