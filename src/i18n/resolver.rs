//! Locale resolver: decides, persists and loads the active language and locale.
//!
//! The resolver is an explicit context object. Construct it once at startup,
//! call [`LocaleResolver::resolve_at_startup`], then hand it by reference to
//! whatever renders strings.
//!
//! Resolution precedence, first match wins:
//! 1. an explicit `lang` query parameter (consumed and stripped),
//! 2. the selection persisted by a previous session,
//! 3. the environment's preferred language tag,
//! 4. the default language.

use crate::i18n::{
    BundleRegistry, LanguageRegistry, LoadOutcome, LocaleError, NavigationContext,
    PresentationSink, Selection, SelectionStore, TextDirection, TranslationBundle, LANG_PARAM,
    STORAGE_KEY,
};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Owner of the active selection and its translation bundle.
pub struct LocaleResolver<S, P> {
    registry: LanguageRegistry,
    store: S,
    sink: P,
    bundles: BundleRegistry,
    selection: RwLock<Option<Selection>>,
    bundle: RwLock<Arc<TranslationBundle>>,
}

impl<S, P> LocaleResolver<S, P>
where
    S: SelectionStore,
    P: PresentationSink,
{
    /// Create an unresolved resolver. No bundle is loaded until a selection is made.
    pub fn new(registry: LanguageRegistry, store: S, sink: P, bundles: BundleRegistry) -> Self {
        Self {
            registry,
            store,
            sink,
            bundles,
            selection: RwLock::new(None),
            bundle: RwLock::new(Arc::new(TranslationBundle::default())),
        }
    }

    /// Determine the initial selection and apply it.
    ///
    /// `preferred_tag` is the environment's reported language (e.g. `"en-US"`),
    /// consulted only when neither an override nor a persisted selection applies.
    /// On return the store, the presentation sink and the bundle all reflect
    /// the returned selection.
    pub async fn resolve_at_startup<C>(
        &self,
        ctx: &mut C,
        preferred_tag: Option<&str>,
    ) -> Result<Selection, LocaleError>
    where
        C: NavigationContext + ?Sized,
    {
        if let Some(selection) = self.apply_override(ctx).await? {
            info!("Using language from query override: {}", selection);
            return Ok(selection);
        }

        if let Some(selection) = self.apply_persisted().await? {
            info!("Using persisted language: {}", selection);
            return Ok(selection);
        }

        let selection = self.select_from_preference(preferred_tag);
        self.set_selection(&selection.language, &selection.locale)
            .await?;
        info!(
            "Using environment language: {} (reported {:?})",
            selection, preferred_tag
        );
        Ok(selection)
    }

    /// Validate and apply a selection, persist it, notify the presentation
    /// sink and load the matching bundle.
    ///
    /// Returns once the bundle has loaded or fallen back to the default locale.
    pub async fn set_selection(
        &self,
        language: &str,
        locale: &str,
    ) -> Result<LoadOutcome, LocaleError> {
        let selection = self.validate(language, locale)?;

        let serialized =
            serde_json::to_string(&selection).map_err(|e| LocaleError::Storage(e.into()))?;
        self.store
            .set(STORAGE_KEY, &serialized)
            .map_err(LocaleError::Storage)?;

        let tag = selection.effective_tag();
        let direction = self.direction_for(&selection.language);
        *self.selection.write().unwrap_or_else(PoisonError::into_inner) = Some(selection);

        self.sink.set_lang(&tag);
        self.sink.set_dir(direction);
        info!("Language set to {} ({})", tag, direction);

        self.load_bundle_for(tag).await
    }

    /// Check a `(language, locale)` pair against the registry.
    pub fn validate(&self, language: &str, locale: &str) -> Result<Selection, LocaleError> {
        if !self.registry.is_supported_language(language) {
            return Err(LocaleError::UnsupportedLanguage(language.to_string()));
        }

        let selection = Selection::new(language, locale);
        if selection.has_locale()
            && !self.registry.is_supported_locale(&selection.effective_tag())
        {
            return Err(LocaleError::UnsupportedLocale(selection.effective_tag()));
        }

        Ok(selection)
    }

    /// Load the bundle for the current effective tag, falling back to the
    /// default-locale bundle if that fails.
    ///
    /// Only a failure of the default-locale bundle is returned as an error; the
    /// previously loaded bundle stays in place in that case.
    pub async fn load_bundle(&self) -> Result<LoadOutcome, LocaleError> {
        let requested = self
            .effective_tag()
            .unwrap_or_else(|| self.registry.default_locale().to_string());
        self.load_bundle_for(requested).await
    }

    /// Translated string for `key`, or the missing-translation sentinel.
    pub fn translate(&self, key: &str) -> String {
        self.bundle().translate(key).to_string()
    }

    async fn load_bundle_for(&self, requested: String) -> Result<LoadOutcome, LocaleError> {
        let fallback = self.registry.default_locale().to_string();

        let error = match self.bundles.load(&requested).await {
            Ok(bundle) => {
                self.replace_bundle(bundle);
                return Ok(LoadOutcome::Requested { id: requested });
            }
            Err(error) => error,
        };

        if requested == fallback {
            return Err(LocaleError::FatalBundleLoad {
                id: fallback,
                source: error,
            });
        }

        warn!(
            "Bundle {} failed to load ({}), falling back to {}",
            requested, error, fallback
        );

        match self.bundles.load(&fallback).await {
            Ok(bundle) => {
                self.replace_bundle(bundle);
                Ok(LoadOutcome::Fallback {
                    requested,
                    fallback,
                    error,
                })
            }
            Err(source) => Err(LocaleError::FatalBundleLoad {
                id: fallback,
                source,
            }),
        }
    }

    /// Turn an environment language tag into a supported selection.
    ///
    /// The region is uppercased. An absent or unsupported language yields the
    /// default language with no locale; a supported language with an
    /// unsupported region keeps the language and drops the region.
    pub fn select_from_preference(&self, tag: Option<&str>) -> Selection {
        let mut selection = Selection::from_tag(tag.unwrap_or_default());
        selection.locale = selection.locale.to_uppercase();

        if selection.language.is_empty()
            || !self.registry.is_supported_language(&selection.language)
        {
            return Selection::new(self.registry.default_language(), "");
        }

        if selection.has_locale()
            && !self.registry.is_supported_locale(&selection.effective_tag())
        {
            debug!(
                "Region {} is not supported for {}, dropping it",
                selection.locale, selection.language
            );
            selection.locale.clear();
        }

        selection
    }

    /// The active selection, `None` before the first successful `set_selection`.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The active effective tag (`language` or `language-locale`), if resolved.
    pub fn effective_tag(&self) -> Option<String> {
        self.selection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Selection::effective_tag)
    }

    /// Text direction of the active language (`ltr` before resolution).
    pub fn direction(&self) -> TextDirection {
        match self.selection() {
            Some(selection) => self.direction_for(&selection.language),
            None => TextDirection::Ltr,
        }
    }

    /// The current bundle. Empty until the first load completes.
    pub fn bundle(&self) -> Arc<TranslationBundle> {
        Arc::clone(&self.bundle.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Supported languages, default first.
    pub fn supported_languages(&self) -> &[String] {
        self.registry.languages()
    }

    /// Supported locales, default first.
    pub fn supported_locales(&self) -> &[String] {
        self.registry.locales()
    }

    /// The selection store the resolver persists to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The presentation sink notified on selection changes.
    pub fn sink(&self) -> &P {
        &self.sink
    }

    async fn apply_override<C>(&self, ctx: &mut C) -> Result<Option<Selection>, LocaleError>
    where
        C: NavigationContext + ?Sized,
    {
        let Some(param) = ctx.query_param(LANG_PARAM) else {
            return Ok(None);
        };
        let matches_language = param
            .get(..2)
            .is_some_and(|prefix| self.registry.is_supported_language(prefix));
        if !matches_language {
            debug!("Ignoring unsupported lang parameter {:?}", param);
            return Ok(None);
        }

        let requested = Selection::from_tag(&param);
        let applied = self
            .set_selection(&requested.language, &requested.locale)
            .await;

        // The override is consumed either way
        ctx.strip_and_reload(LANG_PARAM);

        match applied {
            Ok(_) => Ok(Some(requested)),
            Err(e @ (LocaleError::UnsupportedLanguage(_) | LocaleError::UnsupportedLocale(_))) => {
                warn!("Rejected lang parameter {:?}: {}", param, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn apply_persisted(&self) -> Result<Option<Selection>, LocaleError> {
        let Some(raw) = self.store.get(STORAGE_KEY).map_err(LocaleError::Storage)? else {
            return Ok(None);
        };

        let persisted: Selection = match serde_json::from_str(&raw) {
            Ok(selection) => selection,
            Err(e) => {
                warn!("Ignoring unreadable persisted language {:?}: {}", raw, e);
                return Ok(None);
            }
        };

        match self
            .set_selection(&persisted.language, &persisted.locale)
            .await
        {
            Ok(_) => Ok(Some(persisted)),
            Err(e @ (LocaleError::UnsupportedLanguage(_) | LocaleError::UnsupportedLocale(_))) => {
                warn!("Ignoring persisted language {}: {}", persisted, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn direction_for(&self, language: &str) -> TextDirection {
        if self.registry.is_rtl(language) {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }

    fn replace_bundle(&self, bundle: TranslationBundle) {
        debug!("Bundle {} ready ({} strings)", bundle.id(), bundle.len());
        *self.bundle.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(bundle);
    }
}

impl<S, P> std::fmt::Debug for LocaleResolver<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleResolver")
            .field("selection", &self.selection)
            .field("bundles", &self.bundles)
            .finish_non_exhaustive()
    }
}
