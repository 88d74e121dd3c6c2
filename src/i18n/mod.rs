//! Internationalization (i18n) module: language and locale negotiation.
//!
//! This module decides which language and regional locale the interface is
//! presented in, persists that choice, and loads the matching translation
//! bundle.
//!
//! # Architecture
//!
//! - `registry`: Supported languages, supported locales and right-to-left languages
//! - `language`: The `Selection` pair and text direction
//! - `bundle`: Translation bundles and the identifier → loader registry
//! - `store`: Durable key-value storage for the persisted selection
//! - `presentation`: Sink for the document `lang`/`dir` attributes
//! - `context`: Query string access for the `lang` override
//! - `resolver`: The `LocaleResolver` tying the above together
//!
//! # Example
//!
//! ```rust,ignore
//! use locale_resolver::i18n::{
//!     BundleRegistry, LanguageRegistry, LocaleResolver, MemoryStore, NoContext, TracingSink,
//! };
//!
//! let resolver = LocaleResolver::new(
//!     LanguageRegistry::get().clone(),
//!     MemoryStore::new(),
//!     TracingSink,
//!     BundleRegistry::from_dir("i18n")?,
//! );
//! let selection = resolver.resolve_at_startup(&mut NoContext, Some("en-US")).await?;
//! println!("{}", resolver.translate("title"));
//! ```

mod bundle;
mod context;
mod error;
mod language;
mod presentation;
mod registry;
mod resolver;
mod store;

pub use bundle::{BundleRegistry, LoadOutcome, TranslationBundle, MISSING_TRANSLATION};
pub use context::{NavigationContext, NoContext, UrlContext, LANG_PARAM};
pub use error::{BundleLoadError, LocaleError};
pub use language::{Selection, TextDirection};
pub use presentation::{NoopSink, PresentationSink, TracingSink};
pub use registry::LanguageRegistry;
pub use resolver::LocaleResolver;
pub use store::{FileStore, MemoryStore, SelectionStore, STORAGE_KEY};
