//! Presentation sink: where `lang` and `dir` are applied to the rendered document.

use crate::i18n::TextDirection;
use tracing::info;

/// Receives the effective language tag and text direction on every selection change.
pub trait PresentationSink: Send + Sync {
    fn set_lang(&self, tag: &str);

    fn set_dir(&self, direction: TextDirection);
}

/// Sink that discards notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl PresentationSink for NoopSink {
    fn set_lang(&self, _tag: &str) {}

    fn set_dir(&self, _direction: TextDirection) {}
}

/// Sink that only logs notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl PresentationSink for TracingSink {
    fn set_lang(&self, tag: &str) {
        info!("Document language set to {}", tag);
    }

    fn set_dir(&self, direction: TextDirection) {
        info!("Document direction set to {}", direction);
    }
}

impl<T: PresentationSink + ?Sized> PresentationSink for std::sync::Arc<T> {
    fn set_lang(&self, tag: &str) {
        (**self).set_lang(tag)
    }

    fn set_dir(&self, direction: TextDirection) {
        (**self).set_dir(direction)
    }
}
