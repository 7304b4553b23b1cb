//! Expanded-content sources.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

/// Error reported by a lazy content producer.
///
/// It never reaches the caller of [`expand`](super::ExpandableCard::expand):
/// the card logs it and shows an inline error instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ContentError {
    message: String,
}

impl ContentError {
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for ContentError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for ContentError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

type ProducerFn = dyn Fn() -> BoxFuture<'static, Result<String, ContentError>> + Send + Sync;

/// A zero-argument async function producing markup.
#[derive(Clone)]
pub struct ContentProducer(Arc<ProducerFn>);

impl ContentProducer {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ContentError>> + Send + 'static,
    {
        Self(Arc::new(move || f().boxed()))
    }

    pub(crate) fn produce(&self) -> BoxFuture<'static, Result<String, ContentError>> {
        (self.0)()
    }
}

impl std::fmt::Debug for ContentProducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ContentProducer(..)")
    }
}

/// Where a card's expanded content comes from.
#[derive(Clone, Debug)]
pub enum CardContent {
    /// Fixed markup, rendered on first expansion and reused afterwards.
    Static(String),
    /// Markup produced on demand. A successful result is cached; a failure
    /// is not, so the next expansion tries again.
    Lazy(ContentProducer),
}

impl CardContent {
    pub fn lazy<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ContentError>> + Send + 'static,
    {
        Self::Lazy(ContentProducer::new(f))
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }
}

impl Default for CardContent {
    fn default() -> Self {
        Self::Static(String::new())
    }
}

impl From<String> for CardContent {
    fn from(markup: String) -> Self {
        Self::Static(markup)
    }
}

impl From<&str> for CardContent {
    fn from(markup: &str) -> Self {
        Self::Static(markup.to_string())
    }
}
