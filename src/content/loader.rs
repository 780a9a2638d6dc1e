//! Content fetching with fallback and the "content ready" signal.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;

use crate::config::ContentConfig;
use crate::content::types::SiteContent;
use crate::observability::metrics;
use crate::security::sanitize::sanitize_fragment;

/// Why content could not be loaded.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid content: {0}")]
    Invalid(String),
}

impl ContentLoadError {
    fn reason(&self) -> &'static str {
        match self {
            ContentLoadError::Fetch(_) => "fetch",
            ContentLoadError::Io(_) => "io",
            ContentLoadError::Parse(_) => "parse",
            ContentLoadError::Invalid(_) => "invalid",
        }
    }
}

type Published = Option<Arc<SiteContent>>;

/// Receiver side of the "content ready" notification.
#[derive(Debug, Clone)]
pub struct ContentReady {
    rx: watch::Receiver<Published>,
}

impl ContentReady {
    /// Wait until content has been published.
    ///
    /// Returns `None` only if the loader was dropped before publishing.
    pub async fn wait(&mut self) -> Option<Arc<SiteContent>> {
        let published = self.rx.wait_for(Option::is_some).await.ok()?;
        Option::clone(&published)
    }

    /// Content published so far, without waiting.
    pub fn current(&self) -> Option<Arc<SiteContent>> {
        self.rx.borrow().clone()
    }
}

/// Loads site content from a URL or a local file.
pub struct ContentLoader {
    source: String,
    client: Client,
    ready_tx: watch::Sender<Published>,
}

impl ContentLoader {
    pub fn new(config: &ContentConfig) -> Result<Self, ContentLoadError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let (ready_tx, _) = watch::channel(None);
        Ok(Self {
            source: config.source.clone(),
            client,
            ready_tx,
        })
    }

    /// Subscribe to "content ready".
    pub fn subscribe(&self) -> ContentReady {
        ContentReady {
            rx: self.ready_tx.subscribe(),
        }
    }

    /// Load, validate and publish content. Falls back to the built-in set on
    /// any failure, so this always publishes something.
    pub async fn load(&self) -> Arc<SiteContent> {
        let content = match self.fetch().await {
            Ok(content) => {
                tracing::info!(source = %self.source, sections = content.sections.len(), "Content loaded");
                content
            }
            Err(e) => {
                tracing::warn!(source = %self.source, error = %e, "Content load failed, using fallback");
                metrics::record_content_fallback(e.reason());
                SiteContent::fallback()
            }
        };

        let content = Arc::new(content);
        self.ready_tx.send_replace(Some(content.clone()));
        content
    }

    /// Fetch an HTML fragment and strip script vectors from it.
    pub async fn load_fragment(&self, source: &str) -> Result<String, ContentLoadError> {
        let raw = self.read_source(source).await?;
        Ok(sanitize_fragment(&raw))
    }

    async fn fetch(&self) -> Result<SiteContent, ContentLoadError> {
        let raw = self.read_source(&self.source).await?;
        let content: SiteContent = serde_json::from_str(&raw)?;
        content.validate().map_err(ContentLoadError::Invalid)?;
        Ok(content)
    }

    async fn read_source(&self, source: &str) -> Result<String, ContentLoadError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            let text = self
                .client
                .get(source)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            Ok(text)
        } else {
            Ok(tokio::fs::read_to_string(source).await?)
        }
    }
}
