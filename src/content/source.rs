//! HTTP client for the headless content source

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::{Post, PostPage};
use crate::config::SiteConfig;

/// Errors surfaced by the content source
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure (connect, timeout, body decode)
    #[error("content source unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),

    /// The source answered with a non-success status
    #[error("content source returned HTTP {0}")]
    Status(StatusCode),

    /// A single-document fetch matched nothing
    #[error("no document found for slug \"{0}\"")]
    NotFound(String),
}

/// Anything that can resolve a pagination cursor into the next page of
/// results. The cursor is an opaque URL handed back by the source.
#[async_trait]
pub trait PageFetcher {
    async fn fetch_page(&self, cursor: &str) -> Result<PostPage, SourceError>;
}

/// Content source backed by a Prismic-style document search API
#[derive(Debug, Clone)]
pub struct ContentSource {
    client: Client,
    api_url: String,
    document_type: String,
    page_size: usize,
}

impl ContentSource {
    /// Create a client for the configured content repository
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            document_type: config.document_type.clone(),
            page_size: config.page_size,
        }
    }

    /// Query the first page of posts for the configured document type
    pub async fn query_posts(&self) -> Result<PostPage, SourceError> {
        let predicate = format!(r#"[[at(document.type,"{}")]]"#, self.document_type);

        tracing::debug!("Querying posts: type={}", self.document_type);
        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("q", predicate.as_str()),
                ("pageSize", &self.page_size.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }

        Ok(response.json().await?)
    }

    /// Fetch a single post by its slug, with a distinct not-found signal
    pub async fn get_by_slug(&self, slug: &str) -> Result<Post, SourceError> {
        let predicate = format!(r#"[[at(my.{}.uid,"{}")]]"#, self.document_type, slug);

        tracing::debug!("Fetching post by slug: {}", slug);
        let response = self
            .client
            .get(self.search_url())
            .query(&[("q", predicate.as_str()), ("pageSize", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }

        let page: PostPage = response.json().await?;
        page.results
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::NotFound(slug.to_string()))
    }

    fn search_url(&self) -> String {
        format!("{}/documents/search", self.api_url)
    }
}

#[async_trait]
impl PageFetcher for ContentSource {
    async fn fetch_page(&self, cursor: &str) -> Result<PostPage, SourceError> {
        tracing::debug!("Fetching next page: {}", cursor);
        let response = self.client.get(cursor).send().await?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}
