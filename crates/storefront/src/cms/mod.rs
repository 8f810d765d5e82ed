//! Content API client.
//!
//! Reads book and event listings from the headless content backend and
//! writes sale records after confirmed payments. Requests use `reqwest`
//! defaults end to end, with no retry policy and no caching layer; every
//! page render fetches fresh listing data.

pub mod types;

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::instrument;

use crate::config::ContentApiConfig;

pub use types::{Book, EventRecord, PurchaseLink, SaleRecord};

use types::{BookAttributes, CreateSaleRequest, EventAttributes, ListResponse};

/// Errors that can occur when talking to the content API.
#[derive(Debug, Error)]
pub enum ContentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Client for the headless content API.
///
/// Cheaply cloneable; all state lives behind an `Arc`.
#[derive(Clone)]
pub struct ContentClient {
    inner: Arc<ContentClientInner>,
}

struct ContentClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ContentClient {
    /// Create a new content API client.
    ///
    /// The bearer token, when configured, is attached to every request;
    /// the content API only enforces it for writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ContentApiConfig) -> Result<Self, ContentError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.token {
            let value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&value)
                .map_err(|e| ContentError::Parse(format!("Invalid API token format: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ContentClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Fetch all book listings, with media and purchase links populated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not parse.
    #[instrument(skip(self))]
    pub async fn list_books(&self) -> Result<Vec<Book>, ContentError> {
        let url = format!("{}/api/books?populate=*", self.inner.base_url);
        let response: ListResponse<BookAttributes> = self.get_json(&url).await?;
        Ok(response
            .data
            .into_iter()
            .map(|entry| Book::from_entry(entry, &self.inner.base_url))
            .collect())
    }

    /// Fetch all event listings, soonest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not parse.
    #[instrument(skip(self))]
    pub async fn list_events(&self) -> Result<Vec<EventRecord>, ContentError> {
        let url = format!(
            "{}/api/events?populate=*&sort=date:asc",
            self.inner.base_url
        );
        let response: ListResponse<EventAttributes> = self.get_json(&url).await?;
        Ok(response
            .data
            .into_iter()
            .map(|entry| EventRecord::from_entry(entry, &self.inner.base_url))
            .collect())
    }

    /// Fetch a single book by slug.
    ///
    /// Returns `None` when no book matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not parse.
    #[instrument(skip(self))]
    pub async fn get_book(&self, slug: &str) -> Result<Option<Book>, ContentError> {
        let url = format!(
            "{}/api/books?filters[slug][$eq]={}&populate=*",
            self.inner.base_url,
            urlencoding::encode(slug)
        );
        let response: ListResponse<BookAttributes> = self.get_json(&url).await?;
        Ok(response
            .data
            .into_iter()
            .next()
            .map(|entry| Book::from_entry(entry, &self.inner.base_url)))
    }

    /// Persist a sale record.
    ///
    /// Called once per successful processor callback. The caller decides
    /// what a failure means; this method only reports it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the record.
    #[instrument(skip(self, record), fields(reference = %record.reference))]
    pub async fn create_sale(&self, record: &SaleRecord) -> Result<(), ContentError> {
        let url = format!("{}/api/sales", self.inner.base_url);

        let response = self
            .inner
            .client
            .post(&url)
            .json(&CreateSaleRequest { data: record })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = truncated_body(response).await;
            return Err(ContentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    /// Ping the content API health endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<(), ContentError> {
        let url = format!("{}/_health", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = truncated_body(response).await;
            return Err(ContentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    /// GET a URL and parse the JSON body, mapping error responses.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ContentError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = truncated_body(response).await;
            return Err(ContentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ContentError::Parse(e.to_string()))
    }
}

/// Read an error response body, truncated for logging.
async fn truncated_body(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_default()
        .chars()
        .take(500)
        .collect()
}
