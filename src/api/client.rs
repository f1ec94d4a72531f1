// src/api/client.rs
//! HTTP client for the Prismic REST API v2.
//!
//! Every search must name a content release ("ref"). The published release
//! is looked up once per client from the repository metadata and reused for
//! all later searches.

use super::parser;
use super::types::{at_predicate, QueryOptions};
use crate::algebras::{ContentSource, FetchError};
use crate::error::AppError;
use crate::model::{Document, PageResult};
use crate::types::{AccessToken, ApiEndpoint, Cursor, DocumentUid};
use reqwest::{header, Client, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use url::Url;

const ACCESS_TOKEN_PARAM: &str = "access_token";

/// A thin wrapper around reqwest Client for Prismic API requests.
#[derive(Clone)]
pub struct PrismicHttpClient {
    client: Client,
    endpoint: ApiEndpoint,
    access_token: Option<AccessToken>,
    master_ref: Arc<OnceCell<String>>,
}

impl PrismicHttpClient {
    /// Creates a client for `endpoint`.
    ///
    /// `timeout` bounds every request; `None` waits indefinitely.
    pub fn new(
        endpoint: ApiEndpoint,
        access_token: Option<AccessToken>,
        timeout: Option<Duration>,
    ) -> Result<Self, AppError> {
        let mut builder = Client::builder()
            .default_headers(Self::create_headers())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
            access_token,
            master_ref: Arc::new(OnceCell::new()),
        })
    }

    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    /// Makes a GET request to an absolute URL.
    pub async fn get(&self, url: Url) -> Result<Response, AppError> {
        log::debug!("GET {}", loggable_url(&url));
        let response = self.client.get(url).send().await?;
        log::debug!("{} <- {}", response.status(), loggable_url(response.url()));
        Ok(response)
    }

    /// The ref of the published release, fetched on first use.
    pub async fn master_ref(&self) -> Result<&str, AppError> {
        let reference = self
            .master_ref
            .get_or_try_init(|| async {
                let url = self.with_access_token(self.endpoint.as_url().clone());
                let response = self.get(url).await?;
                let result = extract_response_text(response).await?;
                let reference = parser::parse_master_ref(result)?;
                log::info!("Using master ref {}", reference);
                Ok::<_, AppError>(reference)
            })
            .await?;
        Ok(reference.as_str())
    }

    /// Builds the `documents/search` URL for a predicate query.
    pub fn search_url(&self, reference: &str, predicate: &str, options: &QueryOptions) -> Url {
        let mut url = self.endpoint.search_url();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("ref", reference);
            query.append_pair("q", predicate);
            if let Some(page_size) = options.page_size {
                query.append_pair("pageSize", &page_size.to_string());
            }
            if let Some(after) = &options.after {
                query.append_pair("after", after);
            }
            if let Some(orderings) = options.orderings_param() {
                query.append_pair("orderings", &orderings);
            }
            if let Some(fetch) = options.fetch_param() {
                query.append_pair("fetch", &fetch);
            }
        }
        self.with_access_token(url)
    }

    /// Adds the access token unless the URL already carries one.
    fn with_access_token(&self, mut url: Url) -> Url {
        if let Some(token) = &self.access_token {
            let present = url.query_pairs().any(|(key, _)| key == ACCESS_TOKEN_PARAM);
            if !present {
                url.query_pairs_mut()
                    .append_pair(ACCESS_TOKEN_PARAM, token.as_str());
            }
        }
        url
    }

    /// First page of documents of `doc_type`.
    pub async fn search_by_type(
        &self,
        doc_type: &str,
        options: &QueryOptions,
    ) -> Result<PageResult, AppError> {
        let reference = self.master_ref().await?;
        let url = self.search_url(
            reference,
            &at_predicate("document.type", doc_type),
            options,
        );
        let response = self.get(url).await?;
        let result = extract_response_text(response).await?;
        parser::parse_search_page(result)
    }

    /// The document of `doc_type` whose UID is `uid`.
    pub async fn find_by_uid(&self, doc_type: &str, uid: &DocumentUid) -> Result<Document, AppError> {
        let reference = self.master_ref().await?;
        let url = self.search_url(
            reference,
            &at_predicate(&format!("my.{}.uid", doc_type), uid.as_str()),
            &QueryOptions::new().with_page_size(1),
        );
        let response = self.get(url).await?;
        let result = extract_response_text(response).await?;
        parser::parse_single_document(result)?.ok_or_else(|| AppError::DocumentNotFound {
            doc_type: doc_type.to_string(),
            uid: uid.to_string(),
        })
    }

    /// Follows a `next_page` cursor verbatim.
    pub async fn follow_cursor(&self, cursor: &Cursor) -> Result<PageResult, AppError> {
        let url = self.with_access_token(cursor.as_url().clone());
        let response = self.get(url).await?;
        let result = extract_response_text(response).await?;
        parser::parse_search_page(result)
    }
}

#[async_trait::async_trait]
impl ContentSource for PrismicHttpClient {
    async fn query_by_type(
        &self,
        doc_type: &str,
        options: &QueryOptions,
    ) -> Result<PageResult, FetchError> {
        self.search_by_type(doc_type, options)
            .await
            .map_err(FetchError::from)
    }

    async fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &DocumentUid,
    ) -> Result<Document, FetchError> {
        self.find_by_uid(doc_type, uid)
            .await
            .map_err(FetchError::from)
    }

    async fn fetch_page(&self, cursor: &Cursor) -> Result<PageResult, FetchError> {
        self.follow_cursor(cursor).await.map_err(FetchError::from)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
///
/// A 429 short-circuits into `FetchError::RateLimited` carrying the
/// `Retry-After` delay in seconds when the server sent one.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = loggable_url(response.url());

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_seconds = retry_after(response.headers());
        log::warn!("Rate limited by {} (retry after {:?}s)", url, retry_after_seconds);
        return Err(FetchError::RateLimited {
            retry_after_seconds,
        }
        .into());
    }

    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

/// Delay-seconds form of `Retry-After`; HTTP dates are ignored.
fn retry_after(headers: &header::HeaderMap) -> Option<u64> {
    headers
        .get(header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Renders a URL for logs and error messages with the access token removed.
fn loggable_url(url: &Url) -> String {
    if !url.query_pairs().any(|(key, _)| key == ACCESS_TOKEN_PARAM) {
        return url.to_string();
    }

    let mut redacted = url.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != ACCESS_TOKEN_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(kept);
    redacted.to_string()
}
