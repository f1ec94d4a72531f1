//! Content retrieval algebra for the headless CMS.
//!
//! This module defines the [`ContentSource`] capability trait. The trait is
//! focused on the three operations the site needs, without HTTP, refs or
//! query-string details.

use crate::api::QueryOptions;
use crate::model::{Document, PageResult};
use crate::types::{Cursor, DocumentUid};
use async_trait::async_trait;

use super::error::FetchError;

/// Document retrieval capability.
///
/// # Laws
///
/// All implementations must satisfy these laws:
///
/// - **L1 (Idempotency)**: Fetching the same UID twice returns identical content.
///   ```text
///   get_by_uid(t, uid) == d1
///   get_by_uid(t, uid) == d2
///   assert_eq!(d1, d2)
///   ```
///
/// - **L2 (UID-Identity)**: A retrieved document's UID matches the requested UID.
///   ```text
///   get_by_uid(t, uid) == doc
///   assert(doc.uid == uid)
///   ```
///
/// - **L3 (Cursor-Dereference)**: A page's cursor, when present, is itself
///   fetchable and yields the following page.
///   ```text
///   query_by_type(t, opts) == p1
///   p1.next_page == Some(c)
///   fetch_page(c) == p2   // the page after p1
///   ```
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `Arc<dyn ContentSource>`.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Query the first page of documents of a custom type.
    async fn query_by_type(
        &self,
        doc_type: &str,
        options: &QueryOptions,
    ) -> Result<PageResult, FetchError>;

    /// Retrieve a single document of a custom type by its UID.
    async fn get_by_uid(&self, doc_type: &str, uid: &DocumentUid)
        -> Result<Document, FetchError>;

    /// Dereference a next-page cursor returned by an earlier query.
    async fn fetch_page(&self, cursor: &Cursor) -> Result<PageResult, FetchError>;
}
