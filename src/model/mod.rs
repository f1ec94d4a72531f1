// src/model/mod.rs
//! Domain model for blog posts fetched from the content repository.
//!
//! Everything here is built fresh from an API response and discarded once
//! rendered; nothing is mutated after construction.

mod rich_text;

pub use rich_text::{Block, Span, SpanKind, TextBlock};

use crate::types::{Cursor, DocumentUid};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post with its full body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub uid: DocumentUid,
    pub first_publication_date: Option<DateTime<Utc>>,
    pub last_publication_date: Option<DateTime<Utc>>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner: Option<Banner>,
    pub content: Vec<Section>,
}

impl Document {
    /// Whether the post was republished after its first publication.
    pub fn was_edited(&self) -> bool {
        match (self.first_publication_date, self.last_publication_date) {
            (Some(first), Some(last)) => last > first,
            _ => false,
        }
    }

    /// The listing view of this post.
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            uid: self.uid.clone(),
            first_publication_date: self.first_publication_date,
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            author: self.author.clone(),
        }
    }
}

/// One titled section of a post body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub body: Vec<Block>,
}

impl Section {
    pub fn new(heading: impl Into<String>, body: Vec<Block>) -> Self {
        Self {
            heading: heading.into(),
            body,
        }
    }
}

/// Banner image shown at the top of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub url: String,
    pub alt: Option<String>,
}

/// The fields of a post shown in the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub uid: DocumentUid,
    pub first_publication_date: Option<DateTime<Utc>>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// One page of query results plus the locator of the following page.
///
/// An absent `next_page` means pagination is finished.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub results: Vec<PostSummary>,
    pub next_page: Option<Cursor>,
}

impl PageResult {
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }
}
