// src/lib.rs
//! prismic-blog library: reads blog posts from a Prismic repository, estimates
//! their reading time and renders them as text or static HTML.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `FetchError`, `PaginationError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `SiteConfig`
//! - **Domain model**: `Document`, `Section`, `Block`, `PostSummary`, `PageResult`
//! - **API client**: `PrismicHttpClient`, `PaginationTracker`, `QueryOptions`
//! - **Reading time**: `estimate_reading_minutes`, `count_words`
//! - **Formatting**: `PrismicRichText`, `SiteRenderer`, text views

pub mod algebras;
pub mod analytics;
pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, ContentErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ExportSettings, SiteConfig, SiteTask};

// --- Domain Model ---
pub use crate::model::{
    Banner, Block, Document, PageResult, PostSummary, Section, Span, SpanKind, TextBlock,
};

// --- Domain Types ---
pub use crate::types::{AccessToken, ApiEndpoint, CommentsRepo, Cursor, DocumentUid, ValidatedUrl};

// --- API Client ---
pub use crate::api::{
    at_predicate, ApiResponse, Ordering, PaginationTracker, PrismicHttpClient, QueryOptions,
};

// --- Reading Time ---
pub use crate::analytics::{count_words, estimate_reading_minutes, measure_reading_time, ReadingTime};

// --- Formatting ---
pub use crate::formatting::{
    compose_post_listing, compose_post_text, format_edit_note, format_publication_date,
    CommentWidget, PrismicRichText, SiteRenderer,
};

// --- Output ---
pub use crate::output::{deliver, DeliveryTarget, OutputPlan, OutputReport};

// --- Pipeline ---
pub use crate::pipeline::{BlogPipeline, PageComposer, PostRetrieval, SiteContent, SiteDelivery};

// --- Algebras (Capability Traits) ---
pub use crate::algebras::{
    ContentSource, FetchError, PaginationError, PaginationState, RichTextRenderer,
};
