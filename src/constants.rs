// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Reading time
// ---------------------------------------------------------------------------

/// Average adult reading speed used to turn a word count into minutes.
pub const WORDS_PER_MINUTE: usize = 200;

// ---------------------------------------------------------------------------
// Prismic API boundaries
// ---------------------------------------------------------------------------

/// Custom type of the blog post documents in the repository.
pub const POST_DOCUMENT_TYPE: &str = "posts";

/// Page size Prismic applies when none is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size the Prismic search endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Ordering used for post listings: newest first.
pub const POST_LISTING_ORDERING: &str = "document.first_publication_date";

/// Fields fetched for listing entries; the body is left out.
pub const POST_LISTING_FIELDS: &[&str] = &["title", "subtitle", "author"];

/// How long a single fetch may take before it is abandoned.
///
/// Zero on the command line means "wait indefinitely".
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// How many post details the exporter fetches at once.
pub const DEFAULT_DETAIL_CONCURRENCY: usize = 4;

// ---------------------------------------------------------------------------
// Site
// ---------------------------------------------------------------------------

/// Name shown in page titles.
pub const SITE_NAME: &str = "spacetraveling";

/// Directory the export command writes to when `--out` is absent.
pub const DEFAULT_EXPORT_DIR: &str = "site";

/// Script that mounts the utterances comment thread.
pub const UTTERANCES_CLIENT_URL: &str = "https://utteranc.es/client.js";

/// Comment threads are matched to posts by page path.
pub const COMMENTS_ISSUE_TERM: &str = "pathname";

pub const DEFAULT_COMMENTS_THEME: &str = "github-dark";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
