//! Capability algebras for prismic-blog.
//!
//! This module defines traits that represent **capabilities**, not
//! implementations. Each trait is:
//!
//! - **Object-safe**: can be used as `dyn Trait`
//! - **Documented with laws**: properties that all implementations must satisfy
//!
//! # Capability Traits
//!
//! - [`ContentSource`]: querying and paging documents from the CMS
//! - [`RichTextRenderer`]: turning rich-text blocks into text or markup
//!
//! Rendering and pagination code receive these as arguments instead of
//! reaching for a global client.

pub mod content;
pub mod error;
pub mod rich_text;
pub mod state;

// Re-exports for convenience
pub use content::ContentSource;
pub use error::{FetchError, PaginationError};
pub use rich_text::RichTextRenderer;
pub use state::PaginationState;
