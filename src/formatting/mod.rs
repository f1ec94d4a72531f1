// src/formatting/mod.rs
//! Turns posts into display text and HTML pages.

mod dates;
mod rich_text;
mod site;
mod text_view;

pub use self::dates::{format_edit_note, format_optional_date, format_publication_date};
pub use self::rich_text::{PrismicRichText, DEFAULT_TEXT_SEPARATOR};
pub use self::site::{CommentWidget, SiteRenderer};
pub use self::text_view::{compose_post_listing, compose_post_text};
