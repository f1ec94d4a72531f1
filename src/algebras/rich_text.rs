//! Rich-text rendering algebra.

use crate::model::Block;

/// Turns rich-text blocks into display strings.
///
/// # Laws
///
/// - **L1 (Text-Only)**: `as_plain_text` never emits markup; it is the
///   block's readable text and nothing else.
/// - **L2 (Non-text blocks)**: blocks without text (images, embeds) render
///   to the empty string in `as_plain_text`.
///
/// This trait is **object-safe** and can be used as `&dyn RichTextRenderer`.
pub trait RichTextRenderer: Send + Sync {
    /// The plain text of one block.
    fn as_plain_text(&self, block: &Block) -> String;

    /// Markup for a sequence of blocks; adjacent list items are grouped.
    fn as_markup(&self, blocks: &[Block]) -> String;
}
