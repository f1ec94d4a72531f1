// src/model/rich_text.rs
use serde::{Deserialize, Serialize};

/// A structured rich-text fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Heading { level: u8, content: TextBlock },
    Paragraph(TextBlock),
    Preformatted(TextBlock),
    ListItem(TextBlock),
    OrderedListItem(TextBlock),
    Image { url: String, alt: Option<String> },
    Embed { url: Option<String>, html: Option<String> },
    Unsupported { kind: String },
}

impl Block {
    /// Shorthand for a paragraph without spans.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(TextBlock::plain(text))
    }

    /// The text carried by this block, if it is a text block.
    pub fn text_content(&self) -> Option<&TextBlock> {
        match self {
            Block::Heading { content, .. }
            | Block::Paragraph(content)
            | Block::Preformatted(content)
            | Block::ListItem(content)
            | Block::OrderedListItem(content) => Some(content),
            Block::Image { .. } | Block::Embed { .. } | Block::Unsupported { .. } => None,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph(_) => "paragraph",
            Block::Preformatted(_) => "preformatted",
            Block::ListItem(_) => "list-item",
            Block::OrderedListItem(_) => "o-list-item",
            Block::Image { .. } => "image",
            Block::Embed { .. } => "embed",
            Block::Unsupported { kind } => kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub spans: Vec<Span>,
}

impl TextBlock {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }
}

/// Inline formatting over `text`; `start`/`end` are character offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpanKind {
    Strong,
    Em,
    Hyperlink { url: String },
    Label { name: String },
}
