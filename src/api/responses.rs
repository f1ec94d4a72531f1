// src/api/responses.rs
//! Wire types for the Prismic REST API v2 and their conversion into the
//! domain model.
//!
//! Fields that a repository may leave empty come back as `null` or go
//! missing entirely, so nearly everything here is optional and defaults
//! are applied during conversion.

use crate::error::AppError;
use crate::model::{Banner, Block, Document, PageResult, PostSummary, Section, Span, SpanKind, TextBlock};
use crate::types::{Cursor, DocumentUid};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// `GET {endpoint}`: repository metadata; only the refs are used.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiInfoResponse {
    pub refs: Vec<RefResponse>,
}

impl ApiInfoResponse {
    /// The ref of the published (master) release.
    pub fn master_ref(&self) -> Option<&str> {
        self.refs
            .iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefResponse {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

/// `GET {endpoint}/documents/search`: one page of documents.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results_per_page: u32,
    #[serde(default)]
    pub total_results_size: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub prev_page: Option<String>,
    pub results: Vec<DocumentResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentResponse {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub last_publication_date: Option<String>,
    #[serde(default)]
    pub data: PostDataResponse,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostDataResponse {
    #[serde(default)]
    pub title: Option<TextField>,
    #[serde(default)]
    pub subtitle: Option<TextField>,
    #[serde(default)]
    pub author: Option<TextField>,
    #[serde(default)]
    pub banner: Option<ImageResponse>,
    #[serde(default)]
    pub content: Option<Vec<SectionResponse>>,
}

/// A text field modelled either as Key Text or as a Title rich-text field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    Plain(String),
    Rich(Vec<RichTextBlockResponse>),
}

impl TextField {
    pub fn into_plain_text(self) -> String {
        match self {
            TextField::Plain(text) => text,
            TextField::Rich(blocks) => blocks
                .into_iter()
                .filter_map(|block| block.text)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Image fields are `{}` when no image was uploaded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionResponse {
    #[serde(default)]
    pub heading: Option<TextField>,
    #[serde(default)]
    pub body: Option<Vec<RichTextBlockResponse>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RichTextBlockResponse {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub spans: Vec<SpanResponse>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub oembed: Option<OembedResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpanResponse {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OembedResponse {
    #[serde(default)]
    pub embed_url: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn description(&self) -> Option<String> {
        self.message.clone().or_else(|| self.error.clone())
    }
}

// ---------------------------------------------------------------------------
// Conversion into the domain model
// ---------------------------------------------------------------------------

/// Trait for converting wire types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, AppError>;
}

impl ToDomain<Document> for DocumentResponse {
    fn to_domain(self) -> Result<Document, AppError> {
        let uid = require_uid(&self.id, self.uid.as_deref())?;
        let data = self.data;

        Ok(Document {
            uid,
            first_publication_date: parse_timestamp(self.first_publication_date.as_deref()),
            last_publication_date: parse_timestamp(self.last_publication_date.as_deref()),
            title: text_or_empty(data.title),
            subtitle: text_or_empty(data.subtitle),
            author: text_or_empty(data.author),
            banner: data.banner.and_then(|image| {
                image.url.map(|url| Banner {
                    url,
                    alt: image.alt,
                })
            }),
            content: data
                .content
                .unwrap_or_default()
                .into_iter()
                .map(convert_section)
                .collect(),
            id: self.id,
        })
    }
}

impl ToDomain<PostSummary> for DocumentResponse {
    fn to_domain(self) -> Result<PostSummary, AppError> {
        let uid = require_uid(&self.id, self.uid.as_deref())?;
        Ok(PostSummary {
            uid,
            first_publication_date: parse_timestamp(self.first_publication_date.as_deref()),
            title: text_or_empty(self.data.title),
            subtitle: text_or_empty(self.data.subtitle),
            author: text_or_empty(self.data.author),
        })
    }
}

impl ToDomain<PageResult> for SearchResponse {
    fn to_domain(self) -> Result<PageResult, AppError> {
        let next_page = self
            .next_page
            .as_deref()
            .map(Cursor::parse)
            .transpose()?;

        let results = self
            .results
            .into_iter()
            .filter_map(|document| {
                let id = document.id.clone();
                match ToDomain::<PostSummary>::to_domain(document) {
                    Ok(summary) => Some(summary),
                    Err(e) => {
                        log::warn!("Skipping listed document {}: {}", id, e);
                        None
                    }
                }
            })
            .collect();

        Ok(PageResult { results, next_page })
    }
}

impl From<RichTextBlockResponse> for Block {
    fn from(block: RichTextBlockResponse) -> Self {
        let content = || TextBlock {
            text: block.text.clone().unwrap_or_default(),
            spans: block.spans.iter().filter_map(convert_span).collect(),
        };

        match block.kind.as_str() {
            "heading1" | "heading2" | "heading3" | "heading4" | "heading5" | "heading6" => {
                let level = block.kind[7..].parse().unwrap_or(1);
                Block::Heading {
                    level,
                    content: content(),
                }
            }
            "paragraph" => Block::Paragraph(content()),
            "preformatted" => Block::Preformatted(content()),
            "list-item" => Block::ListItem(content()),
            "o-list-item" => Block::OrderedListItem(content()),
            "image" => Block::Image {
                url: block.url.clone().unwrap_or_default(),
                alt: block.alt.clone(),
            },
            "embed" => {
                let oembed = block.oembed.clone().unwrap_or_default();
                Block::Embed {
                    url: oembed.embed_url,
                    html: oembed.html,
                }
            }
            other => Block::Unsupported {
                kind: other.to_string(),
            },
        }
    }
}

fn require_uid(id: &str, uid: Option<&str>) -> Result<DocumentUid, AppError> {
    let uid = uid.ok_or_else(|| {
        AppError::MalformedResponse(format!("document {} has no UID", id))
    })?;
    Ok(DocumentUid::parse(uid)?)
}

fn text_or_empty(field: Option<TextField>) -> String {
    field.map(TextField::into_plain_text).unwrap_or_default()
}

fn convert_section(section: SectionResponse) -> Section {
    Section {
        heading: text_or_empty(section.heading),
        body: section
            .body
            .unwrap_or_default()
            .into_iter()
            .map(Block::from)
            .collect(),
    }
}

fn convert_span(span: &SpanResponse) -> Option<Span> {
    let data_field = |key: &str| {
        span.data
            .as_ref()
            .and_then(|data| data.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let kind = match span.kind.as_str() {
        "strong" => SpanKind::Strong,
        "em" => SpanKind::Em,
        "hyperlink" => SpanKind::Hyperlink {
            url: data_field("url")?,
        },
        "label" => SpanKind::Label {
            name: data_field("label")?,
        },
        other => {
            log::debug!("Skipping unsupported span type '{}'", other);
            return None;
        }
    };

    Some(Span {
        start: span.start,
        end: span.end,
        kind,
    })
}

/// Parses Prismic timestamps (`2021-03-25T19:25:28+0000`) as well as RFC 3339.
pub fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?;
    let parsed = DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z"));

    match parsed {
        Ok(timestamp) => Some(timestamp.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("Ignoring unparseable timestamp '{}': {}", value, e);
            None
        }
    }
}
