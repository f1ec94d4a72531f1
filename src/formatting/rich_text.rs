// src/formatting/rich_text.rs
//! Plain-text and HTML rendering of Prismic rich-text blocks.

use crate::algebras::RichTextRenderer;
use crate::model::{Block, Span, SpanKind, TextBlock};
use std::fmt::Write;

/// Separator used by [`PrismicRichText::as_text`] when none is given.
pub const DEFAULT_TEXT_SEPARATOR: &str = " ";

/// Renders rich text the way Prismic's own serializers do.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrismicRichText;

impl PrismicRichText {
    /// Joins the plain text of every text-bearing block with `separator`.
    pub fn as_text(&self, blocks: &[Block], separator: &str) -> String {
        blocks
            .iter()
            .map(|block| self.as_plain_text(block))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl RichTextRenderer for PrismicRichText {
    fn as_plain_text(&self, block: &Block) -> String {
        block
            .text_content()
            .map(|content| content.text.clone())
            .unwrap_or_default()
    }

    fn as_markup(&self, blocks: &[Block]) -> String {
        let mut html = String::new();
        let mut open_list: Option<&'static str> = None;

        for block in blocks {
            let list_tag = match block {
                Block::ListItem(_) => Some("ul"),
                Block::OrderedListItem(_) => Some("ol"),
                _ => None,
            };

            if open_list != list_tag {
                if let Some(tag) = open_list {
                    let _ = write!(html, "</{}>", tag);
                }
                if let Some(tag) = list_tag {
                    let _ = write!(html, "<{}>", tag);
                }
                open_list = list_tag;
            }

            render_block(block, &mut html);
        }

        if let Some(tag) = open_list {
            let _ = write!(html, "</{}>", tag);
        }

        html
    }
}

fn render_block(block: &Block, html: &mut String) {
    match block {
        Block::Heading { level, content } => {
            let level = (*level).clamp(1, 6);
            let _ = write!(html, "<h{0}>{1}</h{0}>", level, render_spans(content));
        }
        Block::Paragraph(content) => {
            let _ = write!(html, "<p>{}</p>", render_spans(content));
        }
        Block::Preformatted(content) => {
            let _ = write!(html, "<pre>{}</pre>", render_spans(content));
        }
        Block::ListItem(content) | Block::OrderedListItem(content) => {
            let _ = write!(html, "<li>{}</li>", render_spans(content));
        }
        Block::Image { url, alt } => {
            let _ = write!(
                html,
                "<img src=\"{}\" alt=\"{}\" />",
                html_escape(url),
                html_escape(alt.as_deref().unwrap_or_default())
            );
        }
        Block::Embed { url, html: embed } => {
            let _ = write!(
                html,
                "<div data-oembed=\"{}\">{}</div>",
                html_escape(url.as_deref().unwrap_or_default()),
                embed.as_deref().unwrap_or_default()
            );
        }
        Block::Unsupported { kind } => {
            log::debug!("Skipping unsupported rich-text block '{}'", kind);
        }
    }
}

/// Applies inline spans to a text block.
///
/// The text is cut at every span boundary and each piece is wrapped in the
/// spans covering it, so overlapping spans still produce balanced tags.
fn render_spans(content: &TextBlock) -> String {
    let chars: Vec<char> = content.text.chars().collect();
    let len = chars.len();

    let spans: Vec<&Span> = content
        .spans
        .iter()
        .filter(|span| span.start < span.end && span.start < len)
        .collect();

    let mut boundaries = vec![0, len];
    for span in &spans {
        boundaries.push(span.start);
        boundaries.push(span.end.min(len));
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut html = String::with_capacity(content.text.len());
    for window in boundaries.windows(2) {
        let (from, to) = (window[0], window[1]);
        let piece: String = chars[from..to].iter().collect();
        let mut rendered = html_escape(&piece).replace('\n', "<br />");

        for span in spans
            .iter()
            .rev()
            .filter(|span| span.start <= from && span.end >= to)
        {
            rendered = wrap_span(&span.kind, &rendered);
        }
        html.push_str(&rendered);
    }
    html
}

fn wrap_span(kind: &SpanKind, inner: &str) -> String {
    match kind {
        SpanKind::Strong => format!("<strong>{}</strong>", inner),
        SpanKind::Em => format!("<em>{}</em>", inner),
        SpanKind::Hyperlink { url } => format!("<a href=\"{}\">{}</a>", html_escape(url), inner),
        SpanKind::Label { name } => {
            format!("<span class=\"{}\">{}</span>", html_escape(name), inner)
        }
    }
}

/// Basic HTML escaping.
pub(crate) fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn span(start: usize, end: usize, kind: SpanKind) -> Span {
        Span { start, end, kind }
    }

    #[test]
    fn plain_text_of_text_blocks() {
        let renderer = PrismicRichText;
        let block = Block::Heading {
            level: 2,
            content: TextBlock::plain("Capítulo"),
        };
        assert_eq!(renderer.as_plain_text(&block), "Capítulo");
        assert_eq!(
            renderer.as_plain_text(&Block::Image {
                url: "https://img".into(),
                alt: Some("alt".into())
            }),
            ""
        );
    }

    #[test]
    fn as_text_skips_blocks_without_text() {
        let blocks = vec![
            Block::paragraph("um"),
            Block::Embed {
                url: None,
                html: None,
            },
            Block::paragraph("dois"),
        ];
        assert_eq!(
            PrismicRichText.as_text(&blocks, DEFAULT_TEXT_SEPARATOR),
            "um dois"
        );
        assert_eq!(PrismicRichText.as_text(&blocks, "\n"), "um\ndois");
    }

    #[test]
    fn markup_escapes_text_and_converts_newlines() {
        let html = PrismicRichText.as_markup(&[Block::paragraph("a < b\nc & d")]);
        assert_eq!(html, "<p>a &lt; b<br />c &amp; d</p>");
    }

    #[test]
    fn markup_applies_spans_on_char_offsets() {
        let content = TextBlock::plain("Olá mundo")
            .with_span(span(0, 3, SpanKind::Strong))
            .with_span(span(
                4,
                9,
                SpanKind::Hyperlink {
                    url: "https://example.com/?a=1&b=2".into(),
                },
            ));
        let html = PrismicRichText.as_markup(&[Block::Paragraph(content)]);
        assert_eq!(
            html,
            "<p><strong>Olá</strong> <a href=\"https://example.com/?a=1&amp;b=2\">mundo</a></p>"
        );
    }

    #[test]
    fn overlapping_spans_stay_balanced() {
        let content = TextBlock::plain("abcd")
            .with_span(span(0, 3, SpanKind::Strong))
            .with_span(span(2, 4, SpanKind::Em));
        let html = PrismicRichText.as_markup(&[Block::Paragraph(content)]);
        assert_eq!(
            html,
            "<p><strong>ab</strong><strong><em>c</em></strong><em>d</em></p>"
        );
    }

    #[test]
    fn label_span_becomes_css_class() {
        let content = TextBlock::plain("code").with_span(span(
            0,
            4,
            SpanKind::Label {
                name: "inline-code".into(),
            },
        ));
        assert_eq!(
            PrismicRichText.as_markup(&[Block::Preformatted(content)]),
            "<pre><span class=\"inline-code\">code</span></pre>"
        );
    }

    #[test]
    fn consecutive_list_items_are_grouped() {
        let blocks = vec![
            Block::ListItem(TextBlock::plain("a")),
            Block::ListItem(TextBlock::plain("b")),
            Block::OrderedListItem(TextBlock::plain("c")),
            Block::paragraph("fim"),
        ];
        assert_eq!(
            PrismicRichText.as_markup(&blocks),
            "<ul><li>a</li><li>b</li></ul><ol><li>c</li></ol><p>fim</p>"
        );
    }

    #[test]
    fn images_embeds_and_headings() {
        let blocks = vec![
            Block::Heading {
                level: 9,
                content: TextBlock::plain("T"),
            },
            Block::Image {
                url: "https://images.prismic.io/x.png".into(),
                alt: None,
            },
            Block::Embed {
                url: Some("https://youtu.be/abc".into()),
                html: Some("<iframe></iframe>".into()),
            },
            Block::Unsupported {
                kind: "table".into(),
            },
        ];
        assert_eq!(
            PrismicRichText.as_markup(&blocks),
            "<h6>T</h6><img src=\"https://images.prismic.io/x.png\" alt=\"\" />\
             <div data-oembed=\"https://youtu.be/abc\"><iframe></iframe></div>"
        );
    }

    #[test]
    fn spans_past_the_end_are_clamped() {
        let content = TextBlock::plain("abc").with_span(span(1, 40, SpanKind::Em));
        assert_eq!(
            PrismicRichText.as_markup(&[Block::Paragraph(content)]),
            "<p>a<em>bc</em></p>"
        );
    }
}
