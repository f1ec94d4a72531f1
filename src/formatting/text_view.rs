// src/formatting/text_view.rs
//! Terminal renditions of the post listing and a single post.

use super::dates::{format_edit_note, format_optional_date};
use crate::algebras::RichTextRenderer;
use crate::analytics::measure_reading_time;
use crate::model::{Document, PostSummary};
use std::fmt::Write;

const MORE_POSTS_HINT: &str = "Mais posts disponíveis (use --pages N ou --all)";

/// Renders the listing of post summaries.
pub fn compose_post_listing(posts: &[PostSummary], has_more: bool) -> String {
    let mut output = String::with_capacity(posts.len() * 128);

    for post in posts {
        let _ = writeln!(output, "{}", post.title);
        if !post.subtitle.is_empty() {
            let _ = writeln!(output, "{}", post.subtitle);
        }
        let _ = writeln!(
            output,
            "{}",
            metadata_line(&[
                format_optional_date(post.first_publication_date.as_ref()).as_str(),
                post.author.as_str(),
            ])
        );
        let _ = writeln!(output, "  uid: {}", post.uid);
        output.push('\n');
    }

    if posts.is_empty() {
        output.push_str("Nenhum post publicado.\n");
    }
    if has_more {
        let _ = writeln!(output, "{}", MORE_POSTS_HINT);
    }

    output
}

/// Renders one post with its reading time and plain-text body.
pub fn compose_post_text<R>(document: &Document, renderer: &R) -> String
where
    R: RichTextRenderer + ?Sized,
{
    let reading_time = measure_reading_time(&document.content, renderer);
    let mut output = String::new();

    let _ = writeln!(output, "# {}", document.title);
    if !document.subtitle.is_empty() {
        let _ = writeln!(output, "{}", document.subtitle);
    }
    let _ = writeln!(
        output,
        "{}",
        metadata_line(&[
            format_optional_date(document.first_publication_date.as_ref()).as_str(),
            document.author.as_str(),
            reading_time.to_string().as_str(),
        ])
    );
    if document.was_edited() {
        if let Some(edited_at) = &document.last_publication_date {
            let _ = writeln!(output, "{}", format_edit_note(edited_at));
        }
    }

    for section in &document.content {
        if !section.heading.trim().is_empty() {
            let _ = write!(output, "\n## {}\n", section.heading);
        }
        for block in &section.body {
            let text = renderer.as_plain_text(block);
            if !text.trim().is_empty() {
                let _ = write!(output, "\n{}\n", text);
            }
        }
    }

    output
}

fn metadata_line(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" · ")
}
