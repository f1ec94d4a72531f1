// src/formatting/site.rs
//! HTML pages for the static site.
//!
//! Templates are compiled into the binary and registered once per
//! [`SiteRenderer`]. Post bodies are rendered to markup by a
//! [`RichTextRenderer`] and inserted unescaped; every other value goes
//! through handlebars' escaping.

use super::dates::{format_edit_note, format_optional_date};
use super::rich_text::html_escape;
use crate::algebras::RichTextRenderer;
use crate::analytics::measure_reading_time;
use crate::constants::{
    COMMENTS_ISSUE_TERM, DEFAULT_COMMENTS_THEME, SITE_NAME, UTTERANCES_CLIENT_URL,
};
use crate::error::AppError;
use crate::model::{Document, PostSummary};
use crate::types::CommentsRepo;
use handlebars::Handlebars;
use serde_json::{json, Value};

const HOME_TEMPLATE: &str = "home";
const POST_TEMPLATE: &str = "post";
const HEADER_PARTIAL: &str = "header";

const HOME_SOURCE: &str = include_str!("../../templates/home.hbs");
const POST_SOURCE: &str = include_str!("../../templates/post.hbs");
const HEADER_SOURCE: &str = include_str!("../../templates/header.hbs");

/// The utterances comment thread attached to post pages.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentWidget {
    pub repo: CommentsRepo,
    pub theme: String,
}

impl CommentWidget {
    pub fn new(repo: CommentsRepo, theme: Option<String>) -> Self {
        Self {
            repo,
            theme: theme.unwrap_or_else(|| DEFAULT_COMMENTS_THEME.to_string()),
        }
    }

    /// The `<script>` element that mounts the thread where it is placed.
    pub fn script(&self) -> String {
        format!(
            "<script src=\"{}\" repo=\"{}\" issue-term=\"{}\" theme=\"{}\" crossorigin=\"anonymous\" async></script>",
            UTTERANCES_CLIENT_URL,
            html_escape(self.repo.as_str()),
            COMMENTS_ISSUE_TERM,
            html_escape(&self.theme)
        )
    }
}

/// Renders the home and post pages.
pub struct SiteRenderer {
    handlebars: Handlebars<'static>,
    comments: Option<CommentWidget>,
}

impl SiteRenderer {
    pub fn new(comments: Option<CommentWidget>) -> Result<Self, AppError> {
        let mut handlebars = Handlebars::new();

        handlebars
            .register_partial(HEADER_PARTIAL, HEADER_SOURCE)
            .map_err(|e| template_error(HEADER_PARTIAL, e))?;
        for (name, source) in [(HOME_TEMPLATE, HOME_SOURCE), (POST_TEMPLATE, POST_SOURCE)] {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| template_error(name, e))?;
        }

        Ok(Self {
            handlebars,
            comments,
        })
    }

    pub fn comments(&self) -> Option<&CommentWidget> {
        self.comments.as_ref()
    }

    /// The listing page, linking every post to its own page.
    pub fn render_home(&self, posts: &[PostSummary], has_more: bool) -> Result<String, AppError> {
        let data = json!({
            "site_name": SITE_NAME,
            "root": ".",
            "has_more": has_more,
            "posts": posts.iter().map(|post| json!({
                "uid": post.uid.as_str(),
                "title": post.title,
                "subtitle": post.subtitle,
                "author": post.author,
                "date": format_optional_date(post.first_publication_date.as_ref()),
            })).collect::<Vec<_>>(),
        });

        self.render(HOME_TEMPLATE, &data)
    }

    /// A post page with banner, reading time, sections and comments.
    pub fn render_post<R>(&self, document: &Document, renderer: &R) -> Result<String, AppError>
    where
        R: RichTextRenderer + ?Sized,
    {
        let reading_time = measure_reading_time(&document.content, renderer);
        let edit_note = document
            .last_publication_date
            .as_ref()
            .filter(|_| document.was_edited())
            .map(format_edit_note);

        let banner = document
            .banner
            .as_ref()
            .map(|banner| json!({ "url": banner.url, "alt": banner.alt }))
            .unwrap_or(Value::Null);

        let data = json!({
            "site_name": SITE_NAME,
            "root": "../..",
            "title": document.title,
            "subtitle": document.subtitle,
            "author": document.author,
            "date": format_optional_date(document.first_publication_date.as_ref()),
            "reading_time": reading_time.to_string(),
            "edit_note": edit_note,
            "banner": banner,
            "sections": document.content.iter().map(|section| json!({
                "heading": section.heading,
                "body_html": renderer.as_markup(&section.body),
            })).collect::<Vec<_>>(),
            "comments": self.comments.as_ref().map(CommentWidget::script),
        });

        log::debug!(
            "Rendering post '{}' ({} words, {})",
            document.uid,
            reading_time.words,
            reading_time
        );

        self.render(POST_TEMPLATE, &data)
    }

    fn render(&self, name: &str, data: &Value) -> Result<String, AppError> {
        self.handlebars
            .render(name, data)
            .map_err(|e| template_error(name, e))
    }
}

fn template_error(name: &str, error: impl std::fmt::Display) -> AppError {
    AppError::TemplateRenderError {
        name: name.to_string(),
        message: error.to_string(),
    }
}
