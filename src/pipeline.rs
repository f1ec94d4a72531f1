// src/pipeline.rs
//! The three stages every command runs through: retrieve → compose → deliver.
//!
//! Each trait describes a single capability so stages can be tested in
//! isolation. [`BlogPipeline`] implements all three against any
//! [`ContentSource`].

use crate::algebras::{ContentSource, FetchError, RichTextRenderer};
use crate::api::{Ordering, PaginationTracker, QueryOptions};
use crate::config::{ExportSettings, SiteConfig, SiteTask};
use crate::constants::{POST_DOCUMENT_TYPE, POST_LISTING_FIELDS, POST_LISTING_ORDERING};
use crate::error::AppError;
use crate::formatting::{compose_post_listing, compose_post_text, SiteRenderer};
use crate::model::{Document, PostSummary};
use crate::output::{
    deliver, home_output_path, post_output_path, DeliveryTarget, OutputPlan, OutputReport,
};
use crate::types::DocumentUid;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;

/// Everything a command fetched, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteContent {
    Listing {
        posts: Vec<PostSummary>,
        has_more: bool,
    },
    Post(Document),
    Site {
        posts: Vec<PostSummary>,
        has_more: bool,
        documents: Vec<Document>,
    },
}

/// Loads the posts a command needs.
#[async_trait]
pub trait PostRetrieval {
    async fn retrieve(&self) -> Result<SiteContent, AppError>;
}

/// Turns retrieved content into output operations.
pub trait PageComposer {
    fn compose(&self, content: &SiteContent) -> Result<OutputPlan, AppError>;
}

/// Performs the output operations.
pub trait SiteDelivery {
    fn deliver(&self, plan: OutputPlan) -> Result<OutputReport, AppError>;
}

/// The blog's commands, wired to a content source and a rich-text renderer.
pub struct BlogPipeline {
    source: Arc<dyn ContentSource>,
    renderer: Arc<dyn RichTextRenderer>,
    page_size: u32,
    fetch_timeout: Option<Duration>,
    task: SiteTask,
}

impl BlogPipeline {
    pub fn new(
        source: Arc<dyn ContentSource>,
        renderer: Arc<dyn RichTextRenderer>,
        config: &SiteConfig,
    ) -> Self {
        Self {
            source,
            renderer,
            page_size: config.page_size,
            fetch_timeout: config.fetch_timeout,
            task: config.task.clone(),
        }
    }

    pub fn task(&self) -> &SiteTask {
        &self.task
    }

    /// Runs all three stages.
    pub async fn run(&self) -> Result<(SiteContent, OutputReport), AppError> {
        let content = self.retrieve().await?;
        let plan = self.compose(&content)?;
        let report = self.deliver(plan)?;
        Ok((content, report))
    }

    fn listing_options(&self) -> QueryOptions {
        QueryOptions::new()
            .with_page_size(self.page_size)
            .order_by(Ordering::desc(POST_LISTING_ORDERING))
            .fetch_fields(POST_DOCUMENT_TYPE, POST_LISTING_FIELDS)
    }

    /// Walks the listing until `max_pages` pages are loaded or none remain.
    async fn load_listing(
        &self,
        max_pages: Option<u32>,
    ) -> Result<(Vec<PostSummary>, bool), AppError> {
        let mut tracker = PaginationTracker::start(
            Arc::clone(&self.source),
            POST_DOCUMENT_TYPE,
            &self.listing_options(),
            self.fetch_timeout,
        )
        .await?;

        tracker.advance_until_exhausted(max_pages).await?;

        log::info!(
            "Loaded {} posts over {} pages ({})",
            tracker.results().len(),
            tracker.pages_loaded(),
            tracker.state()
        );

        let has_more = tracker.has_more();
        Ok((tracker.into_results(), has_more))
    }

    /// Fetches every listed post's full document, `concurrency` at a time.
    ///
    /// Posts deleted between the listing and the detail fetch are skipped.
    /// The result keeps the listing order.
    async fn load_documents(
        &self,
        posts: &[PostSummary],
        concurrency: usize,
    ) -> Result<Vec<Document>, AppError> {
        let uids: Vec<DocumentUid> = posts.iter().map(|post| post.uid.clone()).collect();
        let fetches = uids.into_iter().enumerate().map(|(index, uid)| {
            let source = Arc::clone(&self.source);
            async move {
                let result = source.get_by_uid(POST_DOCUMENT_TYPE, &uid).await;
                (index, uid, result)
            }
        });

        let mut fetched: Vec<(usize, Document)> = Vec::with_capacity(posts.len());
        let mut results = stream::iter(fetches).buffer_unordered(concurrency.max(1));

        while let Some((index, uid, result)) = results.next().await {
            match result {
                Ok(document) => fetched.push((index, document)),
                Err(FetchError::NotFound { .. }) => {
                    log::warn!("Post '{}' disappeared before its page was fetched", uid);
                }
                Err(e) => return Err(e.into()),
            }
        }

        fetched.sort_by_key(|(index, _)| *index);
        Ok(fetched.into_iter().map(|(_, document)| document).collect())
    }

    fn compose_site(
        &self,
        settings: &ExportSettings,
        posts: &[PostSummary],
        has_more: bool,
        documents: &[Document],
    ) -> Result<OutputPlan, AppError> {
        let site = SiteRenderer::new(settings.comments.clone())?;

        let mut plan = OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
            path: home_output_path(&settings.out_dir),
            content: site.render_home(posts, has_more)?,
        });

        for document in documents {
            plan = plan.with_operation(DeliveryTarget::WriteFile {
                path: post_output_path(&settings.out_dir, &document.uid),
                content: site.render_post(document, self.renderer.as_ref())?,
            });
        }

        Ok(plan)
    }
}

#[async_trait]
impl PostRetrieval for BlogPipeline {
    async fn retrieve(&self) -> Result<SiteContent, AppError> {
        match &self.task {
            SiteTask::List { max_pages } => {
                let (posts, has_more) = self.load_listing(*max_pages).await?;
                Ok(SiteContent::Listing { posts, has_more })
            }
            SiteTask::Show { uid } => {
                log::info!("Retrieving post '{}'", uid);
                let document = self.source.get_by_uid(POST_DOCUMENT_TYPE, uid).await?;
                Ok(SiteContent::Post(document))
            }
            SiteTask::Export(settings) => {
                let (posts, has_more) = self.load_listing(settings.max_pages).await?;
                let documents = self.load_documents(&posts, settings.concurrency).await?;
                log::info!("Fetched {} of {} posts", documents.len(), posts.len());
                Ok(SiteContent::Site {
                    posts,
                    has_more,
                    documents,
                })
            }
        }
    }
}

impl PageComposer for BlogPipeline {
    fn compose(&self, content: &SiteContent) -> Result<OutputPlan, AppError> {
        match (content, &self.task) {
            (SiteContent::Listing { posts, has_more }, _) => Ok(OutputPlan::new().with_operation(
                DeliveryTarget::PrintToStdout {
                    content: compose_post_listing(posts, *has_more),
                },
            )),
            (SiteContent::Post(document), _) => Ok(OutputPlan::new().with_operation(
                DeliveryTarget::PrintToStdout {
                    content: compose_post_text(document, self.renderer.as_ref()),
                },
            )),
            (
                SiteContent::Site {
                    posts,
                    has_more,
                    documents,
                },
                SiteTask::Export(settings),
            ) => self.compose_site(settings, posts, *has_more, documents),
            (SiteContent::Site { .. }, task) => Err(AppError::InternalError {
                message: format!("site content cannot be composed for {:?}", task),
                source: None,
            }),
        }
    }
}

impl SiteDelivery for BlogPipeline {
    fn deliver(&self, plan: OutputPlan) -> Result<OutputReport, AppError> {
        deliver(plan).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebras::content::tests::MockContentSource;
    use crate::formatting::PrismicRichText;
    use crate::model::{Block, PageResult, Section};
    use crate::types::{ApiEndpoint, Cursor, DocumentUid};

    fn summary(uid: &str) -> PostSummary {
        PostSummary {
            uid: DocumentUid::parse(uid).unwrap(),
            first_publication_date: None,
            title: format!("Post {}", uid),
            subtitle: String::new(),
            author: "Autor".to_string(),
        }
    }

    fn document(uid: &str) -> Document {
        Document {
            id: uid.to_uppercase(),
            uid: DocumentUid::parse(uid).unwrap(),
            first_publication_date: None,
            last_publication_date: None,
            title: format!("Post {}", uid),
            subtitle: String::new(),
            author: "Autor".to_string(),
            banner: None,
            content: vec![Section::new("Intro", vec![Block::paragraph("um dois três")])],
        }
    }

    fn config(task: SiteTask) -> SiteConfig {
        SiteConfig {
            endpoint: ApiEndpoint::parse("https://blog.cdn.prismic.io/api/v2").unwrap(),
            access_token: None,
            page_size: 2,
            fetch_timeout: None,
            verbose: false,
            task,
        }
    }

    async fn source() -> MockContentSource {
        let page2 =
            Cursor::parse("https://blog.cdn.prismic.io/api/v2/documents/search?page=2").unwrap();
        let source = MockContentSource::new();
        source
            .add_first_page(PageResult {
                results: vec![summary("a"), summary("b")],
                next_page: Some(page2.clone()),
            })
            .await;
        source
            .add_page(
                &page2,
                PageResult {
                    results: vec![summary("c")],
                    next_page: None,
                },
            )
            .await;
        source.add_document(document("a")).await;
        source.add_document(document("c")).await;
        source
    }

    async fn pipeline(task: SiteTask) -> BlogPipeline {
        BlogPipeline::new(
            Arc::new(source().await),
            Arc::new(PrismicRichText),
            &config(task),
        )
    }

    #[tokio::test]
    async fn list_stops_at_page_limit() {
        let content = pipeline(SiteTask::List { max_pages: Some(1) })
            .await
            .retrieve()
            .await
            .unwrap();
        match content {
            SiteContent::Listing { posts, has_more } => {
                assert_eq!(posts.len(), 2);
                assert!(has_more);
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_all_drains_cursor() {
        let content = pipeline(SiteTask::List { max_pages: None })
            .await
            .retrieve()
            .await
            .unwrap();
        let SiteContent::Listing { posts, has_more } = content else {
            panic!("expected listing");
        };
        let uids: Vec<_> = posts.iter().map(|p| p.uid.as_str().to_string()).collect();
        assert_eq!(uids, vec!["a", "b", "c"]);
        assert!(!has_more);
    }

    #[tokio::test]
    async fn show_missing_post_is_not_found() {
        let result = pipeline(SiteTask::Show {
            uid: DocumentUid::parse("zzz").unwrap(),
        })
        .await
        .retrieve()
        .await;
        assert!(matches!(
            result,
            Err(AppError::Fetch(FetchError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn export_skips_vanished_posts_and_keeps_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let task = SiteTask::Export(ExportSettings {
            out_dir: dir.path().to_path_buf(),
            max_pages: None,
            comments: None,
            concurrency: 3,
        });
        let pipeline = pipeline(task).await;

        let content = pipeline.retrieve().await.unwrap();
        let SiteContent::Site { documents, .. } = &content else {
            panic!("expected site content");
        };
        let uids: Vec<_> = documents.iter().map(|d| d.uid.as_str()).collect();
        assert_eq!(uids, vec!["a", "c"]);

        let plan = pipeline.compose(&content).unwrap();
        assert_eq!(plan.len(), 3);
    }

    #[tokio::test]
    async fn listing_composes_to_stdout() {
        let pipeline = pipeline(SiteTask::List { max_pages: Some(1) }).await;
        let plan = pipeline
            .compose(&SiteContent::Listing {
                posts: vec![summary("a")],
                has_more: false,
            })
            .unwrap();
        assert!(matches!(
            plan.operations.as_slice(),
            [DeliveryTarget::PrintToStdout { content }] if content.contains("Post a")
        ));
    }
}
