// src/config.rs
use crate::constants::{
    DEFAULT_DETAIL_CONCURRENCY, DEFAULT_EXPORT_DIR, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
use crate::error::AppError;
use crate::formatting::CommentWidget;
use crate::types::{AccessToken, ApiEndpoint, CommentsRepo, DocumentUid, ValidationError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

pub const ENDPOINT_ENV_VAR: &str = "PRISMIC_API_ENDPOINT";
pub const ACCESS_TOKEN_ENV_VAR: &str = "PRISMIC_ACCESS_TOKEN";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Prismic API endpoint, e.g. https://my-blog.cdn.prismic.io/api/v2
    /// (defaults to $PRISMIC_API_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Posts per page requested from the API (1-100)
    #[arg(long, global = true, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Seconds before a fetch is abandoned (0 = wait indefinitely)
    #[arg(long, global = true, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List published posts, newest first
    List {
        /// Number of pages to load (default 1)
        #[arg(long, conflicts_with = "all")]
        pages: Option<u32>,

        /// Keep loading until the last page
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// Print one post with its reading time
    Show {
        /// The post's UID, as in /post/<uid>
        uid: String,
    },
    /// Write the home page and every post page as static HTML
    Export {
        /// Output directory
        #[arg(long, default_value = DEFAULT_EXPORT_DIR)]
        out: PathBuf,

        /// Number of listing pages to export (default: all)
        #[arg(long)]
        pages: Option<u32>,

        /// GitHub repository (owner/name) backing the comment threads
        #[arg(long)]
        comments_repo: Option<String>,

        /// utterances theme for the comment threads
        #[arg(long, requires = "comments_repo")]
        comments_theme: Option<String>,

        /// Post details fetched at once
        #[arg(long, default_value_t = DEFAULT_DETAIL_CONCURRENCY)]
        concurrency: usize,
    },
}

/// What the resolved command does.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteTask {
    List { max_pages: Option<u32> },
    Show { uid: DocumentUid },
    Export(ExportSettings),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub out_dir: PathBuf,
    /// `None` exports every page.
    pub max_pages: Option<u32>,
    pub comments: Option<CommentWidget>,
    pub concurrency: usize,
}

/// Resolved configuration, validated and ready to drive a command.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub endpoint: ApiEndpoint,
    pub access_token: Option<AccessToken>,
    pub page_size: u32,
    /// `None` waits indefinitely.
    pub fetch_timeout: Option<Duration>,
    pub verbose: bool,
    pub task: SiteTask,
}

impl SiteConfig {
    /// Resolves the configuration from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with_env(
            cli,
            std::env::var(ENDPOINT_ENV_VAR).ok(),
            std::env::var(ACCESS_TOKEN_ENV_VAR).ok(),
        )
    }

    /// Resolves the configuration with explicit environment values.
    pub fn resolve_with_env(
        cli: CommandLineInput,
        endpoint_env: Option<String>,
        access_token_env: Option<String>,
    ) -> Result<Self, AppError> {
        let raw_endpoint = cli
            .endpoint
            .or(endpoint_env)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                AppError::MissingConfiguration(format!(
                    "{} environment variable not set and no --endpoint given",
                    ENDPOINT_ENV_VAR
                ))
            })?;
        let endpoint = ApiEndpoint::parse(raw_endpoint.trim())?;

        let access_token = access_token_env
            .filter(|value| !value.trim().is_empty())
            .map(AccessToken::new)
            .transpose()?;

        let page_size = resolve_page_size(cli.page_size)?;
        let fetch_timeout = (cli.timeout > 0).then(|| Duration::from_secs(cli.timeout));

        let task = match cli.command {
            Command::List { pages, all } => SiteTask::List {
                max_pages: if all {
                    None
                } else {
                    Some(validate_page_count(pages.unwrap_or(1))?)
                },
            },
            Command::Show { uid } => SiteTask::Show {
                uid: DocumentUid::parse(&uid)?,
            },
            Command::Export {
                out,
                pages,
                comments_repo,
                comments_theme,
                concurrency,
            } => {
                let comments = comments_repo
                    .map(CommentsRepo::new)
                    .transpose()?
                    .map(|repo| CommentWidget::new(repo, comments_theme));
                SiteTask::Export(ExportSettings {
                    out_dir: out,
                    max_pages: pages.map(validate_page_count).transpose()?,
                    comments,
                    concurrency: concurrency.max(1),
                })
            }
        };

        Ok(SiteConfig {
            endpoint,
            access_token,
            page_size,
            fetch_timeout,
            verbose: cli.verbose,
            task,
        })
    }
}

fn resolve_page_size(requested: u32) -> Result<u32, ValidationError> {
    if requested == 0 {
        return Err(ValidationError::OutOfBounds {
            value: requested,
            min: 1,
            max: MAX_PAGE_SIZE,
        });
    }
    if requested > MAX_PAGE_SIZE {
        log::warn!(
            "Page size {} exceeds the API maximum, using {}",
            requested,
            MAX_PAGE_SIZE
        );
        return Ok(MAX_PAGE_SIZE);
    }
    Ok(requested)
}

fn validate_page_count(pages: u32) -> Result<u32, ValidationError> {
    if pages == 0 {
        return Err(ValidationError::OutOfBounds {
            value: pages,
            min: 1,
            max: u32::MAX,
        });
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "https://blog.cdn.prismic.io/api/v2";

    fn parse(args: &[&str]) -> CommandLineInput {
        CommandLineInput::try_parse_from(std::iter::once("prismic-blog").chain(args.iter().copied()))
            .unwrap()
    }

    fn resolve(args: &[&str]) -> Result<SiteConfig, AppError> {
        SiteConfig::resolve_with_env(parse(args), Some(ENDPOINT.to_string()), None)
    }

    #[test]
    fn list_defaults_to_one_page() {
        let config = resolve(&["list"]).unwrap();
        assert_eq!(config.task, SiteTask::List { max_pages: Some(1) });
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(
            config.fetch_timeout,
            Some(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS))
        );
        assert!(config.access_token.is_none());
    }

    #[test]
    fn list_all_has_no_page_limit() {
        let config = resolve(&["list", "--all"]).unwrap();
        assert_eq!(config.task, SiteTask::List { max_pages: None });
    }

    #[test]
    fn pages_and_all_conflict() {
        let parsed = CommandLineInput::try_parse_from(["prismic-blog", "list", "--pages", "2", "--all"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn endpoint_flag_overrides_environment() {
        let cli = parse(&["--endpoint", "https://other.cdn.prismic.io/api/v2", "list"]);
        let config = SiteConfig::resolve_with_env(cli, Some(ENDPOINT.to_string()), None).unwrap();
        assert_eq!(
            config.endpoint.as_url().as_str(),
            "https://other.cdn.prismic.io/api/v2"
        );
    }

    #[test]
    fn missing_endpoint_is_reported() {
        let result = SiteConfig::resolve_with_env(parse(&["list"]), None, None);
        assert!(matches!(result, Err(AppError::MissingConfiguration(_))));
    }

    #[test]
    fn empty_access_token_is_ignored() {
        let config =
            SiteConfig::resolve_with_env(parse(&["list"]), Some(ENDPOINT.into()), Some("  ".into()))
                .unwrap();
        assert!(config.access_token.is_none());
    }

    #[test]
    fn page_size_is_clamped_and_zero_rejected() {
        assert_eq!(resolve(&["--page-size", "500", "list"]).unwrap().page_size, 100);
        assert!(matches!(
            resolve(&["--page-size", "0", "list"]),
            Err(AppError::Validation(ValidationError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn zero_timeout_waits_indefinitely() {
        let config = resolve(&["--timeout", "0", "list"]).unwrap();
        assert_eq!(config.fetch_timeout, None);
    }

    #[test]
    fn show_validates_uid() {
        assert!(matches!(
            resolve(&["show", "../etc"]),
            Err(AppError::Validation(ValidationError::InvalidUid(_)))
        ));
        let config = resolve(&["show", "como-utilizar-hooks"]).unwrap();
        assert!(matches!(config.task, SiteTask::Show { .. }));
    }

    #[test]
    fn export_settings() {
        let config = resolve(&[
            "export",
            "--out",
            "/tmp/site",
            "--comments-repo",
            "owner/comments",
            "--comments-theme",
            "github-light",
            "--concurrency",
            "0",
        ])
        .unwrap();

        let SiteTask::Export(settings) = config.task else {
            panic!("expected export task");
        };
        assert_eq!(settings.out_dir, PathBuf::from("/tmp/site"));
        assert_eq!(settings.max_pages, None);
        assert_eq!(settings.concurrency, 1);
        let comments = settings.comments.unwrap();
        assert_eq!(comments.repo.as_str(), "owner/comments");
        assert_eq!(comments.theme, "github-light");
    }

    #[test]
    fn export_rejects_bad_comments_repo() {
        assert!(matches!(
            resolve(&["export", "--comments-repo", "not-a-repo"]),
            Err(AppError::Validation(ValidationError::InvalidCommentsRepo { .. }))
        ));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let config = resolve(&["list", "-v", "--page-size", "5"]).unwrap();
        assert!(config.verbose);
        assert_eq!(config.page_size, 5);
    }
}
