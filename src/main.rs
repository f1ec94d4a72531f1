// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use prismic_blog::{
    BlogPipeline, CommandLineInput, DeliveryTarget, OutputReport, PrismicHttpClient,
    PrismicRichText, SiteConfig, SiteContent, SiteTask,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// Console output goes to stderr so listings piped from stdout stay clean.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("prismic_blog.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the pipeline for `config` and runs it.
async fn execute_pipeline(config: &SiteConfig) -> anyhow::Result<()> {
    let client = PrismicHttpClient::new(
        config.endpoint.clone(),
        config.access_token.clone(),
        config.fetch_timeout,
    )
    .context("Failed to build the HTTP client")?;

    log::info!(
        "Using repository {} (access token: {})",
        config.endpoint,
        config
            .access_token
            .as_ref()
            .map(|token| token.to_string())
            .unwrap_or_else(|| "none".to_string())
    );

    let pipeline = BlogPipeline::new(Arc::new(client), Arc::new(PrismicRichText), config);
    let (content, report) = pipeline.run().await.with_context(|| match pipeline.task() {
        SiteTask::List { .. } => "Failed to list posts".to_string(),
        SiteTask::Show { uid } => format!("Failed to show post '{}'", uid),
        SiteTask::Export(settings) => {
            format!("Failed to export the site to {}", settings.out_dir.display())
        }
    })?;

    report_completion(&content, &report);
    Ok(())
}

/// Tells the user what the export wrote. Text commands speak for themselves.
fn report_completion(content: &SiteContent, report: &OutputReport) {
    let SiteContent::Site {
        posts,
        has_more,
        documents,
    } = content
    else {
        return;
    };

    for completed in &report.completed {
        if let DeliveryTarget::WriteFile { path, .. } = &completed.operation {
            log::info!("✓ {} ({} bytes)", path.display(), completed.bytes_written);
        }
    }

    println!(
        "✓ Exported {} of {} posts ({} files, {} bytes)",
        documents.len(),
        posts.len(),
        report.stats.operations_completed,
        report.stats.bytes_written
    );
    if *has_more {
        eprintln!("⚠️  Page limit reached. Older posts were not exported.");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = SiteConfig::resolve(cli)?;

    execute_pipeline(&config).await
}
