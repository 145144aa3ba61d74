// Re-export modules
pub mod analyzer;
pub mod assets;
pub mod browser;
pub mod config;
pub mod error;
pub mod extractor;
pub mod http;
pub mod navigator;
pub mod pipeline;
pub mod report;
pub mod results;
pub mod translator;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export commonly used types for convenience
pub use config::ScraperConfig;
pub use error::PipelineError;
pub use pipeline::{Pipeline, verify};
pub use results::{Article, RunReport};

use browser::snapshot::SnapshotBrowser;
use browser::webdriver::WebDriverBrowser;
use browser::with_session;
use std::path::Path;

/// Runs `pipeline` in a fresh WebDriver session, closing it afterwards
pub async fn run_live(pipeline: &Pipeline) -> Result<RunReport, PipelineError> {
    let config = pipeline.config();
    let browser =
        WebDriverBrowser::connect(&config.webdriver_url, config.capabilities.as_ref()).await?;
    with_session(&browser, pipeline.run(&browser)).await
}

/// Runs `pipeline` against a saved copy of the section page, without navigating
pub async fn run_snapshot(
    pipeline: Pipeline,
    snapshot: impl AsRef<Path>,
) -> Result<RunReport, PipelineError> {
    let pipeline = pipeline.without_navigation();
    let browser = SnapshotBrowser::from_file(snapshot, &pipeline.config().start_url)?;
    with_session(&browser, pipeline.run(&browser)).await
}
