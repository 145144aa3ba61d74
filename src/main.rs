use clap::Parser;
use env_logger::{Builder, Env};
use opinion_digest::http::ReqwestClient;
use opinion_digest::{Pipeline, PipelineError, RunReport, ScraperConfig};
use std::process::ExitCode;
use std::sync::Arc;

mod args;
use args::Args;

/// Level shown when RUST_LOG is unset, so skip and failure reasons reach the console
const DEFAULT_LOG_FILTER: &str = "info";

fn log_builder(env: Env<'_>) -> Builder {
    Builder::from_env(env.default_filter_or(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before anything reads the environment
    let _ = dotenvy::dotenv();

    // Initialize logging
    log_builder(Env::default()).init();

    let args = Args::parse();

    match run(&args).await.and_then(|report| {
        opinion_digest::verify(&report)?;
        Ok(report)
    }) {
        Ok(report) => {
            ::log::info!(
                "Run complete: {} articles, {} translated, {} images saved",
                report.articles.len(),
                report.translated_count(),
                report.downloads.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) if e.is_verification_failure() => {
            ::log::error!("Run failed verification: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            ::log::error!("Run aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<RunReport, PipelineError> {
    let mut config = match &args.config {
        Some(path) => ScraperConfig::from_file(path)?,
        None => ScraperConfig::default(),
    };
    config.apply_env();
    args.apply(&mut config);

    let http = Arc::new(ReqwestClient::new()?);
    let pipeline = Pipeline::new(config, http)?;

    match &args.snapshot {
        Some(path) => {
            ::log::info!("Extracting from snapshot {}", path.display());
            opinion_digest::run_snapshot(pipeline, path).await
        }
        None => {
            println!("Note: live scraping requires a WebDriver server (e.g., ChromeDriver).");
            println!(
                "Set WEBDRIVER_URL if not using {}",
                pipeline.config().webdriver_url
            );
            opinion_digest::run_live(&pipeline).await
        }
    }
}
