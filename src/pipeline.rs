use crate::analyzer;
use crate::assets::AssetFetcher;
use crate::browser::Browser;
use crate::config::{ConfigError, ScraperConfig};
use crate::error::PipelineError;
use crate::extractor::ArticleExtractor;
use crate::http::HttpClient;
use crate::navigator::Navigator;
use crate::report;
use crate::results::RunReport;
use crate::translator::Translator;
use std::sync::Arc;

/// Builder and runner for one scrape-translate-analyze pass
pub struct Pipeline {
    config: ScraperConfig,
    http: Arc<dyn HttpClient>,
    navigate: bool,
}

impl Pipeline {
    /// Create a pipeline with the given configuration and HTTP client.
    /// The configuration is validated here and nowhere else.
    pub fn new(config: ScraperConfig, http: Arc<dyn HttpClient>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            http,
            navigate: true,
        })
    }

    /// Skip navigation and extract from whatever the browser currently shows
    pub fn without_navigation(mut self) -> Self {
        self.navigate = false;
        self
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Runs every stage against `browser`, printing progress to stdout.
    ///
    /// Only navigation and card enumeration failures end the
    /// run; per-article problems are logged and absorbed.
    pub async fn run(&self, browser: &dyn Browser) -> Result<RunReport, PipelineError> {
        if self.navigate {
            Navigator::new(&self.config).open_section(browser).await?;
        } else {
            ::log::info!("Navigation disabled, extracting from the current page");
        }

        let mut articles = ArticleExtractor::new(&self.config).extract(browser).await?;
        if articles.is_empty() {
            println!("No articles scraped successfully. Check selectors or network.");
            return Ok(RunReport::default());
        }
        print!("{}", report::articles(&articles));

        let fetcher = AssetFetcher::new(Arc::clone(&self.http), &self.config);
        let mut downloads = Vec::new();
        for article in &articles {
            if let Some(path) = fetcher
                .fetch(article.image_url.as_deref(), &article.title)
                .await
            {
                downloads.push(path);
            }
        }

        println!("\nTranslating titles...");
        let translator = Translator::new(Arc::clone(&self.http), self.config.translation.clone());
        translator.translate_all(&mut articles).await;
        print!("{}", report::translations(&articles));

        let repeated_words = analyzer::repeated_words(&articles, self.config.repeat_threshold);
        print!(
            "{}",
            report::repeated_words(&repeated_words, self.config.repeat_threshold)
        );

        Ok(RunReport {
            articles,
            downloads,
            repeated_words,
        })
    }
}

/// Fails when the run produced no articles or no successful translation
pub fn verify(report: &RunReport) -> Result<(), PipelineError> {
    if report.articles.is_empty() {
        return Err(PipelineError::NoArticles);
    }
    if report.translated_count() == 0 {
        return Err(PipelineError::NoTranslations);
    }
    Ok(())
}
