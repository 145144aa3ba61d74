use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "opinion-digest")]
#[command(about = "Scrapes opinion headlines, saves their images, translates them and reports repeated words")]
#[command(version)]
pub struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// WebDriver server URL (overrides config and WEBDRIVER_URL)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Extract from a saved HTML page instead of a live browser
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Directory for downloaded images
    #[arg(short, long)]
    pub download_dir: Option<PathBuf>,

    /// Report words occurring more than this many times
    #[arg(short, long)]
    pub threshold: Option<usize>,

    /// Language of the scraped headlines
    #[arg(long)]
    pub source_lang: Option<String>,

    /// Language to translate headlines into
    #[arg(long)]
    pub target_lang: Option<String>,
}

impl Args {
    /// Apply command-line overrides on top of `config`
    pub fn apply(&self, config: &mut opinion_digest::ScraperConfig) {
        if let Some(url) = &self.webdriver_url {
            config.webdriver_url = url.clone();
        }
        if let Some(dir) = &self.download_dir {
            config.download_dir = dir.clone();
        }
        if let Some(threshold) = self.threshold {
            config.repeat_threshold = threshold;
        }
        if let Some(lang) = &self.source_lang {
            config.translation.source_lang = lang.clone();
        }
        if let Some(lang) = &self.target_lang {
            config.translation.target_lang = lang.clone();
        }
    }
}
