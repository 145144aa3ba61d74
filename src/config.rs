use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration problems detected while loading or validating
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a single scraping run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Front page of the publication
    #[serde(default = "default_start_url")]
    pub start_url: String,

    /// Id of the consent interstitial's accept button
    #[serde(default = "default_consent_button_id")]
    pub consent_button_id: String,

    /// Visible text of the section link to follow
    #[serde(default = "default_section_link_text")]
    pub section_link_text: String,

    /// Class whose presence means the section's articles have rendered
    #[serde(default = "default_article_marker_class")]
    pub article_marker_class: String,

    /// Class of the article container ("card")
    #[serde(default = "default_card_class")]
    pub card_class: String,

    /// Class of the headline inside a card
    #[serde(default = "default_title_class")]
    pub title_class: String,

    /// Class of the description inside a card
    #[serde(default = "default_description_class")]
    pub description_class: String,

    /// Tag of the image inside a card
    #[serde(default = "default_image_tag")]
    pub image_tag: String,

    /// Maximum number of cards inspected
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,

    /// Maximum number of articles kept
    #[serde(default = "default_article_limit")]
    pub article_limit: usize,

    #[serde(default = "default_consent_timeout_secs")]
    pub consent_timeout_secs: u64,

    #[serde(default = "default_section_timeout_secs")]
    pub section_timeout_secs: u64,

    /// Pause between the consent button appearing and clicking it
    #[serde(default = "default_consent_settle_ms")]
    pub consent_settle_ms: u64,

    /// Delay between polls while waiting for an element
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Extra capabilities for the WebDriver session (e.g. a remote grid's options)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Map<String, Value>>,

    /// Where downloaded images are written
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    #[serde(default = "default_image_extension")]
    pub image_extension: String,

    /// Maximum length, in characters, of the title part of an image filename
    #[serde(default = "default_filename_max_chars")]
    pub filename_max_chars: usize,

    /// Words must occur more often than this to be reported
    #[serde(default = "default_repeat_threshold")]
    pub repeat_threshold: usize,

    #[serde(default)]
    pub translation: TranslationConfig,
}

/// Configuration for the remote translation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "default_translate_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_source_lang")]
    pub source_lang: String,

    #[serde(default = "default_target_lang")]
    pub target_lang: String,

    /// Header carrying the API key
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,

    /// API key, normally supplied through `RAPIDAPI_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_start_url() -> String {
    "https://elpais.com/".to_string()
}

fn default_consent_button_id() -> String {
    "didomi-notice-agree-button".to_string()
}

fn default_section_link_text() -> String {
    "Opinión".to_string()
}

fn default_article_marker_class() -> String {
    "c_t".to_string()
}

fn default_card_class() -> String {
    "c".to_string()
}

fn default_title_class() -> String {
    "c_t".to_string()
}

fn default_description_class() -> String {
    "c_d".to_string()
}

fn default_image_tag() -> String {
    "img".to_string()
}

fn default_candidate_limit() -> usize {
    10
}

fn default_article_limit() -> usize {
    5
}

fn default_consent_timeout_secs() -> u64 {
    15
}

fn default_section_timeout_secs() -> u64 {
    10
}

fn default_consent_settle_ms() -> u64 {
    1000
}

fn default_poll_interval_ms() -> u64 {
    500
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_image_extension() -> String {
    "jpg".to_string()
}

fn default_filename_max_chars() -> usize {
    50
}

fn default_repeat_threshold() -> usize {
    2
}

fn default_translate_endpoint() -> String {
    "https://google-translate113.p.rapidapi.com/api/v1/translator/text".to_string()
}

fn default_source_lang() -> String {
    "es".to_string()
}

fn default_target_lang() -> String {
    "en".to_string()
}

fn default_api_key_header() -> String {
    "x-rapidapi-key".to_string()
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_translate_endpoint(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            api_key_header: default_api_key_header(),
            api_key: None,
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            start_url: default_start_url(),
            consent_button_id: default_consent_button_id(),
            section_link_text: default_section_link_text(),
            article_marker_class: default_article_marker_class(),
            card_class: default_card_class(),
            title_class: default_title_class(),
            description_class: default_description_class(),
            image_tag: default_image_tag(),
            candidate_limit: default_candidate_limit(),
            article_limit: default_article_limit(),
            consent_timeout_secs: default_consent_timeout_secs(),
            section_timeout_secs: default_section_timeout_secs(),
            consent_settle_ms: default_consent_settle_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            webdriver_url: default_webdriver_url(),
            capabilities: None,
            download_dir: default_download_dir(),
            image_extension: default_image_extension(),
            filename_max_chars: default_filename_max_chars(),
            repeat_threshold: default_repeat_threshold(),
            translation: TranslationConfig::default(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Apply `WEBDRIVER_URL`, `RAPIDAPI_KEY` and `TRANSLATE_URL` when set and non-empty
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("WEBDRIVER_URL") {
            self.webdriver_url = url;
        }
        if let Some(key) = get("RAPIDAPI_KEY") {
            self.translation.api_key = Some(key);
        }
        if let Some(endpoint) = get("TRANSLATE_URL") {
            self.translation.endpoint = endpoint;
        }
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let selectors = [
            ("consent_button_id", &self.consent_button_id),
            ("section_link_text", &self.section_link_text),
            ("article_marker_class", &self.article_marker_class),
            ("card_class", &self.card_class),
            ("title_class", &self.title_class),
            ("description_class", &self.description_class),
            ("image_tag", &self.image_tag),
        ];
        for (name, value) in selectors {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", name)));
            }
        }

        if self.article_limit == 0 || self.candidate_limit == 0 {
            return Err(ConfigError::Invalid(
                "article_limit and candidate_limit must be positive".to_string(),
            ));
        }
        if self.article_limit > self.candidate_limit {
            return Err(ConfigError::Invalid(format!(
                "article_limit ({}) exceeds candidate_limit ({})",
                self.article_limit, self.candidate_limit
            )));
        }
        if self.filename_max_chars == 0 {
            return Err(ConfigError::Invalid(
                "filename_max_chars must be positive".to_string(),
            ));
        }
        if url::Url::parse(&self.start_url).is_err() {
            return Err(ConfigError::Invalid(format!(
                "start_url is not a valid URL: {}",
                self.start_url
            )));
        }
        Ok(())
    }

    pub fn consent_timeout(&self) -> Duration {
        Duration::from_secs(self.consent_timeout_secs)
    }

    pub fn section_timeout(&self) -> Duration {
        Duration::from_secs(self.section_timeout_secs)
    }

    pub fn consent_settle(&self) -> Duration {
        Duration::from_millis(self.consent_settle_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
