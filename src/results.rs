use std::path::PathBuf;

/// Placeholder content for articles without a description
pub const NO_DESCRIPTION: &str = "No article description";

/// Placeholder translated title for articles whose translation failed
pub const TRANSLATION_FAILED: &str = "Translation failed";

/// An article scraped from the section page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Headline in the source language, trimmed and non-empty
    pub title: String,

    /// Description, or [`NO_DESCRIPTION`]
    pub content: String,

    /// Absolute URL of the article's first image
    pub image_url: Option<String>,

    /// Headline in the target language, or [`TRANSLATION_FAILED`].
    /// `None` until the translator has run.
    pub translated_title: Option<String>,
}

impl Article {
    /// Create an article that has not been translated yet
    pub fn new(title: String, content: String, image_url: Option<String>) -> Self {
        Self {
            title,
            content,
            image_url,
            translated_title: None,
        }
    }

    /// The translated title, unless translation has not run or failed
    pub fn successful_translation(&self) -> Option<&str> {
        self.translated_title
            .as_deref()
            .filter(|t| *t != TRANSLATION_FAILED)
    }
}

/// Outcome of a pipeline run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Articles in the order they were found
    pub articles: Vec<Article>,

    /// Image files written during the run
    pub downloads: Vec<PathBuf>,

    /// Words repeated more often than the threshold, with their counts
    pub repeated_words: Vec<(String, usize)>,
}

impl RunReport {
    /// Number of articles whose title was translated
    pub fn translated_count(&self) -> usize {
        self.articles
            .iter()
            .filter(|a| a.successful_translation().is_some())
            .count()
    }
}
