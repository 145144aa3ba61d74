//! Article extraction from the rendered section page.
//!
//! Each card field is read through a [`FieldSpec`] pairing its locator with a
//! [`FieldPolicy`] that says what a failed lookup means for the card.

use crate::browser::{Browser, BrowserError, By, PageElement};
use crate::config::ScraperConfig;
use crate::results::{Article, NO_DESCRIPTION};
use crate::utils::preview;
use url::Url;

/// What to do when a field cannot be read from a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Skip the whole card
    Skip,
    /// Use the given value instead
    Default(String),
    /// Leave the field unset
    Unset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Image,
}

/// Locator and failure policy of one card field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub field: Field,
    pub locator: By,
    pub policy: FieldPolicy,
}

/// Result of reading one field under its policy
#[derive(Debug, PartialEq, Eq)]
enum FieldValue {
    Value(String),
    Missing,
    SkipCard(String),
}

/// Extracts a bounded list of articles from the card elements of a page
#[derive(Debug, Clone)]
pub struct ArticleExtractor {
    card: By,
    fields: Vec<FieldSpec>,
    candidate_limit: usize,
    article_limit: usize,
}

impl ArticleExtractor {
    pub fn new(config: &ScraperConfig) -> Self {
        let fields = vec![
            FieldSpec {
                field: Field::Title,
                locator: By::class_name(&config.title_class),
                policy: FieldPolicy::Skip,
            },
            FieldSpec {
                field: Field::Description,
                locator: By::class_name(&config.description_class),
                policy: FieldPolicy::Default(NO_DESCRIPTION.to_string()),
            },
            FieldSpec {
                field: Field::Image,
                locator: By::tag_name(&config.image_tag),
                policy: FieldPolicy::Unset,
            },
        ];
        Self {
            card: By::class_name(&config.card_class),
            fields,
            candidate_limit: config.candidate_limit,
            article_limit: config.article_limit,
        }
    }

    /// Replaces the failure policy of `field`
    pub fn with_policy(mut self, field: Field, policy: FieldPolicy) -> Self {
        if let Some(spec) = self.fields.iter_mut().find(|s| s.field == field) {
            spec.policy = policy;
        }
        self
    }

    fn spec(&self, field: Field) -> Option<&FieldSpec> {
        self.fields.iter().find(|s| s.field == field)
    }

    /// Enumerates the cards on the current page and extracts articles from them
    pub async fn extract(&self, browser: &dyn Browser) -> Result<Vec<Article>, BrowserError> {
        let cards = browser.find_all(&self.card).await?;
        ::log::info!("Found {} articles", cards.len());

        let base_url = match browser.current_url().await {
            Ok(url) => Url::parse(&url).ok(),
            Err(e) => {
                ::log::debug!("Current URL unavailable, image URLs stay as found: {}", e);
                None
            }
        };

        Ok(self.extract_from(&cards, base_url.as_ref()).await)
    }

    /// Extracts articles from already located cards, inspecting at most
    /// `candidate_limit` of them and keeping at most `article_limit` articles.
    pub async fn extract_from(
        &self,
        cards: &[Box<dyn PageElement>],
        base_url: Option<&Url>,
    ) -> Vec<Article> {
        let mut articles = Vec::new();

        for (index, card) in cards.iter().take(self.candidate_limit).enumerate() {
            match self.extract_card(card.as_ref(), base_url).await {
                Ok(Some(article)) => {
                    ::log::info!("Processed article: {}...", preview(&article.title, 50));
                    articles.push(article);
                    if articles.len() >= self.article_limit {
                        break;
                    }
                }
                Ok(None) => {
                    ::log::debug!("Candidate {} has an empty title, skipping", index + 1);
                }
                Err(reason) => {
                    ::log::warn!("Skipping an article due to error: {}", reason);
                }
            }
        }

        ::log::debug!("Extracted {} articles", articles.len());
        articles
    }

    /// `Ok(None)` for a card whose title is blank, `Err` for one that must be skipped
    async fn extract_card(
        &self,
        card: &dyn PageElement,
        base_url: Option<&Url>,
    ) -> Result<Option<Article>, String> {
        let title = match self.read_field(card, Field::Title).await {
            FieldValue::Value(title) => title,
            FieldValue::Missing => return Ok(None),
            FieldValue::SkipCard(reason) => return Err(reason),
        };
        if title.is_empty() {
            return Ok(None);
        }

        let content = match self.read_field(card, Field::Description).await {
            FieldValue::Value(content) => content,
            // Description left unset by its policy
            FieldValue::Missing => String::new(),
            FieldValue::SkipCard(reason) => return Err(reason),
        };

        let image_url = match self.read_field(card, Field::Image).await {
            FieldValue::Value(src) => Some(resolve(&src, base_url)),
            FieldValue::Missing => None,
            FieldValue::SkipCard(reason) => return Err(reason),
        };

        Ok(Some(Article::new(title, content, image_url)))
    }

    /// Reads `field` from `card`, applying its policy to any failure
    async fn read_field(&self, card: &dyn PageElement, field: Field) -> FieldValue {
        let Some(spec) = self.spec(field) else {
            return FieldValue::Missing;
        };

        match read_raw(card, spec).await {
            Ok(Some(value)) => FieldValue::Value(value),
            Ok(None) => apply_policy(spec, format!("{} has no value", spec.locator)),
            Err(e) => apply_policy(spec, e.to_string()),
        }
    }
}

async fn read_raw(card: &dyn PageElement, spec: &FieldSpec) -> Result<Option<String>, BrowserError> {
    let element = card.find_child(&spec.locator).await?;
    match spec.field {
        Field::Title | Field::Description => Ok(Some(element.text().await?.trim().to_string())),
        Field::Image => Ok(element
            .attribute("src")
            .await?
            .map(|src| src.trim().to_string())
            .filter(|src| !src.is_empty())),
    }
}

fn apply_policy(spec: &FieldSpec, reason: String) -> FieldValue {
    match &spec.policy {
        FieldPolicy::Skip => FieldValue::SkipCard(reason),
        FieldPolicy::Default(value) => FieldValue::Value(value.clone()),
        FieldPolicy::Unset => {
            ::log::trace!("{:?} unset: {}", spec.field, reason);
            FieldValue::Missing
        }
    }
}

/// Resolves a possibly relative `src` against the page URL
fn resolve(src: &str, base_url: Option<&Url>) -> String {
    match base_url.map(|base| base.join(src)) {
        Some(Ok(url)) => url.to_string(),
        _ => src.to_string(),
    }
}
