use crate::browser::{Browser, BrowserError, By, wait_for_element};
use crate::config::ScraperConfig;
use std::time::Duration;

/// Drives the browser from the front page to the section listing
#[derive(Debug, Clone)]
pub struct Navigator {
    start_url: String,
    consent_button: By,
    section_link: By,
    article_marker: By,
    consent_timeout: Duration,
    section_timeout: Duration,
    consent_settle: Duration,
    poll_interval: Duration,
}

impl Navigator {
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            start_url: config.start_url.clone(),
            consent_button: By::id(&config.consent_button_id),
            section_link: By::link_text(&config.section_link_text),
            article_marker: By::class_name(&config.article_marker_class),
            consent_timeout: config.consent_timeout(),
            section_timeout: config.section_timeout(),
            consent_settle: config.consent_settle(),
            poll_interval: config.poll_interval(),
        }
    }

    /// Loads the front page, accepts the consent interstitial, follows the
    /// section link and waits for its articles to render.
    ///
    /// Any expired wait is returned as [`BrowserError::WaitTimeout`].
    pub async fn open_section(&self, browser: &dyn Browser) -> Result<(), BrowserError> {
        browser.navigate(&self.start_url).await?;
        ::log::info!("Navigated to {}", self.start_url);

        let consent = wait_for_element(
            browser,
            &self.consent_button,
            self.consent_timeout,
            self.poll_interval,
        )
        .await?;
        if !self.consent_settle.is_zero() {
            tokio::time::sleep(self.consent_settle).await;
        }
        consent.click().await?;
        ::log::info!("Accepted cookies");

        // The link may still be covered while the interstitial fades out
        let section = wait_for_element(
            browser,
            &self.section_link,
            self.section_timeout,
            self.poll_interval,
        )
        .await?;
        section.click().await?;
        ::log::info!("Clicked on section link {}", self.section_link);

        wait_for_element(
            browser,
            &self.article_marker,
            self.section_timeout,
            self.poll_interval,
        )
        .await?;
        ::log::info!("Articles loaded");
        Ok(())
    }
}
