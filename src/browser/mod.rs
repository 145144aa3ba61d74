pub mod snapshot;
pub mod wait;
pub mod webdriver;

pub use wait::{wait_for_element, wait_until};

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Ways of locating an element on a page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum By {
    /// Element id attribute
    Id(String),
    /// Single CSS class name
    ClassName(String),
    /// Tag name, e.g. `img`
    TagName(String),
    /// Anchor whose visible text matches exactly
    LinkText(String),
    /// Raw CSS selector
    Css(String),
}

impl By {
    pub fn id(id: impl Into<String>) -> Self {
        By::Id(id.into())
    }

    pub fn class_name(class: impl Into<String>) -> Self {
        By::ClassName(class.into())
    }

    pub fn tag_name(tag: impl Into<String>) -> Self {
        By::TagName(tag.into())
    }

    pub fn link_text(text: impl Into<String>) -> Self {
        By::LinkText(text.into())
    }

    /// CSS form of this locator. `LinkText` has no CSS equivalent.
    pub fn to_css(&self) -> Option<String> {
        match self {
            By::Id(id) => Some(format!("#{}", id)),
            By::ClassName(class) => Some(format!(".{}", class)),
            By::TagName(tag) => Some(tag.clone()),
            By::Css(css) => Some(css.clone()),
            By::LinkText(_) => None,
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            By::Id(id) => write!(f, "id={}", id),
            By::ClassName(class) => write!(f, "class={}", class),
            By::TagName(tag) => write!(f, "tag={}", tag),
            By::LinkText(text) => write!(f, "link text={:?}", text),
            By::Css(css) => write!(f, "css={}", css),
        }
    }
}

/// Errors raised by a browser capability
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("no element matching {0}")]
    NotFound(By),

    #[error("timed out after {timeout:?} waiting for {what}")]
    WaitTimeout { what: String, timeout: Duration },

    #[error("invalid selector {0}")]
    InvalidSelector(String),

    #[error("could not open a browser session: {0}")]
    Session(String),

    #[error("browser command failed: {0}")]
    Command(String),
}

impl BrowserError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BrowserError::NotFound(_))
    }
}

/// A page element handle
#[async_trait]
pub trait PageElement: Send + Sync {
    /// First descendant matching `by`
    async fn find_child(&self, by: &By) -> Result<Box<dyn PageElement>, BrowserError>;

    /// Visible text of the element
    async fn text(&self) -> Result<String, BrowserError>;

    /// Attribute value, `None` when the attribute is not set
    async fn attribute(&self, name: &str) -> Result<Option<String>, BrowserError>;

    async fn click(&self) -> Result<(), BrowserError>;
}

/// A live (or recorded) browser session
#[async_trait]
pub trait Browser: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    async fn current_url(&self) -> Result<String, BrowserError>;

    async fn find(&self, by: &By) -> Result<Box<dyn PageElement>, BrowserError>;

    /// All elements matching `by`, in document order. No match yields an empty list.
    async fn find_all(&self, by: &By) -> Result<Vec<Box<dyn PageElement>>, BrowserError>;

    /// Release the session
    async fn quit(&self) -> Result<(), BrowserError>;
}

/// Awaits `work` and then quits `browser`, whether `work` succeeded or not.
pub async fn with_session<B, T, E, Fut>(browser: &B, work: Fut) -> Result<T, E>
where
    B: Browser + ?Sized,
    Fut: std::future::Future<Output = Result<T, E>>,
{
    let result = work.await;
    if let Err(e) = browser.quit().await {
        ::log::warn!("Failed to close browser session: {}", e);
    } else {
        ::log::debug!("Browser session closed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedBrowser;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_locator_css_forms() {
        assert_eq!(By::id("agree").to_css().as_deref(), Some("#agree"));
        assert_eq!(By::class_name("c_t").to_css().as_deref(), Some(".c_t"));
        assert_eq!(By::tag_name("img").to_css().as_deref(), Some("img"));
        assert_eq!(By::link_text("Opinión").to_css(), None);
    }

    #[tokio::test]
    async fn test_with_session_quits_on_success_and_failure() {
        let browser = ScriptedBrowser::new();
        let quits = browser.quit_counter();
        let ok: Result<u32, BrowserError> = with_session(&browser, async { Ok(7) }).await;
        assert_eq!(ok.unwrap(), 7);
        assert_eq!(quits.load(Ordering::SeqCst), 1);

        let browser = ScriptedBrowser::new();
        let quits = browser.quit_counter();
        let failed: Result<u32, BrowserError> = with_session(&browser, async {
            Err(BrowserError::WaitTimeout {
                what: "marker".to_string(),
                timeout: Duration::from_millis(1),
            })
        })
        .await;
        assert!(matches!(failed, Err(BrowserError::WaitTimeout { .. })));
        assert_eq!(quits.load(Ordering::SeqCst), 1);
    }
}
