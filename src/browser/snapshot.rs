//! Browser capability over a saved HTML page.
//!
//! Lets the extraction stages run offline against a page captured earlier
//! (e.g. with "Save Page As" after the section has rendered). Navigation and
//! clicks are recorded but do not change the document.

use super::{Browser, BrowserError, By, PageElement};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Browser backed by a static HTML document
pub struct SnapshotBrowser {
    html: String,
    current_url: Mutex<String>,
}

impl SnapshotBrowser {
    /// Create a snapshot browser for `html`, reporting `url` as its location
    pub fn new(html: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            current_url: Mutex::new(url.into()),
        }
    }

    /// Load the snapshot from a file
    pub fn from_file(path: impl AsRef<Path>, url: &str) -> std::io::Result<Self> {
        let html = std::fs::read_to_string(path)?;
        Ok(Self::new(html, url))
    }

    fn select_all(&self, by: &By) -> Result<Vec<SnapshotElement>, BrowserError> {
        let doc = Html::parse_document(&self.html);
        let root = doc.root_element();
        let matches = matching(root, by)?
            .into_iter()
            .map(SnapshotElement::from_ref)
            .collect();
        Ok(matches)
    }
}

/// Elements under `scope` (the scope itself excluded) matching `by`
fn matching<'a>(scope: ElementRef<'a>, by: &By) -> Result<Vec<ElementRef<'a>>, BrowserError> {
    let scope_id = scope.id();
    let found = match by {
        By::LinkText(text) => {
            let anchors = selector("a", by)?;
            scope
                .select(&anchors)
                .filter(|a| normalized_text(a) == *text)
                .collect::<Vec<_>>()
        }
        _ => {
            let css = by
                .to_css()
                .ok_or_else(|| BrowserError::InvalidSelector(by.to_string()))?;
            let sel = selector(&css, by)?;
            scope.select(&sel).collect::<Vec<_>>()
        }
    };
    Ok(found.into_iter().filter(|e| e.id() != scope_id).collect())
}

fn selector(css: &str, by: &By) -> Result<Selector, BrowserError> {
    Selector::parse(css).map_err(|_| BrowserError::InvalidSelector(by.to_string()))
}

/// Text content with whitespace runs collapsed, the way a browser renders it
fn normalized_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl Browser for SnapshotBrowser {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        ::log::debug!("Snapshot browser ignoring navigation to {}", url);
        if let Ok(mut current) = self.current_url.lock() {
            *current = url.to_string();
        }
        Ok(())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        self.current_url
            .lock()
            .map(|url| url.clone())
            .map_err(|e| BrowserError::Command(e.to_string()))
    }

    async fn find(&self, by: &By) -> Result<Box<dyn PageElement>, BrowserError> {
        self.select_all(by)?
            .into_iter()
            .next()
            .map(|e| Box::new(e) as Box<dyn PageElement>)
            .ok_or_else(|| BrowserError::NotFound(by.clone()))
    }

    async fn find_all(&self, by: &By) -> Result<Vec<Box<dyn PageElement>>, BrowserError> {
        Ok(self
            .select_all(by)?
            .into_iter()
            .map(|e| Box::new(e) as Box<dyn PageElement>)
            .collect())
    }

    async fn quit(&self) -> Result<(), BrowserError> {
        Ok(())
    }
}

/// Detached copy of an element from a snapshot
#[derive(Debug, Clone)]
pub struct SnapshotElement {
    outer_html: String,
    text: String,
    attributes: HashMap<String, String>,
}

impl SnapshotElement {
    fn from_ref(element: ElementRef<'_>) -> Self {
        Self {
            outer_html: element.html(),
            text: normalized_text(&element),
            attributes: element
                .value()
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl PageElement for SnapshotElement {
    async fn find_child(&self, by: &By) -> Result<Box<dyn PageElement>, BrowserError> {
        let fragment = Html::parse_fragment(&self.outer_html);
        let wrapper = fragment.root_element();
        let me = wrapper
            .children()
            .filter_map(ElementRef::wrap)
            .next()
            .unwrap_or(wrapper);
        matching(me, by)?
            .into_iter()
            .next()
            .map(|e| Box::new(SnapshotElement::from_ref(e)) as Box<dyn PageElement>)
            .ok_or_else(|| BrowserError::NotFound(by.clone()))
    }

    async fn text(&self) -> Result<String, BrowserError> {
        Ok(self.text.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, BrowserError> {
        Ok(self.attributes.get(name).cloned())
    }

    async fn click(&self) -> Result<(), BrowserError> {
        ::log::trace!("Snapshot click ignored");
        Ok(())
    }
}
