use super::{Browser, BrowserError, By, PageElement};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Map, Value};

/// Common local WebDriver endpoints tried when the configured one is unreachable
const FALLBACK_WEBDRIVER_URLS: [&str; 3] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // Selenium / geckodriver default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Browser capability backed by a WebDriver session
pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    /// Connects to the WebDriver server at `webdriver_url`, falling back to the
    /// usual local ports when that fails.
    pub async fn connect(
        webdriver_url: &str,
        capabilities: Option<&Map<String, Value>>,
    ) -> Result<Self, BrowserError> {
        let first_error = match open_session(webdriver_url, capabilities).await {
            Ok(client) => {
                ::log::info!("Connected to WebDriver at {}", webdriver_url);
                return Ok(Self { client });
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    webdriver_url,
                    e
                );
                e
            }
        };

        for url in FALLBACK_WEBDRIVER_URLS.iter() {
            if *url == webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = open_session(url, capabilities).await {
                ::log::info!("Connected to fallback WebDriver at {}", url);
                return Ok(Self { client });
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(BrowserError::Session(first_error))
    }
}

async fn open_session(
    url: &str,
    capabilities: Option<&Map<String, Value>>,
) -> Result<Client, String> {
    let mut builder = ClientBuilder::native();
    if let Some(caps) = capabilities {
        builder.capabilities(caps.clone());
    }
    builder.connect(url).await.map_err(|e| e.to_string())
}

/// Translates `by` into a WebDriver locator. `css` must hold `by.to_css()`.
fn locator<'a>(by: &'a By, css: &'a Option<String>) -> Result<Locator<'a>, BrowserError> {
    match (by, css) {
        (By::Id(id), _) => Ok(Locator::Id(id)),
        (By::LinkText(text), _) => Ok(Locator::LinkText(text)),
        (_, Some(css)) => Ok(Locator::Css(css)),
        (_, None) => Err(BrowserError::InvalidSelector(by.to_string())),
    }
}

fn map_error(error: CmdError, by: &By) -> BrowserError {
    match error {
        e if e.is_no_such_element() => BrowserError::NotFound(by.clone()),
        other => BrowserError::Command(other.to_string()),
    }
}

fn command_error(error: CmdError) -> BrowserError {
    BrowserError::Command(error.to_string())
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        ::log::debug!("GOTO: {}", url);
        self.client.goto(url).await.map_err(command_error)
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(command_error)
    }

    async fn find(&self, by: &By) -> Result<Box<dyn PageElement>, BrowserError> {
        let css = by.to_css();
        let element = self
            .client
            .find(locator(by, &css)?)
            .await
            .map_err(|e| map_error(e, by))?;
        Ok(Box::new(WebDriverElement { element }))
    }

    async fn find_all(&self, by: &By) -> Result<Vec<Box<dyn PageElement>>, BrowserError> {
        let css = by.to_css();
        let elements = self
            .client
            .find_all(locator(by, &css)?)
            .await
            .map_err(|e| map_error(e, by))?;
        Ok(elements
            .into_iter()
            .map(|element| Box::new(WebDriverElement { element }) as Box<dyn PageElement>)
            .collect())
    }

    async fn quit(&self) -> Result<(), BrowserError> {
        self.client.clone().close().await.map_err(command_error)
    }
}

/// Element handle within a WebDriver session
pub struct WebDriverElement {
    element: Element,
}

#[async_trait]
impl PageElement for WebDriverElement {
    async fn find_child(&self, by: &By) -> Result<Box<dyn PageElement>, BrowserError> {
        let css = by.to_css();
        let element = self
            .element
            .find(locator(by, &css)?)
            .await
            .map_err(|e| map_error(e, by))?;
        Ok(Box::new(WebDriverElement { element }))
    }

    async fn text(&self) -> Result<String, BrowserError> {
        self.element.text().await.map_err(command_error)
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, BrowserError> {
        self.element.attr(name).await.map_err(command_error)
    }

    async fn click(&self) -> Result<(), BrowserError> {
        self.element.click().await.map_err(command_error)
    }
}
