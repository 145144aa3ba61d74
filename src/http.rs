use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by the HTTP capability
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Connection dropped or body unreadable after the response started
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
}

/// Status and fully-read body of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True for a 200 response carrying a body
    pub fn has_content(&self) -> bool {
        self.status == 200 && !self.body.is_empty()
    }

    /// Turns a non-2xx response into an error
    pub fn error_for_status(self, url: &str) -> Result<Self, HttpError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(HttpError::Status {
                status: self.status,
                url: url.to_string(),
            })
        }
    }
}

/// Minimal HTTP client used for image downloads and translation calls
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url`, reading the body as a stream of chunks
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError>;

    /// POST `body` as JSON with extra `headers`
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, HttpError>;
}

/// [`HttpClient`] backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

async fn read_body(mut response: reqwest::Response) -> Result<HttpResponse, HttpError> {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let mut body = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            Ok(None) => break,
            Err(e) => return Err(body_error(&url, body.len(), e)),
        }
    }
    Ok(HttpResponse { status, body })
}

fn body_error(url: &str, received: usize, error: impl std::fmt::Display) -> HttpError {
    HttpError::Transport(format!(
        "reading body of {} failed after {} bytes: {}",
        url, received, error
    ))
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        ::log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        read_body(response).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, HttpError> {
        ::log::debug!("POST {}", url);
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request.send().await?;
        read_body(response).await
    }
}
