//! Test doubles for the browser and HTTP capabilities.

use crate::browser::{Browser, BrowserError, By, PageElement};
use crate::http::{HttpClient, HttpError, HttpResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Script {
    /// Locator -> number of failed lookups before it appears
    appear_after: HashMap<By, usize>,
    find_calls: HashMap<By, usize>,
    events: Vec<String>,
}

/// Browser whose elements appear after a scripted number of lookups
#[derive(Clone)]
pub struct ScriptedBrowser {
    script: Arc<Mutex<Script>>,
    quits: Arc<AtomicUsize>,
}

impl ScriptedBrowser {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script::default())),
            quits: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// `by` is found on the `polls + 1`th lookup and every one after
    pub fn appear_after(self, by: By, polls: usize) -> Self {
        self.script.lock().unwrap().appear_after.insert(by, polls);
        self
    }

    pub fn with_element(self, by: By) -> Self {
        self.appear_after(by, 0)
    }

    pub fn find_calls(&self, by: &By) -> usize {
        *self.script.lock().unwrap().find_calls.get(by).unwrap_or(&0)
    }

    /// Navigations and clicks in the order they happened
    pub fn events(&self) -> Vec<String> {
        self.script.lock().unwrap().events.clone()
    }

    pub fn quit_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.quits)
    }
}

#[async_trait]
impl Browser for ScriptedBrowser {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.script
            .lock()
            .unwrap()
            .events
            .push(format!("navigate {}", url));
        Ok(())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        Ok("https://elpais.com/".to_string())
    }

    async fn find(&self, by: &By) -> Result<Box<dyn PageElement>, BrowserError> {
        let mut script = self.script.lock().unwrap();
        let calls = {
            let entry = script.find_calls.entry(by.clone()).or_insert(0);
            *entry += 1;
            *entry
        };
        match script.appear_after.get(by) {
            Some(polls) if calls > *polls => Ok(Box::new(ScriptedElement {
                by: by.clone(),
                script: Arc::clone(&self.script),
            })),
            _ => Err(BrowserError::NotFound(by.clone())),
        }
    }

    async fn find_all(&self, by: &By) -> Result<Vec<Box<dyn PageElement>>, BrowserError> {
        Ok(self.find(by).await.into_iter().collect())
    }

    async fn quit(&self) -> Result<(), BrowserError> {
        self.quits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct ScriptedElement {
    by: By,
    script: Arc<Mutex<Script>>,
}

#[async_trait]
impl PageElement for ScriptedElement {
    async fn find_child(&self, by: &By) -> Result<Box<dyn PageElement>, BrowserError> {
        Err(BrowserError::NotFound(by.clone()))
    }

    async fn text(&self) -> Result<String, BrowserError> {
        Ok(String::new())
    }

    async fn attribute(&self, _name: &str) -> Result<Option<String>, BrowserError> {
        Ok(None)
    }

    async fn click(&self) -> Result<(), BrowserError> {
        self.script
            .lock()
            .unwrap()
            .events
            .push(format!("click {}", self.by));
        Ok(())
    }
}

/// Canned HTTP responses keyed by URL, recording every request
#[derive(Default)]
pub struct StubHttp {
    get_responses: HashMap<String, HttpResponse>,
    post_responder: Option<Box<dyn Fn(&Value) -> Result<HttpResponse, HttpError> + Send + Sync>>,
    requests: Mutex<Vec<(String, Option<Value>, Vec<(String, String)>)>>,
}

impl StubHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_get(mut self, url: &str, status: u16, body: &[u8]) -> Self {
        self.get_responses.insert(
            url.to_string(),
            HttpResponse {
                status,
                body: body.to_vec(),
            },
        );
        self
    }

    /// Answer every POST through `responder`, given the JSON payload
    pub fn with_post<F>(mut self, responder: F) -> Self
    where
        F: Fn(&Value) -> Result<HttpResponse, HttpError> + Send + Sync + 'static,
    {
        self.post_responder = Some(Box::new(responder));
        self
    }

    /// `(url, json payload, headers)` of every request so far
    pub fn requests(&self) -> Vec<(String, Option<Value>, Vec<(String, String)>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for StubHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), None, Vec::new()));
        self.get_responses
            .get(url)
            .cloned()
            .ok_or_else(|| HttpError::Transport(format!("connection refused: {}", url)))
    }

    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, HttpError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), Some(body.clone()), headers.to_vec()));
        match &self.post_responder {
            Some(responder) => responder(body),
            None => Err(HttpError::Transport("no responder".to_string())),
        }
    }
}

/// JSON response with the given status
pub fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        body: body.to_string().into_bytes(),
    }
}
