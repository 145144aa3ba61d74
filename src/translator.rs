use crate::config::TranslationConfig;
use crate::http::{HttpClient, HttpError};
use crate::results::{Article, TRANSLATION_FAILED};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Why a single title could not be translated
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    from: &'a str,
    to: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    trans: Option<String>,
}

/// Translates article titles through the remote translation endpoint
pub struct Translator {
    http: Arc<dyn HttpClient>,
    config: TranslationConfig,
}

impl Translator {
    pub fn new(http: Arc<dyn HttpClient>, config: TranslationConfig) -> Self {
        if config.api_key.is_none() {
            ::log::warn!("No translation API key configured, requests will likely be rejected");
        }
        Self { http, config }
    }

    /// Sets `translated_title` on every article, using [`TRANSLATION_FAILED`]
    /// for titles that could not be translated. Never fails.
    pub async fn translate_all(&self, articles: &mut [Article]) {
        for article in articles.iter_mut() {
            let translated = match self.translate(&article.title).await {
                Ok(Some(text)) => text,
                Ok(None) => {
                    ::log::warn!(
                        "Translation response for '{}' has no translated text",
                        article.title
                    );
                    TRANSLATION_FAILED.to_string()
                }
                Err(e) => {
                    ::log::error!("Translation failed for '{}': {}", article.title, e);
                    TRANSLATION_FAILED.to_string()
                }
            };
            ::log::debug!("Translated '{}' -> '{}'", article.title, translated);
            article.translated_title = Some(translated);
        }
    }

    /// Translates one text. `Ok(None)` when the service answered without a translation.
    pub async fn translate(&self, text: &str) -> Result<Option<String>, TranslateError> {
        let payload = serde_json::to_value(TranslateRequest {
            from: &self.config.source_lang,
            to: &self.config.target_lang,
            text,
        })?;

        let response = self
            .http
            .post_json(&self.config.endpoint, &payload, &self.headers())
            .await?
            .error_for_status(&self.config.endpoint)?;

        let body: TranslateResponse = serde_json::from_slice(&response.body)?;
        Ok(body.trans)
    }

    fn headers(&self) -> Vec<(String, String)> {
        match &self.config.api_key {
            Some(key) => vec![(self.config.api_key_header.clone(), key.clone())],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::NO_DESCRIPTION;
    use crate::testing::{StubHttp, json_response};
    use serde_json::json;

    fn articles(titles: &[&str]) -> Vec<Article> {
        titles
            .iter()
            .map(|t| Article::new(t.to_string(), NO_DESCRIPTION.to_string(), None))
            .collect()
    }

    fn config() -> TranslationConfig {
        TranslationConfig {
            endpoint: "https://translate.example/api".to_string(),
            api_key: Some("k3y".to_string()),
            ..TranslationConfig::default()
        }
    }

    #[tokio::test]
    async fn test_sends_payload_and_key_header() {
        let http = Arc::new(
            StubHttp::new().with_post(|_| Ok(json_response(200, json!({"trans": "Hello"})))),
        );
        let translator = Translator::new(http.clone(), config());
        let mut list = articles(&["Hola"]);
        translator.translate_all(&mut list).await;

        assert_eq!(list[0].translated_title.as_deref(), Some("Hello"));
        let requests = http.requests();
        assert_eq!(requests.len(), 1);
        let (url, body, headers) = &requests[0];
        assert_eq!(url, "https://translate.example/api");
        assert_eq!(
            body.as_ref().unwrap(),
            &json!({"from": "es", "to": "en", "text": "Hola"})
        );
        assert_eq!(
            headers,
            &vec![("x-rapidapi-key".to_string(), "k3y".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failures_are_isolated_per_article() {
        let http = Arc::new(StubHttp::new().with_post(|body| {
            match body["text"].as_str() {
                Some("Uno") => Ok(json_response(200, json!({"trans": "One"}))),
                Some("Dos") => Ok(json_response(500, json!({"error": "boom"}))),
                Some("Tres") => Ok(json_response(200, json!({"other": "x"}))),
                Some("Cuatro") => Err(HttpError::Transport("reset".to_string())),
                _ => Ok(crate::http::HttpResponse {
                    status: 200,
                    body: b"<html>".to_vec(),
                }),
            }
        }));
        let translator = Translator::new(http.clone(), config());
        let mut list = articles(&["Uno", "Dos", "Tres", "Cuatro", "Cinco"]);
        translator.translate_all(&mut list).await;

        let translated: Vec<&str> = list
            .iter()
            .map(|a| a.translated_title.as_deref().unwrap())
            .collect();
        assert_eq!(
            translated,
            vec![
                "One",
                TRANSLATION_FAILED,
                TRANSLATION_FAILED,
                TRANSLATION_FAILED,
                TRANSLATION_FAILED
            ]
        );
        assert_eq!(http.requests().len(), 5);
    }

    #[tokio::test]
    async fn test_translate_reports_missing_field_distinctly() {
        let http = Arc::new(StubHttp::new().with_post(|_| Ok(json_response(200, json!({})))));
        let translator = Translator::new(http, config());
        assert_eq!(translator.translate("Hola").await.unwrap(), None);

        let http = Arc::new(StubHttp::new().with_post(|_| Ok(json_response(403, json!({})))));
        let translator = Translator::new(http, config());
        assert!(matches!(
            translator.translate("Hola").await,
            Err(TranslateError::Http(HttpError::Status { status: 403, .. }))
        ));
    }
}
