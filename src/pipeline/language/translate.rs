use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{TranslateError, Translator};

/// Identity translator, used when no translation service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn translate(&self, text: &str, _source_lang: &str) -> Result<String, TranslateError> {
        Ok(text.to_string())
    }
}

/// Client for a LibreTranslate-compatible `/translate` endpoint.
///
/// Builds a blocking client per call; callers on an async runtime must go
/// through `spawn_blocking`.
pub struct LibreTranslateClient {
    base_url: String,
    target_lang: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl LibreTranslateClient {
    pub fn new(base_url: &str, target_lang: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            target_lang: target_lang.to_string(),
            api_key: None,
            timeout_secs,
        }
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    fn client(&self) -> Result<reqwest::blocking::Client, TranslateError> {
        reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| TranslateError::Http(e.to_string()))
    }
}

impl Translator for LibreTranslateClient {
    fn translate(&self, text: &str, source_lang: &str) -> Result<String, TranslateError> {
        let source = if source_lang.is_empty() { "auto" } else { source_lang };
        let body = TranslateRequest {
            q: text,
            source,
            target: &self.target_lang,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client()?
            .post(format!("{}/translate", self.base_url))
            .json(&body)
            .send()
            .map_err(|e| TranslateError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TranslateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranslateResponse = response
            .json()
            .map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;
        Ok(parsed.translated_text)
    }
}

/// Bring `text` into the canonical language.
///
/// Text already in the canonical language is returned unchanged without
/// calling the translator. Translation failures, and blank translations,
/// fall back to the original text.
pub fn translate_to_canonical(
    translator: &dyn Translator,
    text: &str,
    detected_lang: &str,
    canonical_lang: &str,
) -> String {
    if detected_lang == canonical_lang {
        return text.to_string();
    }

    match translator.translate(text, detected_lang) {
        Ok(translated) if !translated.trim().is_empty() => {
            tracing::debug!(from = detected_lang, to = canonical_lang, "Input translated");
            translated
        }
        Ok(_) => {
            tracing::warn!(from = detected_lang, "Translator returned empty text, using original");
            text.to_string()
        }
        Err(e) => {
            tracing::warn!(from = detected_lang, error = %e, "Translation failed, using original");
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::routing::post;
    use axum::{Json, Router};

    use super::*;

    struct CountingTranslator {
        calls: AtomicUsize,
        reply: Result<&'static str, ()>,
    }

    impl Translator for CountingTranslator {
        fn translate(&self, _text: &str, _source_lang: &str) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .map(str::to_string)
                .map_err(|_| TranslateError::Http("offline".into()))
        }
    }

    #[test]
    fn canonical_language_is_not_translated() {
        let translator = CountingTranslator {
            calls: AtomicUsize::new(0),
            reply: Ok("should not be used"),
        };
        let out = translate_to_canonical(&translator, "chest pain", "en", "en");
        assert_eq!(out, "chest pain");
        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn foreign_text_is_translated() {
        let translator = CountingTranslator {
            calls: AtomicUsize::new(0),
            reply: Ok("headache"),
        };
        assert_eq!(translate_to_canonical(&translator, "mal de tête", "fr", "en"), "headache");
        assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_translation_keeps_original() {
        let translator = CountingTranslator {
            calls: AtomicUsize::new(0),
            reply: Err(()),
        };
        assert_eq!(translate_to_canonical(&translator, "mal de tête", "fr", "en"), "mal de tête");
    }

    #[test]
    fn blank_translation_keeps_original() {
        let translator = CountingTranslator {
            calls: AtomicUsize::new(0),
            reply: Ok("   "),
        };
        assert_eq!(translate_to_canonical(&translator, "dolor", "es", "en"), "dolor");
    }

    #[test]
    fn passthrough_is_identity() {
        assert_eq!(PassthroughTranslator.translate("fièvre", "fr").unwrap(), "fièvre");
    }

    async fn stub_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn libretranslate_client_posts_and_parses() {
        let app = Router::new().route(
            "/translate",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["target"], "en");
                assert_eq!(body["source"], "fr");
                assert_eq!(body["format"], "text");
                Json(serde_json::json!({ "translatedText": format!("EN:{}", body["q"].as_str().unwrap()) }))
            }),
        );
        let base = stub_server(app).await;

        let translated = tokio::task::spawn_blocking(move || {
            LibreTranslateClient::new(&base, "en", 5).translate("fièvre", "fr")
        })
        .await
        .unwrap()
        .unwrap();
        assert_eq!(translated, "EN:fièvre");
    }

    #[tokio::test]
    async fn libretranslate_client_reports_http_status() {
        let app = Router::new().route(
            "/translate",
            post(|_body: axum::body::Bytes| async { (axum::http::StatusCode::FORBIDDEN, "bad api key") }),
        );
        let base = stub_server(app).await;

        let err = tokio::task::spawn_blocking(move || {
            LibreTranslateClient::new(&format!("{base}/"), "en", 5)
                .with_api_key("nope")
                .translate("fièvre", "fr")
        })
        .await
        .unwrap()
        .unwrap_err();
        match err {
            TranslateError::Status { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "bad api key");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
