use std::time::Duration;

use async_trait::async_trait;
use configs::AssistConfig;
use models::AssistMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::{build_prompt, TextAssist};

#[derive(Debug, Error)]
pub enum AssistError {
    #[error("network error: {0}")]
    Network(String),
    #[error("api error: status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("empty response")]
    Empty,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Concatenated text of the first candidate, if it has any.
fn extract_text(resp: GenerateResponse) -> Option<String> {
    let content = resp.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if text.trim().is_empty() { None } else { Some(text) }
}

/// `generateContent` client for the Gemini API.
#[derive(Clone)]
pub struct GeminiAssist {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl GeminiAssist {
    pub fn new(api_key: Option<String>, model: impl Into<String>, endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        let endpoint: String = endpoint.into();
        Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(cfg: &AssistConfig) -> Self {
        Self::new(cfg.api_key.clone(), cfg.model.clone(), cfg.endpoint.clone(), Duration::from_secs(cfg.timeout_secs))
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, AssistError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let body = GenerateRequest { contents: vec![RequestContent { parts: vec![RequestPart { text: prompt }] }] };
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistError::Network(e.without_url().to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AssistError::Api { status: status.as_u16(), body });
        }
        let parsed = resp
            .json::<GenerateResponse>()
            .await
            .map_err(|e| AssistError::Parse(e.without_url().to_string()))?;
        extract_text(parsed).ok_or(AssistError::Empty)
    }
}

#[async_trait]
impl TextAssist for GeminiAssist {
    #[instrument(skip(self, text), fields(mode = %mode, len = text.len()))]
    async fn revise(&self, text: &str, mode: AssistMode) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("assist api key missing; returning text unchanged");
            return text.to_string();
        };
        match self.generate(api_key, &build_prompt(text, mode)).await {
            Ok(revised) => {
                debug!(revised_len = revised.len(), "assist revision received");
                revised
            }
            Err(e) => {
                warn!(error = %e, model = %self.model, "assist call failed; returning text unchanged");
                text.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::{HeaderMap, StatusCode}, routing::post, Json, Router};

    async fn spawn_mock(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind mock");
        let addr = listener.local_addr().expect("mock addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{addr}/v1beta")
    }

    fn client(endpoint: &str, key: Option<&str>) -> GeminiAssist {
        GeminiAssist::new(key.map(Into::into), "gemini-2.5-flash", endpoint, Duration::from_secs(5))
    }

    #[test]
    fn extract_text_joins_first_candidate_parts() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}]}},{"content":{"parts":[{"text":"ignored"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(resp).as_deref(), Some("Hello world"));

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(extract_text(empty).is_none());
        let blank: GenerateResponse = serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#).unwrap();
        assert!(extract_text(blank).is_none());
    }

    #[tokio::test]
    async fn missing_key_returns_original_text() {
        let assist = client("http://127.0.0.1:9", None);
        assert!(!assist.is_configured());
        assert_eq!(assist.revise("my draft", AssistMode::Proofread).await, "my draft");
        // blank keys count as missing
        assert!(!client("http://127.0.0.1:9", Some("  ")).is_configured());
    }

    #[tokio::test]
    async fn unreachable_endpoint_returns_original_text() {
        let assist = client("http://127.0.0.1:9/v1beta", Some("k"));
        assert_eq!(assist.revise("my draft", AssistMode::Expand).await, "my draft");
    }

    #[tokio::test]
    async fn network_error_does_not_leak_api_key() {
        let assist = client("http://127.0.0.1:9/v1beta", Some("SECRETKEY123"));
        let err = assist.generate("SECRETKEY123", "hi").await.expect_err("nothing listens on port 9");
        assert!(matches!(err, AssistError::Network(_)));
        assert!(!err.to_string().contains("SECRETKEY123"), "key leaked: {err}");
    }

    #[tokio::test]
    async fn successful_call_returns_model_text() {
        let router = Router::new().route(
            "/v1beta/models/:call",
            post(|Path(call): Path<String>, headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
                assert_eq!(call, "gemini-2.5-flash:generateContent");
                assert_eq!(headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()), Some("secret"));
                let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default().to_string();
                assert!(prompt.contains("\"teh book\""));
                Json(serde_json::json!({"candidates":[{"content":{"parts":[{"text":"The book."}]}}]}))
            }),
        );
        let endpoint = spawn_mock(router).await;
        let assist = client(&endpoint, Some("secret"));
        assert_eq!(assist.revise("teh book", AssistMode::Proofread).await, "The book.");
    }

    #[tokio::test]
    async fn api_error_returns_original_text() {
        let router = Router::new().route(
            "/v1beta/models/:call",
            post(|| async { (StatusCode::FORBIDDEN, "bad key") }),
        );
        let endpoint = spawn_mock(router).await;
        let assist = client(&endpoint, Some("wrong"));
        assert_eq!(assist.revise("draft", AssistMode::Expand).await, "draft");
    }
}
