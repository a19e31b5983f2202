use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::content_service::{payload, prompts, ContentService};
use crate::training_engine::{
    error::GenerationError,
    models::{BlueprintOutput, SampleQuestion, StatTopic},
};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_BLUEPRINT_MODEL: &str = "gemini-3-pro-preview";
const DEFAULT_QUESTION_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_TIMEOUT_MS: u64 = 60_000;
const MAX_RETRIES: usize = 3;
const BASE_BACKOFF_MS: u64 = 200;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    /// Model for blueprints (slower, more capable).
    pub blueprint_model: String,
    /// Model for practice questions.
    pub question_model: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            blueprint_model: DEFAULT_BLUEPRINT_MODEL.to_string(),
            question_model: DEFAULT_QUESTION_MODEL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl GeminiConfig {
    /// Read `GEMINI_API_KEY` (or `API_KEY`), `GEMINI_ENDPOINT`,
    /// `GEMINI_BLUEPRINT_MODEL`, `GEMINI_QUESTION_MODEL` and
    /// `GEMINI_TIMEOUT_MS`, defaulting whatever is unset.
    pub fn from_env() -> Self {
        let defaults = GeminiConfig::default();
        GeminiConfig {
            api_key: env_string("GEMINI_API_KEY").or_else(|| env_string("API_KEY")),
            endpoint: env_string("GEMINI_ENDPOINT").unwrap_or(defaults.endpoint),
            blueprint_model: env_string("GEMINI_BLUEPRINT_MODEL").unwrap_or(defaults.blueprint_model),
            question_model: env_string("GEMINI_QUESTION_MODEL").unwrap_or(defaults.question_model),
            timeout: env_u64("GEMINI_TIMEOUT_MS").map(Duration::from_millis).unwrap_or(defaults.timeout),
        }
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        GeminiConfig { api_key: Some(api_key.into()), ..GeminiConfig::default() }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
            && !self.endpoint.trim().is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// `generateContent` request body with a JSON response schema.
fn request_body(system: &str, prompt: &str, schema: Value) -> Value {
    json!({
        "systemInstruction": { "parts": [{ "text": system }] },
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema
        }
    })
}

/// HTTP client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        info!(
            blueprint_model = %config.blueprint_model,
            question_model = %config.question_model,
            "content service client ready"
        );
        Ok(GeminiClient { config, client })
    }

    pub fn from_env() -> Result<Self, GenerationError> {
        Self::new(GeminiConfig::from_env())
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Run one structured generation and return the raw JSON text.
    async fn generate(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
        schema: Value,
    ) -> Result<String, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GenerationError::NotConfigured("GEMINI_API_KEY"))?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            model
        );
        let body = request_body(system, prompt, schema);
        debug!(%url, "requesting generation");

        let response = self.post_with_retry(&url, api_key, &body).await?;
        response.text().ok_or(GenerationError::EmptyResponse)
    }

    async fn post_with_retry(
        &self,
        url: &str,
        api_key: &str,
        payload: &Value,
    ) -> Result<GenerateResponse, GenerationError> {
        let mut last_error: Option<GenerationError> = None;

        for retry in 0..=MAX_RETRIES {
            let backoff = Duration::from_millis(BASE_BACKOFF_MS * (1 << retry));
            match self
                .client
                .post(url)
                .header("x-goog-api-key", api_key)
                .json(payload)
                .send()
                .await
            {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let bytes = resp.bytes().await?;
                        return serde_json::from_slice(&bytes).map_err(GenerationError::Unparseable);
                    }
                    let body = resp.text().await.unwrap_or_default();
                    let err = GenerationError::HttpStatus { status, body };
                    if retry < MAX_RETRIES && is_retryable(status) {
                        warn!(retry, ?status, "generation request failed, retrying");
                        sleep(backoff).await;
                        last_error = Some(err);
                        continue;
                    }
                    return Err(err);
                }
                Err(e) => {
                    let err = GenerationError::Request(e);
                    if retry < MAX_RETRIES {
                        warn!(retry, error = %err, "generation request error, retrying");
                        sleep(backoff).await;
                        last_error = Some(err);
                        continue;
                    }
                    return Err(err);
                }
            }
        }
        Err(last_error.unwrap_or(GenerationError::EmptyResponse))
    }
}

#[async_trait]
impl ContentService for GeminiClient {
    async fn blueprint(&self, topic: StatTopic) -> Result<BlueprintOutput, GenerationError> {
        let text = self
            .generate(
                &self.config.blueprint_model,
                prompts::BLUEPRINT_SYSTEM_INSTRUCTION,
                &prompts::blueprint_prompt(topic),
                prompts::blueprint_schema(),
            )
            .await?;
        payload::parse_blueprint(&text)
    }

    async fn sample_questions(
        &self,
        topic: StatTopic,
        objectives: &[&str],
    ) -> Result<Vec<SampleQuestion>, GenerationError> {
        let text = self
            .generate(
                &self.config.question_model,
                prompts::QUESTION_SYSTEM_INSTRUCTION,
                &prompts::questions_prompt(topic, objectives),
                prompts::questions_schema(),
            )
            .await?;
        payload::parse_questions(&text)
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_u64(key: &str) -> Option<u64> {
    env_string(key)?.parse().ok()
}

fn is_retryable(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS
        || status == reqwest::StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training_engine::error::ErrorKind;

    #[test]
    fn default_config_is_unconfigured() {
        let config = GeminiConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(GeminiConfig::with_api_key("k").is_configured());
        assert!(!GeminiConfig::with_api_key("  ").is_configured());
    }

    #[test]
    fn request_body_carries_schema_and_prompt() {
        let body = request_body("sys", "user", prompts::blueprint_schema());
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "sys");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "user");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn response_text_joins_first_candidate_parts() {
        let raw = r#"{"candidates": [
            {"content": {"parts": [{"text": "[{\"a\""}, {"text": ": 1}]"}]}},
            {"content": {"parts": [{"text": "ignored"}]}}
        ]}"#;
        let resp: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.text().as_deref(), Some(r#"[{"a": 1}]"#));
    }

    #[test]
    fn response_without_text_is_none() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(resp.text(), None);
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert_eq!(resp.text(), None);
    }

    #[test]
    fn retryable_statuses() {
        assert!(is_retryable(reqwest::StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_retryable(reqwest::StatusCode::BAD_REQUEST));
        assert!(!is_retryable(reqwest::StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = GeminiClient::new(GeminiConfig::default()).unwrap();
        let err = client.blueprint(StatTopic::Probability).await.unwrap_err();
        assert!(matches!(err, GenerationError::NotConfigured(_)));
        assert_eq!(err.kind(), ErrorKind::GenerationFailed);
    }
}
