//! Client for the hosted Gemini `generateContent` endpoint.
//!
//! A single request per call: no retries, no caching. The integrated
//! `googleSearch` tool is enabled on demand and the literal queries it ran
//! are read back from the candidate's grounding metadata.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::config::Config;
use crate::error::SearchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Ask for `application/json` output.
    pub json_response: bool,
    /// Enable the integrated web-search tool.
    pub web_search: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOutput {
    pub text: Option<String>,
    pub web_search_queries: Vec<String>,
}

#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, req: GenerateRequest) -> Result<GenerateOutput, SearchError>;
}

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    web_search_queries: Vec<String>,
}

impl GenerateContentResponse {
    fn into_output(self) -> GenerateOutput {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return GenerateOutput::default();
        };

        let text = candidate.content.and_then(|c| {
            let joined: String = c.parts.into_iter().filter_map(|p| p.text).collect();
            if joined.is_empty() { None } else { Some(joined) }
        });
        let web_search_queries = candidate
            .grounding_metadata
            .map(|g| g.web_search_queries)
            .unwrap_or_default();

        GenerateOutput {
            text,
            web_search_queries,
        }
    }
}

pub(crate) fn request_body(req: &GenerateRequest) -> serde_json::Value {
    let mut body = serde_json::json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": req.prompt }]
        }],
    });
    if req.web_search {
        body["tools"] = serde_json::json!([{ "googleSearch": {} }]);
    }
    // The API refuses a JSON mime type alongside tool use; the prompt still
    // demands raw JSON in that case.
    if req.json_response && !req.web_search {
        body["generationConfig"] = serde_json::json!({
            "responseMimeType": "application/json"
        });
    }
    body
}

// ── HTTP client ───────────────────────────────────────────────────────────────

pub struct GeminiClient {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.request_timeout,
        )
    }

    async fn send(&self, api_key: &str, req: &GenerateRequest) -> Result<GenerateOutput, SearchError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, req.model);
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request_body(req))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body: serde_json::Value = resp.json().await.unwrap_or_default();
            let message = body["error"]["message"]
                .as_str()
                .unwrap_or("unknown API error")
                .to_string();
            return Err(SearchError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = resp.json().await?;
        Ok(body.into_output())
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, req: GenerateRequest) -> Result<GenerateOutput, SearchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SearchError::MissingApiKey);
        };

        tracing::debug!(model = %req.model, web_search = req.web_search, "calling generateContent");
        match tokio::time::timeout(self.timeout, self.send(api_key, &req)).await {
            Ok(res) => res,
            Err(_) => Err(SearchError::Timeout(self.timeout)),
        }
    }
}
