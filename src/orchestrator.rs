use std::sync::Arc;
use std::time::Instant;

use crate::data_models::{ModelPayload, TransparencyResponse};
use crate::error::SearchError;
use crate::gemini::{GenerateRequest, GenerativeBackend};
use crate::prompts::build_prompt;

/// Turns a user query into a [`TransparencyResponse`] with one backend call.
/// Holds no state between calls.
pub struct QueryOrchestrator {
    backend: Arc<dyn GenerativeBackend>,
    model: String,
}

impl QueryOrchestrator {
    pub fn new(backend: Arc<dyn GenerativeBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn search(
        &self,
        query: &str,
        fast_mode: bool,
    ) -> Result<TransparencyResponse, SearchError> {
        let start = Instant::now();
        tracing::info!(query, fast_mode, "search started");

        let result = self.run(query, fast_mode).await;
        match &result {
            Ok(response) => tracing::info!(
                keywords = response.keywords.len(),
                results = response.results.len(),
                actual_queries = response.actual_queries.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "search finished"
            ),
            Err(e) => tracing::error!(
                kind = ?e.kind(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "search failed: {e:#}"
            ),
        }
        result
    }

    async fn run(&self, query: &str, fast_mode: bool) -> Result<TransparencyResponse, SearchError> {
        let req = GenerateRequest {
            model: self.model.clone(),
            prompt: build_prompt(query, fast_mode),
            json_response: true,
            web_search: !fast_mode,
        };
        let output = self.backend.generate(req).await?;

        let text = output
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or(SearchError::EmptyResponse)?;
        let payload: ModelPayload =
            serde_json::from_str(&text).map_err(SearchError::MalformedResponse)?;

        let response = if fast_mode {
            TransparencyResponse {
                actual_queries: payload.keywords.clone(),
                keywords: payload.keywords,
                results: Vec::new(),
                is_fast_mode: true,
                answer: payload.answer,
            }
        } else {
            TransparencyResponse {
                keywords: payload.keywords,
                results: payload.results,
                actual_queries: output.web_search_queries,
                is_fast_mode: false,
                answer: payload.answer,
            }
        };

        // Results are kept as returned; mismatched tags are only reported.
        let orphans = response.orphaned_results().count();
        if orphans > 0 {
            tracing::warn!(orphans, "results tagged with keywords the model did not generate");
        }

        Ok(response)
    }
}
