//! Inference Service Client
//!
//! Submits a finished frame sequence to the Gemini `generateContent` endpoint
//! as one multimodal request and validates the structured response. The call
//! is attempted exactly once per invocation; re-invocation only happens
//! through a brand-new recording.

use crate::analyzer::prompt::{analysis_prompt, response_schema, SYSTEM_INSTRUCTION};
use crate::analyzer::suggestion::{assign_ids, WorkflowSuggestion};
use crate::analyzer::AnalyzeFrames;
use crate::app::config::AnalyzerConfig;
use crate::capture::types::FrameSequence;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable holding the inference service credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default API base
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for multimodal analysis
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default per-request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Gemini response body (only the fields we consume)
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
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
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Request/response adapter for the inference service.
pub struct WorkflowAnalyzer {
    /// API base URL
    pub endpoint: String,
    /// Model to use
    pub model: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Credential override; the process environment is consulted at call
    /// time when unset
    api_key: Option<String>,
    /// HTTP client
    client: Client,
}

impl WorkflowAnalyzer {
    /// Create with default settings
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            api_key: None,
            client: Client::new(),
        }
    }

    /// Create from configuration
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            api_key: None,
            client: Client::new(),
        }
    }

    /// Create with an explicit credential instead of the environment
    pub fn with_api_key(api_key: &str) -> Self {
        Self {
            api_key: Some(api_key.to_string()),
            ..Self::new()
        }
    }

    /// Resolve the credential: explicit override first, then the process
    /// environment at call time. Absence is a hard failure.
    fn resolve_api_key(&self) -> crate::Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(crate::Error::MissingApiKey(API_KEY_ENV))
    }

    /// Build the multimodal request body: one inline base64 JPEG part per
    /// frame in capture order, followed by the trailing prompt, with the
    /// strict output schema in the generation config.
    fn build_request(&self, frames: &FrameSequence) -> Value {
        let b64 = base64::engine::general_purpose::STANDARD;
        let mut parts: Vec<Value> = frames
            .iter()
            .map(|frame| {
                json!({
                    "inlineData": {
                        "mimeType": "image/jpeg",
                        "data": b64.encode(&frame.jpeg)
                    }
                })
            })
            .collect();
        parts.push(json!({ "text": analysis_prompt(frames.len()) }));

        json!({
            "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema()
            }
        })
    }

    /// Parse and validate the response text into suggestions.
    ///
    /// Rejects anything that does not match the expected structure, then
    /// synthesizes `sugg-<index>` ids for entries that omitted one. An empty
    /// list is a failure: results are all-or-nothing.
    fn parse_suggestions(text: &str) -> crate::Result<Vec<WorkflowSuggestion>> {
        let suggestions: Vec<WorkflowSuggestion> = serde_json::from_str(text)
            .map_err(|e| crate::Error::Response(format!("malformed suggestion list: {}", e)))?;
        if suggestions.is_empty() {
            return Err(crate::Error::Response(
                "the service returned an empty suggestion list".to_string(),
            ));
        }
        Ok(assign_ids(suggestions))
    }

    /// Extract the generated text from the response body.
    fn response_text(body: GenerateContentResponse) -> crate::Result<String> {
        body.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| crate::Error::Response("empty response from the model".to_string()))
    }
}

impl Default for WorkflowAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzeFrames for WorkflowAnalyzer {
    async fn analyze(&self, frames: &FrameSequence) -> crate::Result<Vec<WorkflowSuggestion>> {
        if frames.is_empty() {
            return Err(crate::Error::Session(
                "analyzer invoked with an empty frame sequence".to_string(),
            ));
        }

        // Credential check comes first: no network attempt without one
        let api_key = self.resolve_api_key()?;

        let body = self.build_request(frames);
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        debug!(frames = frames.len(), model = %self.model, "submitting analysis request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .timeout(self.request_timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| crate::Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_else(|_| String::new());
            return Err(crate::Error::Transport(format!(
                "service returned {}: {:.200}",
                status, detail
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| crate::Error::Response(format!("unreadable response body: {}", e)))?;

        let text = Self::response_text(body)?;
        let suggestions = Self::parse_suggestions(&text)?;
        info!(count = suggestions.len(), "analysis response validated");
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::types::Frame;

    fn frames_of(payloads: &[&[u8]]) -> FrameSequence {
        let mut frames = FrameSequence::new();
        for payload in payloads {
            frames.push(Frame::new(payload.to_vec()));
        }
        frames
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        std::env::remove_var(API_KEY_ENV);
        let analyzer = WorkflowAnalyzer::new();
        let frames = frames_of(&[b"jpeg"]);

        let err = analyzer.analyze(&frames).await.unwrap_err();
        assert!(matches!(err, crate::Error::MissingApiKey(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[tokio::test]
    async fn test_empty_frame_sequence_is_rejected() {
        let analyzer = WorkflowAnalyzer::with_api_key("test-key");
        let err = analyzer.analyze(&FrameSequence::new()).await.unwrap_err();
        assert!(err.to_string().contains("empty frame sequence"));
    }

    #[test]
    fn test_build_request_submits_frames_in_capture_order() {
        let b64 = base64::engine::general_purpose::STANDARD;
        let analyzer = WorkflowAnalyzer::new();
        let frames = frames_of(&[b"first-frame", b"second-frame"]);

        let body = analyzer.build_request(&frames);
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3); // two images plus the trailing prompt

        assert_eq!(
            parts[0]["inlineData"]["data"].as_str().unwrap(),
            b64.encode(b"first-frame")
        );
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(
            parts[1]["inlineData"]["data"].as_str().unwrap(),
            b64.encode(b"second-frame")
        );

        let prompt = parts[2]["text"].as_str().unwrap();
        assert!(prompt.contains("2 frames"));
    }

    #[test]
    fn test_build_request_carries_schema_and_instruction() {
        let analyzer = WorkflowAnalyzer::new();
        let body = analyzer.build_request(&frames_of(&[b"f"]));

        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Workflow Automation Engineer"));
    }

    #[test]
    fn test_parse_suggestions_synthesizes_missing_ids() {
        let text = r#"[
            {"title": "a", "description": "d", "complexity": "Low",
             "type": "Shell Script", "steps": ["s"], "code": "c"},
            {"title": "b", "description": "d", "complexity": "High",
             "type": "Python (Selenium)", "steps": [], "code": "c"}
        ]"#;
        let suggestions = WorkflowAnalyzer::parse_suggestions(text).unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].id, "sugg-0");
        assert_eq!(suggestions[1].id, "sugg-1");
    }

    #[test]
    fn test_parse_suggestions_rejects_malformed_text() {
        assert!(WorkflowAnalyzer::parse_suggestions("not json").is_err());
        assert!(WorkflowAnalyzer::parse_suggestions(r#"{"title": "object"}"#).is_err());
    }

    #[test]
    fn test_parse_suggestions_rejects_empty_list() {
        let err = WorkflowAnalyzer::parse_suggestions("[]").unwrap_err();
        assert!(err.to_string().contains("empty suggestion list"));
    }

    #[test]
    fn test_response_text_extracts_first_candidate() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "[1, 2]"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(WorkflowAnalyzer::response_text(body).unwrap(), "[1, 2]");
    }

    #[test]
    fn test_response_without_candidates_is_an_error() {
        let body: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(WorkflowAnalyzer::response_text(body).is_err());

        let body: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#)
                .unwrap();
        assert!(WorkflowAnalyzer::response_text(body).is_err());
    }

    #[test]
    fn test_default_configuration() {
        let analyzer = WorkflowAnalyzer::default();
        assert!(analyzer.endpoint.contains("generativelanguage.googleapis.com"));
        assert_eq!(analyzer.model, "gemini-2.5-flash");
        assert_eq!(analyzer.request_timeout, Duration::from_secs(60));
    }
}
