//! Remote text-generation providers (blocking HTTP).

use super::{ExplanationRequest, TextExplainer};
use crate::config::ExplainerConfig;
use crate::core::{Error, Result};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";
pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";

/// API keys available to the process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: non_empty_var(GEMINI_KEY_VAR),
            openai_api_key: non_empty_var(OPENAI_KEY_VAR),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn build_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new().timeout(timeout).build()
}

fn map_transport_error(provider: &str, error: ureq::Error) -> Error {
    match error {
        ureq::Error::Status(401, _) | ureq::Error::Status(403, _) => {
            Error::Explainer(format!("{provider} rejected the API key"))
        }
        ureq::Error::Status(429, _) => Error::Explainer(format!("{provider} rate limit exceeded")),
        ureq::Error::Status(code, _) => {
            Error::Explainer(format!("{provider} returned HTTP {code}"))
        }
        e => Error::Explainer(format!("{provider} request failed: {e}")),
    }
}

// ============================================================================
// GEMINI
// ============================================================================

pub struct GeminiExplainer {
    api_key: String,
    model: String,
    agent: ureq::Agent,
}

impl GeminiExplainer {
    pub fn new(api_key: String, config: &ExplainerConfig) -> Self {
        Self {
            api_key,
            model: config.gemini_model.clone(),
            agent: build_agent(config.timeout()),
        }
    }
}

impl TextExplainer for GeminiExplainer {
    fn explain(&self, request: &ExplanationRequest) -> Result<String> {
        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);
        let body = json!({
            "contents": [{ "parts": [{ "text": request.prompt() }] }]
        });

        let response = self
            .agent
            .post(&url)
            .set("x-goog-api-key", &self.api_key)
            .set("Content-Type", "application/json")
            .send_string(&body.to_string())
            .map_err(|e| map_transport_error("gemini", e))?;

        let text = response
            .into_string()
            .map_err(|e| Error::Explainer(format!("gemini response unreadable: {e}")))?;
        parse_gemini_response(&text)
    }

    fn provider(&self) -> &str {
        "gemini"
    }
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

pub(crate) fn parse_gemini_response(body: &str) -> Result<String> {
    let response: GeminiResponse = serde_json::from_str(body)?;
    response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .find(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::Explainer("gemini response contained no text".to_string()))
}

// ============================================================================
// OPENAI
// ============================================================================

pub struct OpenAiExplainer {
    api_key: String,
    model: String,
    max_tokens: u32,
    agent: ureq::Agent,
}

impl OpenAiExplainer {
    pub fn new(api_key: String, config: &ExplainerConfig) -> Self {
        Self {
            api_key,
            model: config.openai_model.clone(),
            max_tokens: config.max_tokens,
            agent: build_agent(config.timeout()),
        }
    }
}

impl TextExplainer for OpenAiExplainer {
    fn explain(&self, request: &ExplanationRequest) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": request.prompt() }],
            "max_tokens": self.max_tokens,
        });

        let response = self
            .agent
            .post(OPENAI_API_URL)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_string(&body.to_string())
            .map_err(|e| map_transport_error("openai", e))?;

        let text = response
            .into_string()
            .map_err(|e| Error::Explainer(format!("openai response unreadable: {e}")))?;
        parse_openai_response(&text)
    }

    fn provider(&self) -> &str {
        "openai"
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

pub(crate) fn parse_openai_response(body: &str) -> Result<String> {
    let completion: ChatCompletion = serde_json::from_str(body)?;
    completion
        .choices
        .into_iter()
        .filter_map(|c| c.message.content)
        .find(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::Explainer("openai response contained no text".to_string()))
}
