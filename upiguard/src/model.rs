//! Model-backed classification through a natural-language completion provider.
//!
//! The provider is asked for a single classification token (`SAFE` or
//! `SUSPICIOUS`) on the first line and a short justification below it. Every
//! provider failure, transport, HTTP status, empty body or an ambiguous first
//! token, is absorbed locally: the error is logged and the heuristic
//! classifier answers for the same identifier instead. From the caller's
//! point of view this classifier never fails.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ClassifierConfig;
use crate::heuristic::HeuristicClassifier;
use crate::models::{Identifier, Verdict, VerdictSource};
use crate::{Result, UpiguardError};

#[cfg(test)]
use mockall::automock;

/// Token budget for the completion request.
const MAX_COMPLETION_TOKENS: u32 = 100;

/// Near-deterministic sampling temperature.
const TEMPERATURE: f32 = 0.1;

const GENERIC_SAFE_MESSAGE: &str =
    "UPI ID appears legitimate and follows standard conventions.";
const GENERIC_SUSPICIOUS_MESSAGE: &str =
    "UPI ID shows suspicious characteristics that warrant caution.";

/// Seam to the remote completion API. Implementations return the raw
/// completion text for a prompt, or an error for any transport or protocol
/// failure.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Completion provider backed by an OpenAI-compatible chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    /// Build a provider from configuration. Fails if no credential is
    /// configured or the HTTP client cannot be constructed.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        let api_key = config
            .api_key()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                UpiguardError::Configuration(
                    "no provider credential configured".to_string(),
                )
            })?
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                UpiguardError::Configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            api_key,
            model: config.model().to_string(),
            base_url: config.base_url().to_string(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_COMPLETION_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| UpiguardError::Provider(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpiguardError::Provider(format!(
                "HTTP error: {status} {body}"
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| UpiguardError::Provider(format!("malformed response body: {e}")))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                UpiguardError::Provider("response contained no choices".to_string())
            })?;

        Ok(content)
    }
}

/// Classifier that delegates to a completion provider and falls back to the
/// heuristic classifier on any failure.
pub struct ModelClassifier {
    provider: Box<dyn CompletionProvider>,
    fallback: HeuristicClassifier,
}

impl std::fmt::Debug for ModelClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelClassifier")
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

impl ModelClassifier {
    pub fn new(provider: Box<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            fallback: HeuristicClassifier::new(),
        }
    }

    /// Build a model classifier with the OpenAI provider from configuration.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        Ok(Self::new(Box::new(OpenAiProvider::from_config(config)?)))
    }

    /// Classify through the provider; never fails. The fallback is total:
    /// any provider or parse error is logged and replaced by the heuristic
    /// verdict for the same identifier.
    pub async fn classify(&self, id: &Identifier) -> Verdict {
        match self.classify_remote(id).await {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(
                    handle = %id,
                    error = %e,
                    "model classification failed, falling back to heuristic"
                );
                self.fallback.classify(id)
            }
        }
    }

    async fn classify_remote(&self, id: &Identifier) -> Result<Verdict> {
        let prompt = build_prompt(id);
        let completion = self.provider.complete(&prompt).await?;
        debug!(handle = %id, completion = %completion, "received completion");
        parse_completion(&completion)
    }
}

/// Fixed instruction prompt embedding the identifier.
fn build_prompt(id: &Identifier) -> String {
    format!(
        r#"Analyze this UPI ID for safety: "{id}"

Please classify it as either SAFE or SUSPICIOUS based on these criteria:
- SUSPICIOUS: Contains obvious fake names, suspicious patterns, very long numbers, repeated characters, admin/system keywords, or anything that looks like a scam
- SAFE: Follows normal UPI naming conventions (name@bank format), looks legitimate

Respond with exactly one word: SAFE or SUSPICIOUS

Then on a new line, provide a brief explanation (max 50 words) of your reasoning."#
    )
}

/// Parse the completion text: the first non-empty line, uppercased, is the
/// classification token; the remaining lines joined and trimmed are the
/// explanation, with a fixed generic sentence when empty.
fn parse_completion(text: &str) -> Result<Verdict> {
    let mut lines = text.lines().skip_while(|line| line.trim().is_empty());

    let first = lines
        .next()
        .map(|line| line.trim().to_uppercase())
        .ok_or_else(|| UpiguardError::Provider("provider returned an empty completion".to_string()))?;

    let safe = match first.as_str() {
        "SAFE" => true,
        "SUSPICIOUS" => false,
        _ => return Err(UpiguardError::AmbiguousAnswer(first)),
    };

    let explanation = lines.collect::<Vec<_>>().join(" ").trim().to_string();
    let message = if explanation.is_empty() {
        if safe {
            GENERIC_SAFE_MESSAGE.to_string()
        } else {
            GENERIC_SUSPICIOUS_MESSAGE.to_string()
        }
    } else {
        explanation
    };

    Ok(Verdict::new(safe, message, VerdictSource::Model))
}
