//! Classifier configuration.
//!
//! Resolved once at process start and passed into the service constructor;
//! nothing here is re-read at call sites. Presence of a non-empty provider
//! credential is what selects the model path over the heuristic path.

use std::env;
use std::time::Duration;

pub use crate::validator::ValidationPolicy;

use crate::{Result, UpiguardError};

/// Default completion model requested from the provider.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default provider request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable classification configuration.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
    validation_policy: ValidationPolicy,
}

impl ClassifierConfig {
    pub fn builder() -> ClassifierConfigBuilder {
        ClassifierConfigBuilder::new()
    }

    /// Resolve configuration from the environment: `OPENAI_API_KEY` for the
    /// credential, `UPIGUARD_MODEL`, `UPIGUARD_API_BASE_URL` and
    /// `UPIGUARD_REQUEST_TIMEOUT_SECS` for overrides.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        if let Ok(key) = env::var("OPENAI_API_KEY") {
            builder = builder.with_api_key(key);
        }
        if let Ok(model) = env::var("UPIGUARD_MODEL") {
            builder = builder.with_model(model);
        }
        if let Ok(base_url) = env::var("UPIGUARD_API_BASE_URL") {
            builder = builder.with_base_url(base_url);
        }
        if let Ok(secs) = env::var("UPIGUARD_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                UpiguardError::Configuration(format!(
                    "UPIGUARD_REQUEST_TIMEOUT_SECS must be an integer, got '{secs}'"
                ))
            })?;
            builder = builder.with_timeout(Duration::from_secs(secs));
        }
        if let Ok(policy) = env::var("UPIGUARD_VALIDATION_POLICY") {
            let policy = match policy.to_lowercase().as_str() {
                "relaxed" => ValidationPolicy::Relaxed,
                "strict" => ValidationPolicy::Strict,
                other => {
                    return Err(UpiguardError::Configuration(format!(
                        "UPIGUARD_VALIDATION_POLICY must be 'relaxed' or 'strict', got '{other}'"
                    )));
                }
            };
            builder = builder.with_validation_policy(policy);
        }

        builder.build()
    }

    /// Whether a non-empty provider credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        self.validation_policy
    }
}

/// Builder for [`ClassifierConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClassifierConfigBuilder {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    validation_policy: ValidationPolicy,
}

impl ClassifierConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider credential. An empty string counts as absent.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = if api_key.is_empty() {
            None
        } else {
            Some(api_key)
        };
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_validation_policy(mut self, policy: ValidationPolicy) -> Self {
        self.validation_policy = policy;
        self
    }

    pub fn build(self) -> Result<ClassifierConfig> {
        let model = self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        if model.is_empty() {
            return Err(UpiguardError::Configuration(
                "model name must not be empty".to_string(),
            ));
        }

        let base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.is_empty() {
            return Err(UpiguardError::Configuration(
                "API base URL must not be empty".to_string(),
            ));
        }

        Ok(ClassifierConfig {
            api_key: self.api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            validation_policy: self.validation_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_credential() {
        let config = ClassifierConfig::builder().build().unwrap();
        assert!(!config.has_credential());
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.validation_policy(), ValidationPolicy::Relaxed);
    }

    #[test]
    fn empty_api_key_counts_as_absent() {
        let config = ClassifierConfig::builder().with_api_key("").build().unwrap();
        assert!(!config.has_credential());

        let config = ClassifierConfig::builder()
            .with_api_key("sk-test")
            .build()
            .unwrap();
        assert!(config.has_credential());
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let config = ClassifierConfig::builder()
            .with_base_url("http://localhost:8080/v1/")
            .build()
            .unwrap();
        assert_eq!(config.base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn empty_model_is_rejected() {
        let err = ClassifierConfig::builder().with_model("").build().unwrap_err();
        assert!(matches!(err, UpiguardError::Configuration(_)));
    }
}
