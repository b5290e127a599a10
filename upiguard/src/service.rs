//! Classification orchestration.
//!
//! One service instance is constructed at startup from an immutable
//! [`ClassifierConfig`] and shared across requests; it holds no mutable
//! state, so arbitrary concurrent `check` calls need no synchronization.

use tracing::info;

use crate::config::ClassifierConfig;
use crate::heuristic::HeuristicClassifier;
use crate::model::{CompletionProvider, ModelClassifier};
use crate::models::{Verdict, VerdictSource};
use crate::validator::{self, ValidationError};
use crate::Result;

/// Health label for the model path.
pub const MODE_MODEL: &str = "OpenAI API";
/// Health label for the heuristic-only path.
pub const MODE_HEURISTIC: &str = "Mock Classification";

/// Orchestrator over the validator and the two classification paths.
#[derive(Debug)]
pub struct ClassificationService {
    config: ClassifierConfig,
    heuristic: HeuristicClassifier,
    model: Option<ModelClassifier>,
}

impl ClassificationService {
    /// Build the service. The model path is constructed when a provider
    /// credential is configured, otherwise only the heuristic path exists.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        let model = if config.has_credential() {
            Some(ModelClassifier::from_config(&config)?)
        } else {
            None
        };

        Ok(Self {
            config,
            heuristic: HeuristicClassifier::new(),
            model,
        })
    }

    /// Build the service around a custom completion provider, regardless of
    /// configured credentials.
    pub fn with_provider(config: ClassifierConfig, provider: Box<dyn CompletionProvider>) -> Self {
        Self {
            config,
            heuristic: HeuristicClassifier::new(),
            model: Some(ModelClassifier::new(provider)),
        }
    }

    /// Classify a raw handle string.
    ///
    /// The empty string is an error (the caller has nothing to show a
    /// verdict for); a malformed handle under the configured validation
    /// policy is a *result*, an unsafe verdict explaining the format
    /// problem. A valid
    /// handle is routed to the model path when available, else the
    /// heuristic path. This call never fails past validation: the model
    /// path absorbs all provider errors internally.
    pub async fn check(&self, raw: &str) -> Result<Verdict> {
        let id = match validator::validate_with_policy(raw, self.config.validation_policy()) {
            Ok(id) => id,
            Err(ValidationError::EmptyInput) => {
                return Err(ValidationError::EmptyInput.into());
            }
            Err(err @ ValidationError::MalformedFormat) => {
                return Ok(Verdict::new(false, err.to_string(), VerdictSource::Rejection));
            }
        };

        let verdict = match &self.model {
            Some(model) => {
                info!(handle = %id, "classifying UPI ID with model provider");
                model.classify(&id).await
            }
            None => {
                info!(handle = %id, "classifying UPI ID with heuristic");
                self.heuristic.classify(&id)
            }
        };

        info!(
            handle = %id,
            safe = verdict.safe(),
            source = ?verdict.source(),
            "classification result"
        );
        Ok(verdict)
    }

    /// Which classification path is active, as reported by `/health`.
    pub fn mode(&self) -> &'static str {
        if self.model.is_some() {
            MODE_MODEL
        } else {
            MODE_HEURISTIC
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MockCompletionProvider;
    use crate::validator::ValidationPolicy;
    use crate::UpiguardError;

    fn heuristic_service() -> ClassificationService {
        ClassificationService::new(ClassifierConfig::builder().build().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn without_credential_mode_is_heuristic() {
        let service = heuristic_service();
        assert_eq!(service.mode(), MODE_HEURISTIC);
    }

    #[tokio::test]
    async fn with_provider_mode_is_model() {
        let service = ClassificationService::with_provider(
            ClassifierConfig::builder().build().unwrap(),
            Box::new(MockCompletionProvider::new()),
        );
        assert_eq!(service.mode(), MODE_MODEL);
    }

    #[tokio::test]
    async fn empty_input_is_an_error() {
        let err = heuristic_service().check("").await.unwrap_err();
        assert!(matches!(
            err,
            UpiguardError::Validation(ValidationError::EmptyInput)
        ));
    }

    #[tokio::test]
    async fn whitespace_only_input_is_a_rejection_verdict() {
        let verdict = heuristic_service().check("  ").await.unwrap();
        assert!(!verdict.safe());
        assert_eq!(verdict.source(), VerdictSource::Rejection);
    }

    #[tokio::test]
    async fn malformed_handle_is_a_rejection_verdict() {
        let verdict = heuristic_service().check("abc").await.unwrap();
        assert!(!verdict.safe());
        assert_eq!(verdict.source(), VerdictSource::Rejection);
        assert!(verdict.message().contains("format"));
    }

    #[tokio::test]
    async fn short_handle_is_rejected_even_with_at() {
        let verdict = heuristic_service().check("a@b").await.unwrap();
        assert!(!verdict.safe());
        assert_eq!(verdict.source(), VerdictSource::Rejection);
    }

    #[tokio::test]
    async fn valid_handle_routes_to_heuristic_without_credential() {
        let verdict = heuristic_service().check("ravi.kumar@paytm").await.unwrap();
        assert!(verdict.safe());
        assert_eq!(verdict.source(), VerdictSource::Heuristic);
    }

    #[tokio::test]
    async fn strict_policy_rejects_loose_shapes() {
        let config = ClassifierConfig::builder()
            .with_validation_policy(ValidationPolicy::Strict)
            .build()
            .unwrap();
        let service = ClassificationService::new(config).unwrap();

        let verdict = service.check("user@@bank").await.unwrap();
        assert_eq!(verdict.source(), VerdictSource::Rejection);

        let verdict = service.check("user@bank").await.unwrap();
        assert_eq!(verdict.source(), VerdictSource::Heuristic);
    }

    #[tokio::test]
    async fn model_path_answers_when_provider_succeeds() {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_complete()
            .returning(|_| Ok("SAFE\nNormal handle.".to_string()));

        let service = ClassificationService::with_provider(
            ClassifierConfig::builder().build().unwrap(),
            Box::new(provider),
        );
        let verdict = service.check("ravi.kumar@paytm").await.unwrap();
        assert!(verdict.safe());
        assert_eq!(verdict.source(), VerdictSource::Model);
    }

    #[tokio::test]
    async fn provider_failure_still_returns_a_verdict() {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_complete()
            .returning(|_| Err(UpiguardError::Provider("boom".to_string())));

        let service = ClassificationService::with_provider(
            ClassifierConfig::builder().build().unwrap(),
            Box::new(provider),
        );
        let verdict = service.check("scammer@bank").await.unwrap();
        assert!(!verdict.safe());
        assert_eq!(verdict.source(), VerdictSource::Heuristic);
    }
}
