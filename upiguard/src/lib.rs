//! # Upiguard
//!
//! Safety classification for UPI payment handles (`name@provider`), warning
//! users before they send money to a likely-fraudulent address.
//!
//! The pipeline is: validate the raw input, then classify it through either a
//! deterministic heuristic (pattern matching, always available) or a
//! natural-language model provider (when a credential is configured). The
//! model path falls back to the heuristic on any provider failure, so a
//! classification request always produces a verdict.
//!
//! ## Quick Start
//!
//! ```rust
//! use upiguard::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // No credential configured: heuristic path only
//!     let config = ClassifierConfig::builder().build()?;
//!     let service = ClassificationService::new(config)?;
//!
//!     let verdict = service.check("ravi.kumar@paytm").await?;
//!     assert!(verdict.safe());
//!
//!     let verdict = service.check("fakeuser@bank").await?;
//!     assert!(!verdict.safe());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Validator**: structural well-formedness of the handle, with a strict
//!   regex shape and a relaxed boundary variant selected by policy.
//! - **Heuristic path**: ordered red-flag categories, no I/O, never fails.
//! - **Model path**: prompt a completion provider, parse a SAFE/SUSPICIOUS
//!   answer, absorb every provider error into a heuristic fallback.

pub mod config;
pub mod heuristic;
pub mod model;
pub mod models;
pub mod service;
pub mod validator;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ClassifierConfig, ClassifierConfigBuilder, ValidationPolicy};
    pub use crate::heuristic::HeuristicClassifier;
    pub use crate::model::{CompletionProvider, ModelClassifier, OpenAiProvider};
    pub use crate::models::{Identifier, Verdict, VerdictSource};
    pub use crate::service::ClassificationService;
    pub use crate::validator::ValidationError;
    pub use crate::{Result, UpiguardError};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for upiguard operations
#[derive(Debug, thiserror::Error)]
pub enum UpiguardError {
    /// Input failed structural validation
    #[error("Validation error: {0}")]
    Validation(#[from] crate::validator::ValidationError),

    /// Completion provider failure (transport, HTTP status, malformed body)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider answered with a first token that is neither SAFE nor SUSPICIOUS
    #[error("Ambiguous provider answer: '{0}'")]
    AmbiguousAnswer(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for upiguard operations
pub type Result<T, E = UpiguardError> = std::result::Result<T, E>;
