//! Core domain types for handle classification.

use serde::{Deserialize, Serialize};

/// Maximum length of a verdict explanation, in characters. Model-produced
/// text is truncated to this bound; heuristic templates are well under it.
pub const MAX_MESSAGE_CHARS: usize = 280;

/// A validated UPI payment handle of the form `local-part@provider-label`.
///
/// Construction goes through [`crate::validator`], so an `Identifier` always
/// holds a non-empty trimmed string containing at least one `@`. Whether the
/// full strict shape was enforced depends on the validation policy that was
/// applied. Identifiers are immutable and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier(String);

impl Identifier {
    /// Wrap an already-validated handle string.
    pub(crate) fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    /// The full handle string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the final `@`.
    pub fn local_part(&self) -> &str {
        match self.0.rfind('@') {
            Some(at) => &self.0[..at],
            None => &self.0,
        }
    }

    /// The provider label after the final `@`.
    pub fn provider(&self) -> &str {
        match self.0.rfind('@') {
            Some(at) => &self.0[at + 1..],
            None => "",
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which part of the pipeline produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictSource {
    /// Deterministic pattern-based classification
    Heuristic,
    /// Natural-language model provider
    Model,
    /// Input rejected before classification
    Rejection,
}

/// The outcome of one classification call: a safety flag and a short
/// human-readable explanation. The explanation is advisory text only and is
/// never used for control flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    safe: bool,
    message: String,
    source: VerdictSource,
}

impl Verdict {
    /// Create a verdict, truncating the message to [`MAX_MESSAGE_CHARS`].
    pub fn new(safe: bool, message: impl Into<String>, source: VerdictSource) -> Self {
        let mut message: String = message.into();
        if message.chars().count() > MAX_MESSAGE_CHARS {
            message = message.chars().take(MAX_MESSAGE_CHARS).collect();
        }
        Self {
            safe,
            message,
            source,
        }
    }

    /// Whether the handle was judged safe.
    pub fn safe(&self) -> bool {
        self.safe
    }

    /// The advisory explanation text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Which pipeline path produced this verdict.
    pub fn source(&self) -> VerdictSource {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_splits_on_final_at() {
        let id = Identifier::new_unchecked("ravi.kumar@paytm".to_string());
        assert_eq!(id.local_part(), "ravi.kumar");
        assert_eq!(id.provider(), "paytm");
    }

    #[test]
    fn verdict_message_is_bounded() {
        let long = "x".repeat(MAX_MESSAGE_CHARS * 2);
        let verdict = Verdict::new(true, long, VerdictSource::Model);
        assert_eq!(verdict.message().chars().count(), MAX_MESSAGE_CHARS);
    }

    #[test]
    fn verdict_serializes_flat_fields() {
        let verdict = Verdict::new(true, "ok", VerdictSource::Model);
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["safe"], true);
        assert_eq!(json["message"], "ok");
        assert_eq!(json["source"], "model");
    }

    #[test]
    fn verdict_preserves_short_message() {
        let verdict = Verdict::new(false, "looks bad", VerdictSource::Heuristic);
        assert!(!verdict.safe());
        assert_eq!(verdict.message(), "looks bad");
        assert_eq!(verdict.source(), VerdictSource::Heuristic);
    }
}
