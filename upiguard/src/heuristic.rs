//! Deterministic pattern-based handle classification.
//!
//! This is the fallback of last resort: no I/O, terminates in O(len), and
//! never fails. Red-flag categories are evaluated in a fixed order and the
//! first match decides both the verdict and the explanation.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{Identifier, Verdict, VerdictSource};

/// Lexical blacklist checked case-insensitively as substrings.
const BLACKLIST_TERMS: &[&str] = &["fake", "scam", "fraud", "test123", "admin", "system"];

/// Minimum digit-run length considered suspicious.
const DIGIT_RUN_LEN: usize = 10;

/// Minimum consecutive repeats of one character considered suspicious.
const REPEAT_RUN_LEN: usize = 5;

lazy_static! {
    static ref DIGIT_RUN_REGEX: Regex = Regex::new(r"[0-9]{10,}").unwrap();
}

const SAFE_MESSAGE: &str =
    "UPI ID appears to follow standard naming conventions and looks safe.";

/// Pattern-matching classifier over a fixed set of red-flag categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a handle. Categories are checked in priority order: lexical
    /// blacklist, long digit run, repeated-character run. Any match makes the
    /// verdict unsafe; the first match supplies the explanation.
    pub fn classify(&self, id: &Identifier) -> Verdict {
        if let Some(term) = self.find_blacklist_term(id.as_str()) {
            return Verdict::new(
                false,
                format!(
                    "UPI ID contains the blacklisted term '{term}', \
                     which often indicates fraudulent activity."
                ),
                VerdictSource::Heuristic,
            );
        }

        if DIGIT_RUN_REGEX.is_match(id.as_str()) {
            return Verdict::new(
                false,
                format!(
                    "UPI ID contains a run of {DIGIT_RUN_LEN} or more consecutive digits, \
                     a common mark of auto-generated fraud handles."
                ),
                VerdictSource::Heuristic,
            );
        }

        if let Some(ch) = find_repeat_run(id.as_str(), REPEAT_RUN_LEN) {
            return Verdict::new(
                false,
                format!(
                    "UPI ID repeats the character '{ch}' {REPEAT_RUN_LEN} or more times \
                     in a row, which rarely appears in legitimate handles."
                ),
                VerdictSource::Heuristic,
            );
        }

        Verdict::new(true, SAFE_MESSAGE, VerdictSource::Heuristic)
    }

    fn find_blacklist_term(&self, handle: &str) -> Option<&'static str> {
        let lowered = handle.to_lowercase();
        BLACKLIST_TERMS
            .iter()
            .copied()
            .find(|term| lowered.contains(term))
    }
}

/// Return the character of the first run of `min_len` identical consecutive
/// characters, if any. Written as a linear scan; the regex engine used here
/// has no backreferences.
fn find_repeat_run(handle: &str, min_len: usize) -> Option<char> {
    let mut run_char = None;
    let mut run_len = 0;
    for ch in handle.chars() {
        if Some(ch) == run_char {
            run_len += 1;
        } else {
            run_char = Some(ch);
            run_len = 1;
        }
        if run_len >= min_len {
            return run_char;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator;

    fn id(raw: &str) -> Identifier {
        validator::validate_relaxed(raw).unwrap()
    }

    #[test]
    fn clean_handle_is_safe() {
        let verdict = HeuristicClassifier::new().classify(&id("ravi.kumar@paytm"));
        assert!(verdict.safe());
        assert_eq!(verdict.message(), SAFE_MESSAGE);
        assert_eq!(verdict.source(), VerdictSource::Heuristic);
    }

    #[test]
    fn blacklist_terms_are_unsafe_case_insensitively() {
        let classifier = HeuristicClassifier::new();
        for raw in [
            "fakeuser@bank",
            "ScamArtist@upi",
            "FRAUD.dept@okicici",
            "test123@bank",
            "admin@bank",
            "system@bank",
        ] {
            let verdict = classifier.classify(&id(raw));
            assert!(!verdict.safe(), "expected unsafe for {raw:?}");
        }
    }

    #[test]
    fn long_digit_run_is_unsafe() {
        let verdict = HeuristicClassifier::new().classify(&id("12345678901@bank"));
        assert!(!verdict.safe());
        assert!(verdict.message().contains("consecutive digits"));
    }

    #[test]
    fn nine_digits_is_not_a_digit_run() {
        let verdict = HeuristicClassifier::new().classify(&id("123456789@bank"));
        assert!(verdict.safe());
    }

    #[test]
    fn repeated_character_run_is_unsafe() {
        let verdict = HeuristicClassifier::new().classify(&id("aaaaa@bank"));
        assert!(!verdict.safe());
        assert!(verdict.message().contains('\''));
    }

    #[test]
    fn four_repeats_is_not_a_run() {
        let verdict = HeuristicClassifier::new().classify(&id("aaaa.b@bank"));
        assert!(verdict.safe());
    }

    #[test]
    fn blacklist_takes_priority_over_other_categories() {
        // Matches both the blacklist and the digit-run category
        let verdict = HeuristicClassifier::new().classify(&id("fake12345678901@bank"));
        assert!(!verdict.safe());
        assert!(verdict.message().contains("blacklisted term"));
    }

    #[test]
    fn classification_is_deterministic() {
        let classifier = HeuristicClassifier::new();
        let handle = id("someone123@okhdfcbank");
        let first = classifier.classify(&handle);
        for _ in 0..10 {
            assert_eq!(classifier.classify(&handle), first);
        }
    }
}
