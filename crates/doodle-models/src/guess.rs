//! Guess results from the generative-model pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::UNKNOWN_WORD;

/// How sure the pipeline is about a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
    /// The pipeline failed and the guess is a fallback value.
    Error,
}

impl Confidence {
    /// Get string representation of the confidence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
            Confidence::Error => "error",
        }
    }

    /// Infer confidence from the final guess and the optional target word.
    pub fn infer(guess: &str, target: Option<&str>) -> Self {
        match target {
            Some(target) if guess == target => Confidence::High,
            Some(_) if guess != UNKNOWN_WORD => Confidence::Medium,
            _ => Confidence::Low,
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one drawing analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResult {
    /// Guessed word
    pub guess: String,
    /// Confidence level
    pub confidence: Confidence,
    /// Whether the guess equals the target word
    pub is_correct: bool,
    /// When the result was produced
    pub timestamp: DateTime<Utc>,
}

impl GuessResult {
    /// Degraded result for a failed analysis.
    ///
    /// Echoes the target word (or `unknown`) with `error` confidence.
    pub fn failure(target: Option<&str>) -> Self {
        format_response(
            supplied_target(target).unwrap_or(UNKNOWN_WORD),
            None,
            Some(Confidence::Error),
        )
    }

    /// Check if this result came from the failure path.
    pub fn is_failure(&self) -> bool {
        self.confidence == Confidence::Error
    }
}

/// A blank or whitespace-only target counts as no target.
pub fn supplied_target(target: Option<&str>) -> Option<&str> {
    target.filter(|t| !t.trim().is_empty())
}

/// Build a [`GuessResult`] stamped with the current time.
///
/// When `confidence` is `None` it is inferred with [`Confidence::infer`].
pub fn format_response(
    guess: &str,
    target: Option<&str>,
    confidence: Option<Confidence>,
) -> GuessResult {
    let confidence = confidence.unwrap_or_else(|| Confidence::infer(guess, target));

    GuessResult {
        guess: guess.to_string(),
        confidence,
        is_correct: target == Some(guess),
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_inference() {
        assert_eq!(Confidence::infer("sun", Some("sun")), Confidence::High);
        assert_eq!(Confidence::infer("moon", Some("sun")), Confidence::Medium);
        assert_eq!(Confidence::infer("unknown", Some("sun")), Confidence::Low);
        assert_eq!(Confidence::infer("moon", None), Confidence::Low);
    }

    #[test]
    fn test_format_response_correctness() {
        let result = format_response("sun", Some("sun"), None);
        assert!(result.is_correct);
        assert_eq!(result.confidence, Confidence::High);

        let result = format_response("sun", None, None);
        assert!(!result.is_correct);
        assert_eq!(result.confidence, Confidence::Low);
    }

    #[test]
    fn test_explicit_confidence_wins() {
        let result = format_response("sun", Some("sun"), Some(Confidence::Low));
        assert_eq!(result.confidence, Confidence::Low);
        assert!(result.is_correct);
    }

    #[test]
    fn test_failure_result() {
        let result = GuessResult::failure(Some("cat"));
        assert_eq!(result.guess, "cat");
        assert_eq!(result.confidence, Confidence::Error);
        assert!(!result.is_correct);
        assert!(result.is_failure());

        assert_eq!(GuessResult::failure(None).guess, "unknown");
    }

    #[test]
    fn test_blank_target_is_no_target() {
        assert_eq!(supplied_target(Some("sun")), Some("sun"));
        assert_eq!(supplied_target(Some("")), None);
        assert_eq!(supplied_target(Some("  \t")), None);
        assert_eq!(supplied_target(None), None);

        let result = GuessResult::failure(Some(""));
        assert_eq!(result.guess, "unknown");
        assert!(!result.is_correct);
    }

    #[test]
    fn test_serialized_shape() {
        let result = format_response("sun", Some("sun"), None);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["guess"], "sun");
        assert_eq!(json["confidence"], "high");
        assert_eq!(json["isCorrect"], true);
        assert!(json["timestamp"].is_string());
    }
}
