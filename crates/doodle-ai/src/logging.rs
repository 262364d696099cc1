//! Structured logging for guess analyses.
//!
//! Every analysis gets a request id so both remote calls and the final
//! outcome can be correlated in the logs.

use tracing::{debug, error, info, warn, Span};
use uuid::Uuid;

use doodle_models::{GuessResult, UNKNOWN_WORD};

use crate::error::AnalysisError;

/// Logger for one guess analysis: request id plus the target word, if any.
#[derive(Debug, Clone)]
pub struct AnalysisLogger {
    request_id: String,
    target: Option<String>,
}

impl AnalysisLogger {
    pub fn new(target: Option<&str>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            target: target.map(str::to_string),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn log_start(&self, payload_len: usize) {
        info!(
            request_id = %self.request_id,
            target = self.target_field(),
            payload_len,
            "Guess analysis started"
        );
    }

    /// Initial answer from the model and the word it normalised to.
    pub fn log_candidate(&self, raw: &str, candidate: &str) {
        debug!(request_id = %self.request_id, raw = %raw.trim(), "Initial answer received");

        if candidate == UNKNOWN_WORD && !raw.trim().eq_ignore_ascii_case(UNKNOWN_WORD) {
            warn!(
                request_id = %self.request_id,
                raw = %raw.trim(),
                "Initial answer outside the vocabulary"
            );
        } else {
            info!(request_id = %self.request_id, candidate, "Initial guess");
        }
    }

    /// Verification answer for `candidate`; `None` when the call was skipped.
    pub fn log_verification(&self, candidate: &str, answer: Option<&str>, confirmed: bool) {
        match answer {
            Some(answer) => info!(
                request_id = %self.request_id,
                candidate,
                answer = %answer.trim(),
                confirmed,
                "Verification answered"
            ),
            None => debug!(
                request_id = %self.request_id,
                candidate,
                "Verification skipped"
            ),
        }
    }

    pub fn log_result(&self, result: &GuessResult, outcome: &str) {
        info!(
            request_id = %self.request_id,
            guess = %result.guess,
            confidence = %result.confidence,
            is_correct = result.is_correct,
            outcome,
            "Guess analysis completed"
        );
    }

    pub fn log_failure(&self, err: &AnalysisError) {
        error!(
            request_id = %self.request_id,
            target = self.target_field(),
            kind = err.kind(),
            error = %err,
            "Guess analysis failed"
        );
    }

    /// Span wrapping both remote calls of this analysis.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "guess",
            request_id = %self.request_id,
            target = self.target_field()
        )
    }

    fn target_field(&self) -> &str {
        self.target.as_deref().unwrap_or("<none>")
    }
}
