//! Two-step guess pipeline.
//!
//! The drawing is simplified, the model is asked for one word, and the
//! candidate is then put back to the model as a yes/no question. Each
//! step moves a [`GuessStage`] forward:
//!
//! ```text
//! Pending(candidate) --"yes"--> Verified(candidate)
//!                    --else---> Demoted
//! ```
//!
//! [`GuessPipeline::analyze`] never fails; errors collapse into a
//! [`GuessResult`] with `error` confidence.

use metrics::counter;
use tracing::Instrument;

use doodle_media::simplify_data_uri;
use doodle_models::{
    format_response, is_vocabulary_word, supplied_target, GuessResult, UNKNOWN_WORD,
};

use crate::error::AnalysisResult;
use crate::gemini::{GenerativeModel, InlineImage};
use crate::logging::AnalysisLogger;
use crate::prompt::{build_prompt, build_verification_prompt};

/// Where a guess stands between the two remote calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessStage {
    /// Initial candidate, not yet verified
    Pending(String),
    /// Model confirmed the candidate
    Verified(String),
    /// Candidate rejected or unrecognisable; resolves to `unknown`
    Demoted,
}

impl GuessStage {
    /// Word this stage resolves to.
    pub fn word(&self) -> &str {
        match self {
            GuessStage::Pending(word) | GuessStage::Verified(word) => word,
            GuessStage::Demoted => UNKNOWN_WORD,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, GuessStage::Pending(_))
    }

    fn outcome(&self) -> &'static str {
        match self {
            GuessStage::Pending(_) => "pending",
            GuessStage::Verified(_) => "verified",
            GuessStage::Demoted => "demoted",
        }
    }
}

/// Reduce a raw model answer to a single vocabulary word.
///
/// Lowercases, drops everything outside `a-z`, and falls back to
/// `unknown` when the remainder is not a vocabulary word.
pub fn normalize_candidate(raw: &str) -> String {
    let word: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();

    if is_vocabulary_word(&word) {
        word
    } else {
        UNKNOWN_WORD.to_string()
    }
}

/// Only a bare "yes" (any case, surrounding whitespace ignored) confirms.
pub fn is_confirmation(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("yes")
}

/// Drawing guess pipeline over a generative model.
pub struct GuessPipeline<M> {
    model: M,
}

impl<M: GenerativeModel> GuessPipeline<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Analyze a data-URI drawing, optionally hinting the target word.
    ///
    /// Always returns a result; on any failure the guess is the target
    /// word (or `unknown`) with `error` confidence. A blank target counts
    /// as no target.
    pub async fn analyze(&self, image: &str, target: Option<&str>) -> GuessResult {
        let target = supplied_target(target);
        let logger = AnalysisLogger::new(target);
        let span = logger.create_span();

        async {
            match self.run(&logger, image, target).await {
                Ok(result) => result,
                Err(e) => {
                    logger.log_failure(&e);
                    counter!("doodle_guess_total", "outcome" => "error", "error" => e.kind())
                        .increment(1);
                    GuessResult::failure(target)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Like [`analyze`](Self::analyze) but surfaces the error.
    pub async fn try_analyze(
        &self,
        image: &str,
        target: Option<&str>,
    ) -> AnalysisResult<GuessResult> {
        let target = supplied_target(target);
        let logger = AnalysisLogger::new(target);
        let span = logger.create_span();
        self.run(&logger, image, target).instrument(span).await
    }

    async fn run(
        &self,
        logger: &AnalysisLogger,
        image: &str,
        target: Option<&str>,
    ) -> AnalysisResult<GuessResult> {
        logger.log_start(image.len());

        let processed = simplify_data_uri(image)?;
        let inline = InlineImage::from(&processed);
        let prompt = build_prompt(target);

        let stage = self.initial_guess(logger, &prompt, &inline).await?;
        let stage = self.verify(logger, stage, &inline, target).await?;
        counter!("doodle_guess_total", "outcome" => stage.outcome()).increment(1);

        let result = format_response(stage.word(), target, None);
        logger.log_result(&result, stage.outcome());

        Ok(result)
    }

    /// First remote call: ask for a single word.
    async fn initial_guess(
        &self,
        logger: &AnalysisLogger,
        prompt: &str,
        image: &InlineImage,
    ) -> AnalysisResult<GuessStage> {
        let raw = self.model.generate(prompt, image).await?;
        let candidate = normalize_candidate(&raw);
        logger.log_candidate(&raw, &candidate);

        Ok(GuessStage::Pending(candidate))
    }

    /// Second remote call: confirm or demote a pending candidate.
    ///
    /// Settled stages pass through untouched, and an `unknown` candidate
    /// is demoted without calling the model.
    async fn verify(
        &self,
        logger: &AnalysisLogger,
        stage: GuessStage,
        image: &InlineImage,
        target: Option<&str>,
    ) -> AnalysisResult<GuessStage> {
        let candidate = match stage {
            GuessStage::Pending(candidate) => candidate,
            settled => return Ok(settled),
        };

        if candidate == UNKNOWN_WORD {
            logger.log_verification(&candidate, None, false);
            return Ok(GuessStage::Demoted);
        }

        let prompt = build_verification_prompt(&candidate, target);
        let answer = self.model.generate(&prompt, image).await?;
        let confirmed = is_confirmation(&answer);
        logger.log_verification(&candidate, Some(&answer), confirmed);

        if confirmed {
            Ok(GuessStage::Verified(candidate))
        } else {
            Ok(GuessStage::Demoted)
        }
    }
}
