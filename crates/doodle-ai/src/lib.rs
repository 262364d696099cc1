//! Generative-model drawing guesses.
//!
//! This crate provides:
//! - A Gemini `generateContent` client with inline image parts
//! - Prompt construction from the fixed word vocabulary
//! - The two-step guess/verify pipeline with a never-failing entry point
//! - Environment-driven configuration and structured analysis logging

pub mod config;
pub mod error;
pub mod gemini;
pub mod logging;
pub mod pipeline;
pub mod prompt;

pub use config::{GeminiConfig, GenerationSettings};
pub use error::{AnalysisError, AnalysisResult};
pub use gemini::{GeminiClient, GenerativeModel, InlineImage};
pub use logging::AnalysisLogger;
pub use pipeline::{is_confirmation, normalize_candidate, GuessPipeline, GuessStage};
pub use prompt::{build_prompt, build_verification_prompt};
