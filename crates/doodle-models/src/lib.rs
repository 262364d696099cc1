//! Shared data models for the doodle guessing helpers.
//!
//! This crate provides Serde-serializable types for:
//! - The fixed word-category vocabulary
//! - Guess results from the generative-model pipeline
//! - Ranked label results from the sketch classifier

pub mod category;
pub mod classifier;
pub mod guess;

// Re-export common types
pub use category::{
    all_words, category_of, is_vocabulary_word, similar_words, WordCategory, UNKNOWN_WORD,
    WORD_CATEGORIES,
};
pub use classifier::ClassifierResult;
pub use guess::{format_response, supplied_target, Confidence, GuessResult};
