//! Ranked label results from the sketch classifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Labels reported by the classifier, most likely first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResult {
    pub guesses: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ClassifierResult {
    /// Wrap ranked labels with the current time.
    pub fn new(guesses: Vec<String>) -> Self {
        Self {
            guesses,
            timestamp: Utc::now(),
        }
    }

    /// Most likely label, if the model returned any.
    pub fn top(&self) -> Option<&str> {
        self.guesses.first().map(String::as_str)
    }
}
