//! Gemini client configuration.

use std::time::Duration;

use crate::error::{AnalysisError, AnalysisResult};

/// Default model for drawing analysis.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default Generative Language API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Sampling parameters for both remote calls.
///
/// Tuned so the model answers with effectively a single token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.05,
            top_p: 0.1,
            max_output_tokens: 3,
        }
    }
}

/// Gemini client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API credential, always supplied by the caller
    pub api_key: String,
    /// Model name, e.g. `gemini-1.5-flash`
    pub model: String,
    /// API base URL without trailing slash
    pub base_url: String,
    /// Overall HTTP timeout (none by default)
    pub request_timeout: Option<Duration>,
    pub generation: GenerationSettings,
}

impl GeminiConfig {
    /// Create a config with defaults around a validated API key.
    pub fn new(api_key: impl Into<String>) -> AnalysisResult<Self> {
        let api_key = api_key.into();
        validate_api_key(&api_key)?;

        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            generation: GenerationSettings::default(),
        })
    }

    /// Create config from environment variables.
    ///
    /// `GEMINI_API_KEY` is required; there is no fallback credential.
    pub fn from_env() -> AnalysisResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| AnalysisError::config("GEMINI_API_KEY not set"))?;

        let mut config = Self::new(api_key)?;

        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config = config.with_model(model);
        }
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        if let Ok(secs) = std::env::var("GEMINI_TIMEOUT_SECS") {
            config = config.with_timeout(parse_timeout_secs(&secs)?);
        }

        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("generation", &self.generation)
            .finish()
    }
}

fn parse_timeout_secs(value: &str) -> AnalysisResult<Duration> {
    value.trim().parse().map(Duration::from_secs).map_err(|_| {
        AnalysisError::config(format!(
            "GEMINI_TIMEOUT_SECS must be a whole number of seconds, got '{value}'"
        ))
    })
}

fn validate_api_key(api_key: &str) -> AnalysisResult<()> {
    if api_key.trim().is_empty() {
        return Err(AnalysisError::config("Gemini API key is empty"));
    }
    if api_key.chars().any(char::is_whitespace) {
        return Err(AnalysisError::config("Gemini API key contains whitespace"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_missing_or_malformed_key() {
        assert!(GeminiConfig::new("").is_err());
        assert!(GeminiConfig::new("   ").is_err());
        assert!(GeminiConfig::new("abc def").is_err());
        assert!(GeminiConfig::new("abc-def").is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = GeminiConfig::new("key").unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.request_timeout.is_none());
        assert_eq!(config.generation.max_output_tokens, 3);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GeminiConfig::new("super-secret").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_timeout_secs_parsing() {
        assert_eq!(parse_timeout_secs("30").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_timeout_secs(" 5 ").unwrap(), Duration::from_secs(5));

        for bad in ["", "abc", "1.5", "-3"] {
            let err = parse_timeout_secs(bad).unwrap_err();
            assert_eq!(err.kind(), "config", "value {bad:?}");
        }
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = GeminiConfig::new("key")
            .unwrap()
            .with_base_url("http://localhost:9000/");
        assert_eq!(config.base_url, "http://localhost:9000");
    }
}
