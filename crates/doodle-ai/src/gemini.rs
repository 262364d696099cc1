//! Gemini AI client for drawing analysis.
//!
//! Sends a text prompt plus the drawing as inline image data to the
//! `generateContent` endpoint and returns the raw response text.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use doodle_media::DataUri;

use crate::config::{GeminiConfig, GenerationSettings};
use crate::error::{AnalysisError, AnalysisResult};

/// Image attached to a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64 payload without the data-URI header
    pub data: String,
}

impl From<&DataUri> for InlineImage {
    fn from(uri: &DataUri) -> Self {
        Self {
            mime_type: uri.mime().to_string(),
            data: uri.payload().to_string(),
        }
    }
}

/// Text-generation model that can look at an image.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Send `prompt` with `image` and return the model's raw text answer.
    async fn generate(&self, prompt: &str, image: &InlineImage) -> AnalysisResult<String>;
}

/// Gemini API client.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

/// Gemini API request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
}

impl From<GenerationSettings> for GenerationConfig {
    fn from(settings: GenerationSettings) -> Self {
        Self {
            temperature: settings.temperature,
            top_p: settings.top_p,
            max_output_tokens: settings.max_output_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

/// Children's drawings trip the harassment and hate-speech filters on
/// harmless shapes.
const SAFETY_SETTINGS: [(&str, &str); 2] = [
    ("HARM_CATEGORY_HARASSMENT", "BLOCK_NONE"),
    ("HARM_CATEGORY_HATE_SPEECH", "BLOCK_NONE"),
];

/// Gemini API response.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(config: GeminiConfig) -> AnalysisResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AnalysisError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create a client from `GEMINI_*` environment variables.
    pub fn from_env() -> AnalysisResult<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn build_request(&self, prompt: &str, image: &InlineImage) -> GeminiRequest {
        GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::Text {
                        text: prompt.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.data.clone(),
                        },
                    },
                ],
            }],
            generation_config: self.config.generation.into(),
            safety_settings: SAFETY_SETTINGS
                .iter()
                .map(|&(category, threshold)| SafetySetting {
                    category,
                    threshold,
                })
                .collect(),
        }
    }

    /// Call Gemini API.
    async fn call_gemini_api(&self, prompt: &str, image: &InlineImage) -> AnalysisResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let request = self.build_request(prompt, image);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AnalysisError::remote_call(format!(
                    "Gemini API request failed: {}",
                    e.without_url()
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AnalysisError::remote_call(format!(
                "Gemini API returned {}: {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            AnalysisError::remote_call(format!(
                "Failed to parse Gemini response: {}",
                e.without_url()
            ))
        })?;

        let text = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .ok_or_else(|| AnalysisError::remote_call("No content in Gemini response"))?;

        debug!(model = %self.config.model, response = %text, "Gemini responded");

        Ok(text)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str, image: &InlineImage) -> AnalysisResult<String> {
        self.call_gemini_api(prompt, image).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let client = GeminiClient::new(GeminiConfig::new("key").unwrap()).unwrap();
        let image = InlineImage {
            mime_type: "image/png".to_string(),
            data: "AAAA".to_string(),
        };

        let json = serde_json::to_value(client.build_request("what is it?", &image)).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "what is it?");
        assert_eq!(
            json["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/png"
        );
        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["data"], "AAAA");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 3);
        assert!(json["generationConfig"]["topP"].is_number());
        assert_eq!(json["safetySettings"][0]["threshold"], "BLOCK_NONE");
        assert_eq!(
            json["safetySettings"][1]["category"],
            "HARM_CATEGORY_HATE_SPEECH"
        );
    }
}
