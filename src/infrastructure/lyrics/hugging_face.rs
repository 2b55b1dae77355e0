//! Hugging Face Inference API lyricist adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{Lyricist, LyricsError};
use crate::domain::generation::{Lyrics, Prompt};

/// Text-generation model used for lyrics
const DEFAULT_MODEL: &str = "EleutherAI/gpt-neo-1.3B";

/// Inference API base URL
const API_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Upper bound on generated tokens per completion
const MAX_NEW_TOKENS: u32 = 50;

/// Sampling temperature
const TEMPERATURE: f32 = 0.7;

// Request types for the Inference API

#[derive(Debug, Serialize)]
struct TextGenerationRequest {
    inputs: String,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    do_sample: bool,
}

// Response types for the Inference API

#[derive(Debug, Deserialize)]
struct GeneratedCandidate {
    generated_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
}

/// Hugging Face Inference API lyricist
pub struct HuggingFaceLyricist {
    api_token: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl HuggingFaceLyricist {
    /// Create a new lyricist with the given API token.
    ///
    /// The HTTP client is built once here and reused for every request.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the model id
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the API URL
    fn api_url(&self) -> String {
        format!("{}/{}", self.base_url, self.model)
    }

    /// Build the request body
    fn build_request(&self, prompt: &Prompt) -> TextGenerationRequest {
        TextGenerationRequest {
            inputs: prompt.text().to_string(),
            parameters: GenerationParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
                do_sample: true,
            },
        }
    }

    /// Take the first candidate's generated text
    fn extract_text(candidates: &[GeneratedCandidate]) -> Option<&str> {
        candidates.first()?.generated_text.as_deref()
    }
}

#[async_trait]
impl Lyricist for HuggingFaceLyricist {
    async fn write_lyrics(&self, prompt: &Prompt) -> Result<Lyrics, LyricsError> {
        let url = self.api_url();
        let body = self.build_request(prompt);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| LyricsError::RequestFailed(e.to_string()))?;

        let status = response.status();

        // Handle HTTP errors
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(LyricsError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LyricsError::RateLimited);
        }

        if !status.is_success() {
            // The API reports failures as {"error": "..."} where it can
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ApiError>(&error_text)
                .map(|e| e.error)
                .unwrap_or(error_text);
            return Err(LyricsError::ApiError(format!("HTTP {}: {}", status, message)));
        }

        // Parse response
        let candidates: Vec<GeneratedCandidate> = response
            .json()
            .await
            .map_err(|e| LyricsError::ParseError(e.to_string()))?;

        let text = Self::extract_text(&candidates).ok_or(LyricsError::EmptyResponse)?;

        Ok(Lyrics::from_raw(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_request_has_fixed_sampling_parameters() {
        let lyricist = HuggingFaceLyricist::new("test-token");
        let request = lyricist.build_request(&Prompt::new("a song about rain"));

        assert_eq!(request.inputs, "a song about rain");
        assert_eq!(request.parameters.max_new_tokens, 50);
        assert!((request.parameters.temperature - 0.7).abs() < f32::EPSILON);
        assert!(request.parameters.do_sample);
    }

    #[test]
    fn api_url_contains_model() {
        let lyricist = HuggingFaceLyricist::new("test-token");
        let url = lyricist.api_url();

        assert!(url.contains("EleutherAI/gpt-neo-1.3B"));
        assert!(url.starts_with("https://api-inference.huggingface.co/models"));
    }

    #[test]
    fn custom_model_and_base_url() {
        let lyricist = HuggingFaceLyricist::new("token")
            .with_model("custom/model")
            .with_base_url("http://localhost:9999/");

        assert_eq!(lyricist.api_url(), "http://localhost:9999/custom/model");
    }

    #[test]
    fn extract_text_takes_first_candidate() {
        let candidates = vec![
            GeneratedCandidate {
                generated_text: Some("first".to_string()),
            },
            GeneratedCandidate {
                generated_text: Some("second".to_string()),
            },
        ];

        assert_eq!(HuggingFaceLyricist::extract_text(&candidates), Some("first"));
    }

    #[test]
    fn extract_text_empty_candidates() {
        assert_eq!(HuggingFaceLyricist::extract_text(&[]), None);
    }

    #[test]
    fn extract_text_missing_field() {
        let candidates = vec![GeneratedCandidate {
            generated_text: None,
        }];

        assert_eq!(HuggingFaceLyricist::extract_text(&candidates), None);
    }
}
