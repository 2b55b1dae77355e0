//! Replicate synthesis adapter

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::{SynthesisError, SynthesisReply, Synthesizer};
use crate::domain::generation::Lyrics;

/// Bark model version used for synthesis
const DEFAULT_MODEL_VERSION: &str =
    "b76242b40d67c76ab6742e987628a2a9ac019e11d56ab96c4e91ce03b79b2787";

/// Replicate API base URL
const API_BASE_URL: &str = "https://api.replicate.com/v1";

/// Per-call timeout
const CALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Output key carrying the audio reference
const AUDIO_KEY: &str = "audio_out";

/// Text sampling temperature
const TEXT_TEMP: f32 = 0.7;

/// Waveform sampling temperature
const WAVEFORM_TEMP: f32 = 0.7;

// Request types for the predictions API

#[derive(Debug, Serialize)]
struct PredictionRequest {
    version: String,
    input: SynthesisInput,
}

#[derive(Debug, Serialize)]
struct SynthesisInput {
    prompt: String,
    text_temp: f32,
    waveform_temp: f32,
    output_full: bool,
}

// Response types for the predictions API

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    output: Option<Value>,
    error: Option<String>,
}

/// Replicate synthesizer
pub struct ReplicateSynthesizer {
    api_token: String,
    model_version: String,
    base_url: String,
    client: reqwest::Client,
}

impl ReplicateSynthesizer {
    /// Create a new synthesizer with the given API token.
    ///
    /// The HTTP client is built once here with the per-call timeout and
    /// reused for every request.
    pub fn new(api_token: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(CALL_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_token: api_token.into(),
            model_version: DEFAULT_MODEL_VERSION.to_string(),
            base_url: API_BASE_URL.to_string(),
            client,
        }
    }

    /// Override the model version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = version.into();
        self
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the API URL
    fn api_url(&self) -> String {
        format!("{}/predictions", self.base_url)
    }

    /// Build the request body.
    ///
    /// Only the lyric line goes upstream; the service derives track length
    /// from the text itself.
    fn build_request(&self, lyrics: &Lyrics) -> PredictionRequest {
        PredictionRequest {
            version: self.model_version.clone(),
            input: SynthesisInput {
                prompt: lyrics.text().to_string(),
                text_temp: TEXT_TEMP,
                waveform_temp: WAVEFORM_TEMP,
                output_full: false,
            },
        }
    }

    /// Decode the duck-typed prediction output into a reply variant.
    fn decode_output(output: Option<Value>) -> SynthesisReply {
        let output = match output {
            Some(value) => value,
            None => return SynthesisReply::Empty,
        };

        if is_empty_value(&output) {
            return SynthesisReply::Empty;
        }

        match output {
            Value::Object(ref map) => match map.get(AUDIO_KEY) {
                Some(value) => SynthesisReply::Audio {
                    url: coerce_url(value),
                },
                None => SynthesisReply::Malformed {
                    raw: output.to_string(),
                },
            },
            other => SynthesisReply::Malformed {
                raw: other.to_string(),
            },
        }
    }
}

/// Absent, null, empty, zero, and false replies all count as "no output yet"
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Coerce the audio reference to its string representation
fn coerce_url(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Synthesizer for ReplicateSynthesizer {
    async fn synthesize(&self, lyrics: &Lyrics) -> Result<SynthesisReply, SynthesisError> {
        let url = self.api_url();
        let body = self.build_request(lyrics);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            // Hold the connection open until the prediction resolves
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::ReadTimeout(e.to_string())
                } else {
                    SynthesisError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();

        // Every status the service itself reports is its error class and
        // stays retryable; only transport and decoding failures are not.
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SynthesisError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // Parse response
        let prediction: PredictionResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::ParseError(e.to_string()))?;

        // Check for an error reported in the response body
        if let Some(error) = prediction.error {
            return Err(SynthesisError::ServiceError(error));
        }

        Ok(Self::decode_output(prediction.output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn build_request_has_fixed_synthesis_parameters() {
        let synthesizer = ReplicateSynthesizer::new("test-token");
        let request = synthesizer.build_request(&Lyrics::from_raw("la la la"));

        assert_eq!(request.version, DEFAULT_MODEL_VERSION);
        assert_eq!(request.input.prompt, "♪ la la la ♪");
        assert!((request.input.text_temp - 0.7).abs() < f32::EPSILON);
        assert!((request.input.waveform_temp - 0.7).abs() < f32::EPSILON);
        assert!(!request.input.output_full);
    }

    #[test]
    fn api_url_targets_predictions() {
        let synthesizer = ReplicateSynthesizer::new("test-token");
        assert_eq!(
            synthesizer.api_url(),
            "https://api.replicate.com/v1/predictions"
        );
    }

    #[test]
    fn custom_version_and_base_url() {
        let synthesizer = ReplicateSynthesizer::new("token")
            .with_version("deadbeef")
            .with_base_url("http://localhost:9999/");

        assert_eq!(synthesizer.api_url(), "http://localhost:9999/predictions");
        assert_eq!(synthesizer.model_version, "deadbeef");
    }

    #[test]
    fn decode_audio_reference() {
        let output = Some(json!({ "audio_out": "https://cdn/track.wav" }));
        assert_eq!(
            ReplicateSynthesizer::decode_output(output),
            SynthesisReply::Audio {
                url: "https://cdn/track.wav".to_string()
            }
        );
    }

    #[test]
    fn decode_coerces_non_string_reference() {
        let output = Some(json!({ "audio_out": 42 }));
        assert_eq!(
            ReplicateSynthesizer::decode_output(output),
            SynthesisReply::Audio {
                url: "42".to_string()
            }
        );
    }

    #[test]
    fn decode_missing_output_is_empty() {
        assert_eq!(
            ReplicateSynthesizer::decode_output(None),
            SynthesisReply::Empty
        );
        assert_eq!(
            ReplicateSynthesizer::decode_output(Some(Value::Null)),
            SynthesisReply::Empty
        );
    }

    #[test]
    fn decode_hollow_values_are_empty() {
        for value in [json!(""), json!([]), json!({}), json!(0), json!(false)] {
            assert_eq!(
                ReplicateSynthesizer::decode_output(Some(value.clone())),
                SynthesisReply::Empty,
                "expected {} to decode as empty",
                value
            );
        }
    }

    #[test]
    fn decode_mapping_without_audio_key_is_malformed() {
        let output = Some(json!({ "status": "done" }));
        match ReplicateSynthesizer::decode_output(output) {
            SynthesisReply::Malformed { raw } => assert!(raw.contains("status")),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn decode_non_mapping_is_malformed() {
        let output = Some(json!(["https://cdn/track.wav"]));
        assert!(matches!(
            ReplicateSynthesizer::decode_output(output),
            SynthesisReply::Malformed { .. }
        ));
    }
}
