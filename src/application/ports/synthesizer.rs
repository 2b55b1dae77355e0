//! Audio synthesis port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::generation::Lyrics;

/// Audio synthesis errors
#[derive(Debug, Clone, Error)]
pub enum SynthesisError {
    /// The service reported a failure; the retry loop may try again.
    #[error("Audio service error: {0}")]
    ServiceError(String),

    /// The call timed out waiting for a reply; the retry loop may try again.
    #[error("Audio service read timeout: {0}")]
    ReadTimeout(String),

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),
}

impl SynthesisError {
    /// Whether the retry loop may try again after this error
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ServiceError(_) | Self::ReadTimeout(_))
    }
}

/// Decoded outcome of one synthesis attempt.
///
/// The upstream payload is duck-typed, so it is decoded into this variant as
/// soon as the call returns; nothing downstream touches the raw shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisReply {
    /// The reply carried an audio reference, coerced to a URL string
    Audio { url: String },
    /// The call completed but produced nothing usable yet
    Empty,
    /// The reply had no recognizable audio reference
    Malformed { raw: String },
}

/// Port for audio synthesis
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Submit one synthesis job for the given lyrics.
    ///
    /// # Arguments
    /// * `lyrics` - The decorated lyric line to sing
    ///
    /// # Returns
    /// The decoded outcome of this attempt, or an error
    async fn synthesize(&self, lyrics: &Lyrics) -> Result<SynthesisReply, SynthesisError>;
}
