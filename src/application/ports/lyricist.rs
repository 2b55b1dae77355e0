//! Lyrics generation port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::generation::{Lyrics, Prompt};

/// Lyrics generation errors
#[derive(Debug, Clone, Error)]
pub enum LyricsError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Empty completion from the language model")]
    EmptyResponse,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for lyrics generation
#[async_trait]
pub trait Lyricist: Send + Sync {
    /// Write a decorated lyric line for the given prompt.
    ///
    /// # Arguments
    /// * `prompt` - The user's text prompt
    ///
    /// # Returns
    /// The decorated lyrics or an error
    async fn write_lyrics(&self, prompt: &Prompt) -> Result<Lyrics, LyricsError>;
}
