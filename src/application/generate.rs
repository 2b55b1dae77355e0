//! Generate track use case

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::generation::{Lyrics, Prompt, TrackDuration};
use crate::domain::retry::{RetryPolicy, RetryState};

use super::ports::{
    Lyricist, LyricsError, Sleeper, SynthesisError, SynthesisReply, Synthesizer,
};

/// Fixed message returned when every synthesis attempt has failed
pub const SERVICE_TIMEOUT_MESSAGE: &str = "Service timeout. Please try again later.";

/// Errors from the generate track use case
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Lyrics generation failed: {0}")]
    Lyrics(#[from] LyricsError),

    #[error("Synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("{}", SERVICE_TIMEOUT_MESSAGE)]
    ServiceTimeout,

    #[error("Unexpected output format: {raw}")]
    UnexpectedOutput { raw: String },

    #[error("Invalid URL generated")]
    InvalidUrl,

    #[error("Response is not JSON serializable: {0}")]
    Unserializable(String),
}

/// Input parameters for the generate track use case
#[derive(Debug, Clone)]
pub struct GenerateInput {
    /// The user's text prompt
    pub prompt: Prompt,
    /// Requested track length; accepted for interface compatibility but not
    /// forwarded to the synthesis service
    pub duration: TrackDuration,
}

/// Output from the generate track use case
#[derive(Debug, Clone)]
pub struct GenerateOutput {
    /// URL of the synthesized audio
    pub url: String,
    /// The lyric line that was sung
    pub lyrics: Lyrics,
}

/// Prompt-to-track pipeline: write lyrics, then synthesize them with
/// bounded retry on transient upstream failures.
pub struct GenerateTrackUseCase<L, S, C>
where
    L: Lyricist,
    S: Synthesizer,
    C: Sleeper,
{
    lyricist: L,
    synthesizer: S,
    sleeper: C,
    policy: RetryPolicy,
}

impl<L, S, C> GenerateTrackUseCase<L, S, C>
where
    L: Lyricist,
    S: Synthesizer,
    C: Sleeper,
{
    /// Create a new use case instance with the default retry policy
    pub fn new(lyricist: L, synthesizer: S, sleeper: C) -> Self {
        Self::with_policy(lyricist, synthesizer, sleeper, RetryPolicy::default())
    }

    /// Create a new use case instance with a custom retry policy
    pub fn with_policy(lyricist: L, synthesizer: S, sleeper: C, policy: RetryPolicy) -> Self {
        Self {
            lyricist,
            synthesizer,
            sleeper,
            policy,
        }
    }

    /// Execute the generation workflow
    pub async fn execute(&self, input: GenerateInput) -> Result<GenerateOutput, GenerateError> {
        let lyrics = self.lyricist.write_lyrics(&input.prompt).await?;
        info!(duration = %input.duration, "Generated lyrics: {}", lyrics.text());

        let url = self.synthesize_with_retry(&lyrics).await?;

        if url.is_empty() {
            return Err(GenerateError::InvalidUrl);
        }

        // The payload must survive a JSON round trip before it reaches the
        // response layer; a failure here is a validation error, not a retry.
        serde_json::to_string(&serde_json::json!({ "url": url }))
            .map_err(|e| GenerateError::Unserializable(e.to_string()))?;

        Ok(GenerateOutput { url, lyrics })
    }

    /// Drive the retry state machine until a terminal state.
    ///
    /// Empty replies back off on the same schedule as transport faults.
    /// Only the latest attempt's outcome is retained.
    async fn synthesize_with_retry(&self, lyrics: &Lyrics) -> Result<String, GenerateError> {
        let mut state = RetryState::start();
        let mut track_url = None;

        while let RetryState::Attempting(failures) = state {
            let attempt = failures + 1;

            match self.synthesizer.synthesize(lyrics).await {
                Ok(SynthesisReply::Audio { url }) => {
                    debug!(attempt, "Synthesis succeeded");
                    track_url = Some(url);
                    state = state.succeed();
                }
                Ok(SynthesisReply::Malformed { raw }) => {
                    warn!(attempt, "Unrecognized synthesis output: {}", raw);
                    return Err(GenerateError::UnexpectedOutput { raw });
                }
                Ok(SynthesisReply::Empty) => {
                    warn!(
                        attempt,
                        max = self.policy.max_attempts(),
                        "Synthesis returned no output"
                    );
                    state = self.back_off(state).await;
                }
                Err(e) if e.is_transient() => {
                    warn!(attempt, max = self.policy.max_attempts(), "API error: {}", e);
                    state = self.back_off(state).await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        track_url.ok_or(GenerateError::ServiceTimeout)
    }

    async fn back_off(&self, state: RetryState) -> RetryState {
        let (next, delay) = state.record_failure(&self.policy);
        if let Some(delay) = delay {
            self.sleeper.sleep(delay).await;
        }
        next
    }
}
