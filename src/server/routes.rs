//! Route table

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::application::ports::{Lyricist, Sleeper, Synthesizer};
use crate::application::GenerateTrackUseCase;

use super::handlers::{generate_music, index};

/// Build the application router around a wired use case.
pub fn router<L, S, C>(use_case: Arc<GenerateTrackUseCase<L, S, C>>) -> Router
where
    L: Lyricist + 'static,
    S: Synthesizer + 'static,
    C: Sleeper + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/generate-music", post(generate_music::<L, S, C>))
        .with_state(use_case)
}
