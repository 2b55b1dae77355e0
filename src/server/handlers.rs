//! Request handlers

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::application::ports::{Lyricist, Sleeper, Synthesizer};
use crate::application::{GenerateError, GenerateInput, GenerateTrackUseCase};
use crate::domain::generation::{Prompt, TrackDuration};

/// Bundled landing page
const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Form payload for music generation
#[derive(Debug, Deserialize)]
pub struct GenerateMusicForm {
    pub prompt: String,
    pub duration: i64,
}

/// Success payload
#[derive(Debug, Serialize)]
pub struct MusicResponse {
    pub url: String,
}

/// Error payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `GET /` - landing page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `POST /generate-music` - run the pipeline and answer with the track URL
pub async fn generate_music<L, S, C>(
    State(use_case): State<Arc<GenerateTrackUseCase<L, S, C>>>,
    Form(form): Form<GenerateMusicForm>,
) -> Response
where
    L: Lyricist,
    S: Synthesizer,
    C: Sleeper,
{
    let input = GenerateInput {
        prompt: Prompt::new(form.prompt),
        duration: TrackDuration::from_secs(form.duration),
    };

    match use_case.execute(input).await {
        Ok(output) => (StatusCode::OK, Json(MusicResponse { url: output.url })).into_response(),
        Err(e) => error_response(e),
    }
}

/// Map pipeline failures onto the JSON error contract.
fn error_response(error: GenerateError) -> Response {
    let (status, message) = match &error {
        GenerateError::ServiceTimeout => (StatusCode::GATEWAY_TIMEOUT, error.to_string()),
        GenerateError::UnexpectedOutput { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error processing output: {}", other),
        ),
    };

    error!("{}", message);

    (status, Json(ErrorResponse { error: message })).into_response()
}
