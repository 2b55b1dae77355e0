//! HTTP surface
//!
//! axum routing and request/response mapping around the generation pipeline.

mod handlers;
mod routes;

pub use handlers::{ErrorResponse, GenerateMusicForm, MusicResponse};
pub use routes::router;
