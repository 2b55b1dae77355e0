//! Application layer - Use cases and port interfaces
//!
//! Contains the core generation pipeline and trait definitions
//! for external system interactions.

pub mod generate;
pub mod ports;

// Re-export use cases
pub use generate::{
    GenerateError, GenerateInput, GenerateOutput, GenerateTrackUseCase,
    SERVICE_TIMEOUT_MESSAGE,
};
