//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the hosted generation APIs and the runtime.

pub mod config;
pub mod lyrics;
pub mod synthesis;
pub mod time;

// Re-export adapters
pub use config::{env_config, TomlConfigStore};
pub use lyrics::HuggingFaceLyricist;
pub use synthesis::ReplicateSynthesizer;
pub use time::TokioSleeper;
