//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod lyricist;
pub mod sleeper;
pub mod synthesizer;

// Re-export common types
pub use lyricist::{Lyricist, LyricsError};
pub use sleeper::Sleeper;
pub use synthesizer::{SynthesisError, SynthesisReply, Synthesizer};
