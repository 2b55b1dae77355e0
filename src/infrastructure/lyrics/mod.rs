//! Lyrics generation adapters

mod hugging_face;

pub use hugging_face::HuggingFaceLyricist;
