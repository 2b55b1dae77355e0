//! Songforge - prompt-to-song web backend
//!
//! This crate accepts a text prompt over HTTP, writes a short lyric line with
//! a hosted language model, and submits it to a hosted music-synthesis
//! service, retrying transient failures with capped exponential backoff.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, the retry state machine, and domain errors
//! - **Application**: The generation use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Hugging Face, Replicate, clock, config)
//! - **Server**: HTTP routing and request/response mapping

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod server;
