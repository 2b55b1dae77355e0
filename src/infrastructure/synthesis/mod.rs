//! Audio synthesis adapters

mod replicate;

pub use replicate::ReplicateSynthesizer;
