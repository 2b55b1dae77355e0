//! Configuration adapters

mod store;

pub use store::{env_config, TomlConfigStore};
