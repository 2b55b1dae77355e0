//! Runtime clock adapters

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::Sleeper;

/// Sleeper backed by the tokio runtime clock.
///
/// Waiting suspends only the current request's task; other requests keep
/// being served.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
