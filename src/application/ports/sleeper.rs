//! Sleep port interface

use std::time::Duration;

use async_trait::async_trait;

/// Port for suspending the current task between retry attempts.
///
/// Production code waits on the runtime clock; tests substitute a recording
/// implementation so backoff schedules can be asserted without real time.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend the current task for the given duration.
    async fn sleep(&self, duration: Duration);
}
