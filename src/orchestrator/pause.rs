// src/orchestrator/pause.rs

//! The yield point before the first build-tool invocation.
//!
//! It only gives an observing UI a chance to render the "preparing" state;
//! no ordering depends on it beyond happening before the first spawn.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Default pause before dependency copy.
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(100);

pub trait YieldPoint: Send + Sync {
    fn pause(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Sleeps for a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct TimedPause(pub Duration);

impl Default for TimedPause {
    fn default() -> Self {
        TimedPause(DEFAULT_PAUSE)
    }
}

impl YieldPoint for TimedPause {
    fn pause(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        let duration = self.0;
        Box::pin(async move {
            if duration.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(duration).await;
            }
        })
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

impl YieldPoint for NoPause {
    fn pause(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async {})
    }
}
