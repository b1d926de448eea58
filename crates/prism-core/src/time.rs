//! Clock abstraction with production and manual handlers
//!
//! Token expiry and record timestamps read the current time through the
//! `Clock` trait so tests can drive time forward without sleeping.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

/// Source of the current time, in milliseconds since the Unix epoch.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current time in milliseconds since the Unix epoch
    async fn now_ms(&self) -> u64;
}

/// Production clock backed by the system wall clock
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Clock for SystemClock {
    async fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis() as u64
    }
}

/// Manually-driven clock for tests and simulation
#[derive(Debug, Clone)]
pub struct ManualClock {
    current_ms: Arc<Mutex<u64>>,
}

impl ManualClock {
    /// Create a manual clock starting at the given time
    pub fn new(start_ms: u64) -> Self {
        Self {
            current_ms: Arc::new(Mutex::new(start_ms)),
        }
    }

    /// Advance the clock by the given number of milliseconds
    pub async fn advance(&self, delta_ms: u64) {
        let mut now = self.current_ms.lock().await;
        *now += delta_ms;
    }

    /// Set the absolute time
    pub async fn set(&self, now_ms: u64) {
        *self.current_ms.lock().await = now_ms;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0)
    }
}

#[async_trait]
impl Clock for ManualClock {
    async fn now_ms(&self) -> u64 {
        *self.current_ms.lock().await
    }
}
