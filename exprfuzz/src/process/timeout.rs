//! Timeout tracking for the system under test
//!
//! Uses std::time::Instant to measure how long a child has been running.

use crate::{FuzzError, FuzzResult};
use std::path::Path;
use std::time::{Duration, Instant};

/// Deadline for one child process
pub struct TimeoutTracker {
    start_time: Instant,
    limit: Duration,
}

impl TimeoutTracker {
    /// Start tracking now
    pub fn new(limit: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            limit,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed() > self.limit
    }

    /// Returns a timeout error naming the binary and expression once the limit has passed
    pub fn check_timeout(&self, binary: &Path, expression: &str) -> FuzzResult<()> {
        if self.is_expired() {
            return Err(FuzzError::Timeout {
                binary: binary.display().to_string(),
                timeout_ms: self.limit.as_millis(),
                expression: expression.to_string(),
            });
        }
        Ok(())
    }
}
