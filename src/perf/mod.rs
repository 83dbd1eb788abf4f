//! Request timing utilities
//!
//! [`HandlerTimer`] is a scoped timer: create it at the top of a handler and
//! the elapsed wall-clock time is logged when it goes out of scope, whichever
//! path the handler returns through.
//!
//! ## Usage
//!
//! ```
//! use fingerprint_capture_server::perf::HandlerTimer;
//!
//! fn handler() -> Result<(), String> {
//!     let _timer = HandlerTimer::start("capture");
//!     Err("early return still logs".to_string())
//! }
//!
//! assert!(handler().is_err());
//! ```

use std::time::{Duration, Instant};

use tracing::info;

/// Logs the lifetime of a handler invocation on drop
#[derive(Debug)]
#[must_use = "the timer logs when dropped; binding it to `_` drops it immediately"]
pub struct HandlerTimer {
    operation: &'static str,
    started:   Instant,
}

impl HandlerTimer {
    /// Starts timing `operation`
    pub fn start(operation: &'static str) -> Self {
        Self {
            operation,
            started: Instant::now(),
        }
    }

    /// Name reported in the log line
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Time since the timer started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for HandlerTimer {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        info!(
            operation = self.operation,
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "{} handled in {:?}",
            self.operation,
            elapsed
        );
    }
}
