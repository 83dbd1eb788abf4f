//! Mock capture backend for testing
//!
//! [`MockCapture`] implements [`CaptureFacade`] without spawning anything. It
//! returns a configured outcome on every call, can simulate a slow sensor
//! with [`with_delay`](MockCapture::with_delay), and counts how many captures
//! were requested.
//!
//! # Examples
//!
//! ```
//! use fingerprint_capture_server::capture::{CaptureFacade, mock::MockCapture};
//!
//! #[tokio::main]
//! async fn main() {
//!     let capture = MockCapture::with_image(b"OKDATA".to_vec());
//!
//!     let image = capture.capture().await.unwrap();
//!     assert_eq!(image.as_bytes(), b"OKDATA");
//!     assert_eq!(capture.calls(), 1);
//! }
//! ```

use std::{
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use tokio::time::sleep;

use super::CaptureFacade;
use crate::{
    error::{CaptureError, CaptureResult},
    model::CapturedImage,
};

/// Outcome returned by every [`MockCapture::capture`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOutcome {
    /// Routine succeeded and wrote these bytes
    Image(Vec<u8>),
    /// Routine exited with `exit_code` after writing `stderr`
    Failure {
        /// Exit code reported by the routine
        exit_code: i32,
        /// Diagnostic text written to stderr
        stderr:    String,
    },
    /// Routine exited successfully without output
    Empty,
    /// Interpreter could not be started
    SpawnFailure,
}

/// In-memory capture backend for tests and development
#[derive(Debug)]
pub struct MockCapture {
    outcome:  MockOutcome,
    delay:    Option<Duration>,
    calls:    AtomicUsize,
    /// Number of captures currently inside [`capture`](CaptureFacade::capture)
    inflight: AtomicUsize,
    /// Highest concurrent `inflight` value observed
    peak:     AtomicUsize,
}

impl MockCapture {
    /// Creates a mock returning `outcome` on every call
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            delay: None,
            calls: AtomicUsize::new(0),
            inflight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Mock that always succeeds with `bytes`
    pub fn with_image(bytes: Vec<u8>) -> Self {
        Self::new(MockOutcome::Image(bytes))
    }

    /// Mock that always fails like a routine exiting with `exit_code`
    pub fn with_failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::new(MockOutcome::Failure {
            exit_code,
            stderr: stderr.into(),
        })
    }

    /// Sleeps for `delay` inside every capture
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Total number of captures requested so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Most captures that were ever running at the same time
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn outcome_result(&self) -> CaptureResult<CapturedImage> {
        match &self.outcome {
            MockOutcome::Image(bytes) => Ok(CapturedImage::new(bytes.clone())),
            MockOutcome::Failure { exit_code, stderr } => Err(CaptureError::ProcessFailed {
                exit_code: Some(*exit_code),
                stdout:    Vec::new(),
                stderr:    stderr.as_bytes().to_vec(),
            }),
            MockOutcome::Empty => Err(CaptureError::EmptyOutput { stderr: Vec::new() }),
            MockOutcome::SpawnFailure => Err(CaptureError::SpawnFailed {
                interpreter: PathBuf::from("python3"),
                source:      std::io::Error::new(std::io::ErrorKind::NotFound, "mock interpreter"),
            }),
        }
    }
}

#[async_trait]
impl CaptureFacade for MockCapture {
    async fn capture(&self) -> CaptureResult<CapturedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let running = self.inflight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            sleep(delay).await;
        }

        self.inflight.fetch_sub(1, Ordering::SeqCst);
        self.outcome_result()
    }
}
