//! Error types for fingerprint capture operations
//!
//! Every failure of the capture routine ends up as a [`CaptureError`]. The
//! HTTP layer turns it into a plain-text 500 body via
//! [`CaptureError::response_body`]; operators get the full detail, including
//! an actionable [`remediation_hint`](CaptureError::remediation_hint), in the
//! server log.

use std::{borrow::Cow, path::PathBuf};

/// Prefix of every 500 body caused by a failed capture routine
pub const CAPTURE_FAILED_PREFIX: &str = "Failed to capture fingerprint: ";

/// Body returned when the routine succeeds without producing any bytes
pub const NO_DATA_MESSAGE: &str = "No data received from Python script";

/// Result type alias for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Error type for a single capture attempt
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The interpreter could not be started at all
    #[error("Failed to spawn capture routine with interpreter {interpreter:?}: {source}")]
    SpawnFailed {
        /// Interpreter that was handed to the OS
        interpreter: PathBuf,
        /// Underlying spawn error
        #[source]
        source:      std::io::Error,
    },

    /// The routine ran and exited unsuccessfully
    #[error("Capture routine failed ({})", exit_label(.exit_code))]
    ProcessFailed {
        /// Exit code, `None` when the child was terminated by a signal
        exit_code: Option<i32>,
        /// Everything the routine wrote to stdout
        stdout:    Vec<u8>,
        /// Everything the routine wrote to stderr
        stderr:    Vec<u8>,
    },

    /// The routine exited successfully but wrote nothing to stdout
    #[error("Capture routine exited successfully but produced no image data")]
    EmptyOutput {
        /// Whatever the routine wrote to stderr
        stderr: Vec<u8>,
    },

    /// Waiting on the child or reading its pipes failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

fn exit_label(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

impl CaptureError {
    /// Plain-text body sent to the HTTP client
    ///
    /// Failures of the routine carry its stderr after a fixed prefix; an empty
    /// result maps to a fixed message regardless of stderr.
    ///
    /// # Examples
    ///
    /// ```
    /// use fingerprint_capture_server::error::CaptureError;
    ///
    /// let error = CaptureError::ProcessFailed {
    ///     exit_code: Some(1),
    ///     stdout:    Vec::new(),
    ///     stderr:    b"sensor not found".to_vec(),
    /// };
    ///
    /// assert_eq!(error.response_body(), "Failed to capture fingerprint: sensor not found");
    /// ```
    pub fn response_body(&self) -> String {
        match self {
            CaptureError::EmptyOutput { .. } => NO_DATA_MESSAGE.to_string(),
            _ => format!("{CAPTURE_FAILED_PREFIX}{}", self.stderr_text()),
        }
    }

    /// Routine stderr decoded lossily, empty when the routine never ran
    pub fn stderr_text(&self) -> Cow<'_, str> {
        match self {
            CaptureError::ProcessFailed { stderr, .. } | CaptureError::EmptyOutput { stderr } => {
                String::from_utf8_lossy(stderr)
            }
            _ => Cow::Borrowed(""),
        }
    }

    /// Routine stdout decoded lossily, empty unless the routine failed
    pub fn stdout_text(&self) -> Cow<'_, str> {
        match self {
            CaptureError::ProcessFailed { stdout, .. } => String::from_utf8_lossy(stdout),
            _ => Cow::Borrowed(""),
        }
    }

    /// Returns an operator-facing hint for resolving this error
    ///
    /// Exit codes follow the conventions of the bundled sensor script. The
    /// hint is logged only; it is never part of the HTTP response.
    pub fn remediation_hint(&self) -> &str {
        match self {
            CaptureError::SpawnFailed { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => {
                    "Interpreter not found. Create a virtual environment in the venv directory or \
                     install python3 (python on Windows) on the search path."
                }
                std::io::ErrorKind::PermissionDenied => {
                    "Interpreter is not executable. Check file permissions on the virtual \
                     environment interpreter."
                }
                _ => "The operating system refused to start the capture routine. Check process \
                      limits and system resources.",
            },
            CaptureError::ProcessFailed { exit_code, .. } => match exit_code {
                Some(1) => {
                    "Could not open the sensor serial port. Check the device node is passed \
                     through, the saved port in settings.cfg is correct, and no other program \
                     holds the port."
                }
                Some(2) => "Timed out waiting for a finger on the sensor. Retry the capture.",
                Some(3) => {
                    "Timed out while downloading the image from the sensor. Retry or lower the \
                     saved baud rate."
                }
                Some(4) => "The sensor declined the image upload. Power-cycle the sensor.",
                Some(5) => "Unexpected error while downloading the image. Check the script log.",
                Some(6) => {
                    "Image data from the sensor could not be decoded. Inspect the raw dump \
                     written by the script."
                }
                Some(7) => "Changing the sensor baud rate failed. Power-cycle and retry.",
                Some(_) => "The capture routine failed. See its stdout and stderr in the log.",
                None => "The capture routine was killed by a signal before finishing.",
            },
            CaptureError::EmptyOutput { .. } => {
                "The capture routine exited cleanly without writing an image. Make sure it writes \
                 the PNG to stdout, not to a file."
            }
            CaptureError::IoError(_) => {
                "An I/O error occurred while collecting the routine output. Check system \
                 resources."
            }
        }
    }
}
