//! Capture abstractions and implementations
//!
//! This module provides the seam between the HTTP front door and whatever
//! actually talks to the fingerprint sensor:
//!
//! - [`CaptureFacade`]: trait for anything that can produce one image
//! - [`ProcessCapture`]: runs the external capture routine through an
//!   interpreter resolved by [`InterpreterResolver`]
//! - [`MockCapture`]: in-memory implementation for tests

use async_trait::async_trait;

use crate::{error::CaptureResult, model::CapturedImage};

pub mod interpreter;
pub mod mock;
pub mod process;

pub use interpreter::{InterpreterResolver, InterpreterSource, ResolvedInterpreter};
pub use mock::MockCapture;
pub use process::ProcessCapture;

/// Core trait for fingerprint capture backends
///
/// Implementations must be `Send + Sync`: the HTTP server shares one instance
/// across all in-flight requests and calls [`capture`](Self::capture)
/// concurrently. Each call is independent and must not leak state into the
/// next.
///
/// # Examples
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use fingerprint_capture_server::{
///     capture::CaptureFacade, error::CaptureResult, model::CapturedImage,
/// };
///
/// struct FixedImage(Vec<u8>);
///
/// #[async_trait]
/// impl CaptureFacade for FixedImage {
///     async fn capture(&self) -> CaptureResult<CapturedImage> {
///         Ok(CapturedImage::new(self.0.clone()))
///     }
/// }
/// ```
#[async_trait]
pub trait CaptureFacade: Send + Sync {
    /// Captures one fingerprint image
    ///
    /// # Errors
    ///
    /// - [`CaptureError::SpawnFailed`](crate::error::CaptureError::SpawnFailed)
    ///   - the routine could not be started
    /// - [`CaptureError::ProcessFailed`](crate::error::CaptureError::ProcessFailed)
    ///   - the routine exited unsuccessfully
    /// - [`CaptureError::EmptyOutput`](crate::error::CaptureError::EmptyOutput)
    ///   - the routine succeeded without writing any bytes
    async fn capture(&self) -> CaptureResult<CapturedImage>;
}
