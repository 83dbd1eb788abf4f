//! Platform detection for interpreter resolution
//!
//! The platform is detected once at startup and threaded through
//! [`InterpreterResolver`](crate::capture::interpreter::InterpreterResolver)
//! so path construction never branches on the host OS inline.

use crate::model::Platform;

/// Detects the platform family of the running process
///
/// # Platform-specific behavior
///
/// - Windows targets return [`Platform::Windows`]
/// - Every other target returns [`Platform::Posix`]
///
/// # Examples
///
/// ```
/// use fingerprint_capture_server::util::detect::detect_platform;
///
/// let platform = detect_platform();
/// println!("Interpreter conventions: {platform}");
/// ```
pub fn detect_platform() -> Platform {
    platform_for_os(std::env::consts::OS)
}

/// Maps an OS name as reported by `std::env::consts::OS` to a platform family
fn platform_for_os(os: &str) -> Platform {
    match os {
        "windows" => Platform::Windows,
        _ => Platform::Posix,
    }
}
