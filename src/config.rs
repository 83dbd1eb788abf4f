//! Server configuration defaults and environment overrides.
//!
//! With no flags and no environment variables the server listens on
//! `0.0.0.0:8080`, looks in `venv/` for an interpreter and runs `capture.py`
//! from its working directory.
//!
//! # Runtime Configuration
//!
//! | Environment Variable | Default | Description |
//! |---------------------|---------|-------------|
//! | `FINGERPRINT_BIND_ADDR` | `0.0.0.0:8080` | Listen address |
//! | `FINGERPRINT_CAPTURE_SCRIPT` | `capture.py` | Capture routine passed to the interpreter |
//! | `FINGERPRINT_VENV_DIR` | `venv` | Virtual environment checked per request |
//! | `FINGERPRINT_SERIALIZE_CAPTURES` | `false` | Allow one capture at a time |
//!
//! Unparsable values fall back to the default. Command-line flags on the
//! binary take precedence over the environment.

use std::{
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    path::PathBuf,
};

/// Default listen address: all interfaces, port 8080
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));

/// Default capture routine, relative to the working directory
pub const DEFAULT_SCRIPT_PATH: &str = "capture.py";

/// Default virtual environment directory, relative to the working directory
pub const DEFAULT_VENV_DIR: &str = "venv";

/// Environment variable overriding [`DEFAULT_BIND_ADDR`]
pub const BIND_ADDR_ENV: &str = "FINGERPRINT_BIND_ADDR";

/// Environment variable overriding [`DEFAULT_SCRIPT_PATH`]
pub const SCRIPT_PATH_ENV: &str = "FINGERPRINT_CAPTURE_SCRIPT";

/// Environment variable overriding [`DEFAULT_VENV_DIR`]
pub const VENV_DIR_ENV: &str = "FINGERPRINT_VENV_DIR";

/// Environment variable enabling the single-capture gate
pub const SERIALIZE_CAPTURES_ENV: &str = "FINGERPRINT_SERIALIZE_CAPTURES";

/// Runtime configuration for the capture server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind:               SocketAddr,
    /// Capture routine handed to the interpreter
    pub script:             PathBuf,
    /// Virtual environment directory searched for an interpreter
    pub venv_dir:           PathBuf,
    /// Hold a lock around each capture so requests never overlap
    pub serialize_captures: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind:               DEFAULT_BIND_ADDR,
            script:             PathBuf::from(DEFAULT_SCRIPT_PATH),
            venv_dir:           PathBuf::from(DEFAULT_VENV_DIR),
            serialize_captures: false,
        }
    }
}

impl ServerConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        Self {
            bind:               bind_addr(),
            script:             script_path(),
            venv_dir:           venv_dir(),
            serialize_captures: serialize_captures(),
        }
    }
}

/// Helper to parse an environment variable or fall back to a default.
fn parse_from_env<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    std::env::var(env_var)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Helper for path variables; empty values count as unset.
fn path_from_env(env_var: &str, default: &str) -> PathBuf {
    match std::env::var_os(env_var) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(default),
    }
}

/// Get the listen address, checking environment variable override.
///
/// Override with: `FINGERPRINT_BIND_ADDR`
///
/// # Example
///
/// ```bash
/// # Only accept local connections
/// export FINGERPRINT_BIND_ADDR=127.0.0.1:8080
/// ```
pub fn bind_addr() -> SocketAddr {
    parse_from_env(BIND_ADDR_ENV, DEFAULT_BIND_ADDR)
}

/// Get the capture routine path.
///
/// Override with: `FINGERPRINT_CAPTURE_SCRIPT`
pub fn script_path() -> PathBuf {
    path_from_env(SCRIPT_PATH_ENV, DEFAULT_SCRIPT_PATH)
}

/// Get the virtual environment directory.
///
/// Override with: `FINGERPRINT_VENV_DIR`
pub fn venv_dir() -> PathBuf {
    path_from_env(VENV_DIR_ENV, DEFAULT_VENV_DIR)
}

/// Whether captures should be serialized.
///
/// Override with: `FINGERPRINT_SERIALIZE_CAPTURES` (`true` / `false`)
pub fn serialize_captures() -> bool {
    parse_from_env(SERIALIZE_CAPTURES_ENV, false)
}
