//! fingerprint-capture-server: HTTP front door for a fingerprint sensor
//!
//! This library exposes `GET /capture`, which runs an external capture
//! routine through a per-request resolved interpreter and returns the PNG it
//! writes to stdout.

pub mod capture;
pub mod config;
pub mod error;
pub mod model;
pub mod perf;
pub mod server;
pub mod util;
