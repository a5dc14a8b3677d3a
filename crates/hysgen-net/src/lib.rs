//! Outbound HTTP edges
//!
//! Two third-party services back the wizard: an IP-lookup endpoint that
//! reports the server's public address, and a QR-rendering endpoint that
//! turns the share URL into a terminal-printable code. Both calls are
//! blocking, carry a configurable timeout, and any failure is fatal to
//! the run (the caller exits with a diagnostic).

mod ip;
mod qr;

pub use ip::public_ip;
pub use qr::fetch_qr;

use std::time::Duration;

/// Options shared by both outbound calls.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

/// Failure of an external lookup service.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("request to {service} failed, please check your connection: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} answered with status {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },
}
