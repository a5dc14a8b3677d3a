//! QR rendering service
//!
//! Sends the share URL to qrcode.show and returns the rendered blob
//! verbatim; the response format is the service's business.

use crate::{HttpOptions, LookupError};
use url::form_urlencoded;

const SERVICE: &str = "qrcode.show";

const QR_WIDTH: u32 = 76;
const QR_HEIGHT: u32 = 76;

/// Build the request URL for a payload.
fn request_url(data: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(data.as_bytes()).collect();
    format!("https://qrcode.show/{encoded}")
}

/// Fetch a terminal-printable QR code for `data`.
pub fn fetch_qr(data: &str, options: &HttpOptions) -> Result<String, LookupError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(options.timeout)
        .build()
        .map_err(|source| LookupError::Transport {
            service: SERVICE,
            source,
        })?;

    let response = client
        .get(request_url(data))
        .header("User-Agent", "Mozilla/5.0")
        .header("Accept", "application/octet-stream")
        .header("X-QR-Version-Type", "micro")
        .header("X-QR-Quiet-Zone", "true")
        .header("X-QR-Min-Width", QR_WIDTH)
        .header("X-QR-Min-Height", QR_HEIGHT)
        .send()
        .map_err(|source| LookupError::Transport {
            service: SERVICE,
            source,
        })?;

    if !response.status().is_success() {
        return Err(LookupError::Status {
            service: SERVICE,
            status: response.status(),
        });
    }

    response.text().map_err(|source| LookupError::Transport {
        service: SERVICE,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_is_urlencoded() {
        let url = request_url("hysteria://1.2.3.4:443?auth=abc#tag");

        assert!(url.starts_with("https://qrcode.show/"));
        assert!(!url[20..].contains('?'));
        assert!(!url[20..].contains('#'));
        assert!(url.contains("hysteria%3A%2F%2F1.2.3.4%3A443%3Fauth%3Dabc%23tag"));
    }
}
