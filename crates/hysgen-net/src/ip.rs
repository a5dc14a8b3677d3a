//! Public IP lookup
//!
//! The server's public address goes into the client config and the share
//! URL; with several private interfaces on the host, only the lookup
//! service knows which address peers can actually reach.

use crate::{HttpOptions, LookupError};
use serde::Deserialize;
use tracing::debug;

const SERVICE: &str = "ip-api.com";
const ENDPOINT: &str = "http://ip-api.com/json/?fields=query";

#[derive(Deserialize)]
struct IpReply {
    query: String,
}

/// Look up the server's public IP address.
pub fn public_ip(options: &HttpOptions) -> Result<String, LookupError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(options.timeout)
        .build()
        .map_err(|source| LookupError::Transport {
            service: SERVICE,
            source,
        })?;

    let response = client
        .get(ENDPOINT)
        .header("Accept", "application/json")
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

    let reply: IpReply = response.json().map_err(|source| LookupError::Transport {
        service: SERVICE,
        source,
    })?;

    debug!(ip = %reply.query, "public IP resolved");
    Ok(reply.query)
}
