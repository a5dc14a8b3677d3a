//! Configuration assembler
//!
//! Pure combination of the resolved pieces into the server config, the
//! client config, and the share URL. Port, protocol, and credential are
//! identical across both configs by construction; the only possible
//! failure is an upstream resolver failure, never a new one here.

use crate::cert::CertificateBundle;
use crate::port::PortChoice;
use crate::protocol::Protocol;
use crate::secret::Credential;

/// Upload hint encoded in the share URL, in Mbps.
const SHARE_UP_MBPS: u32 = 10;
/// Download hint encoded in the share URL, in Mbps.
const SHARE_DOWN_MBPS: u32 = 50;

/// Server-side configuration record.
///
/// `cert`/`key` are unset for the ACME strategy, where the automation
/// script owns the certificate material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub protocol: Protocol,
    pub password: String,
    pub cert: Option<String>,
    pub key: Option<String>,
}

/// Client-side configuration record.
///
/// Must stay field-for-field consistent with the server record; any drift
/// is a correctness bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_ip: String,
    pub port: u16,
    pub protocol: Protocol,
    pub auth: String,
    pub server_name: String,
    pub insecure: bool,
}

/// Full assembly output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub share_url: String,
}

/// Combine the resolved pieces into the final configuration bundle.
pub fn assemble(
    port: PortChoice,
    protocol: Protocol,
    credential: &Credential,
    bundle: &CertificateBundle,
    public_ip: &str,
    label: &str,
) -> Assembly {
    let server = ServerConfig {
        port: port.port,
        protocol,
        password: credential.as_str().to_string(),
        cert: bundle
            .cert_path
            .as_ref()
            .map(|p| p.display().to_string()),
        key: bundle.key_path.as_ref().map(|p| p.display().to_string()),
    };

    let client = ClientConfig {
        server_ip: public_ip.to_string(),
        port: port.port,
        protocol,
        auth: credential.as_str().to_string(),
        server_name: bundle.domain.clone(),
        insecure: bundle.insecure,
    };

    let share_url = format!(
        "hysteria://{ip}:{port}?protocol={protocol}&auth={auth}&peer={peer}&insecure={insecure}&upmbps={up}&downmbps={down}#{label}",
        ip = public_ip,
        port = port.port,
        protocol = protocol.as_str(),
        auth = credential.as_str(),
        peer = bundle.domain,
        insecure = bundle.insecure,
        up = SHARE_UP_MBPS,
        down = SHARE_DOWN_MBPS,
    );

    Assembly {
        server,
        client,
        share_url,
    }
}
