//! Config file rendering
//!
//! Serde wire structs for the two generated JSON files. The field names
//! and constants here are the Hysteria file formats; the pipeline's
//! records stay typed and these structs only exist at the write edge.
//! Files are overwritten unconditionally each run.

use crate::docker::{COMPOSE_FILE, compose_file};
use hysgen_config::{ClientConfig, Protocol, ServerConfig};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// Server config file name.
pub const SERVER_CONFIG_FILE: &str = "hysteria.json";
/// Client config file name.
pub const CLIENT_CONFIG_FILE: &str = "client.json";

const RESOLVE_PREFERENCE: &str = "46";
const ALPN: &str = "h3";

const CLIENT_UP_MBPS: u32 = 20;
const CLIENT_DOWN_MBPS: u32 = 100;
const PROXY_TIMEOUT_SECS: u32 = 300;
const HTTP_LISTEN: &str = "127.0.0.1:10809";
const SOCKS5_LISTEN: &str = "127.0.0.1:10808";

#[derive(Serialize)]
struct ServerFile {
    listen: String,
    protocol: Protocol,
    resolve_preference: &'static str,
    auth: Auth,
    alpn: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
}

#[derive(Serialize)]
struct Auth {
    mode: &'static str,
    config: AuthConfig,
}

#[derive(Serialize)]
struct AuthConfig {
    password: String,
}

#[derive(Serialize)]
struct ClientFile {
    server: String,
    protocol: Protocol,
    up_mbps: u32,
    down_mbps: u32,
    alpn: &'static str,
    http: ProxyListen,
    socks5: ProxyListen,
    auth_str: String,
    server_name: String,
    insecure: bool,
    retry: u32,
    retry_interval: u32,
    fast_open: bool,
    hop_interval: u32,
}

#[derive(Serialize)]
struct ProxyListen {
    listen: &'static str,
    timeout: u32,
    disable_udp: bool,
}

/// Map a resolved host path to where the container sees it.
fn container_path(host_path: &str) -> String {
    let file_name = Path::new(host_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| host_path.to_string());
    format!("/etc/hysteria/{file_name}")
}

/// Render `hysteria.json`.
pub fn server_config_json(server: &ServerConfig) -> serde_json::Result<String> {
    let file = ServerFile {
        listen: format!(":{}", server.port),
        protocol: server.protocol,
        resolve_preference: RESOLVE_PREFERENCE,
        auth: Auth {
            mode: "password",
            config: AuthConfig {
                password: server.password.clone(),
            },
        },
        alpn: ALPN,
        cert: server.cert.as_deref().map(container_path),
        key: server.key.as_deref().map(container_path),
    };
    serde_json::to_string_pretty(&file)
}

/// Render `client.json`.
pub fn client_config_json(client: &ClientConfig) -> serde_json::Result<String> {
    let file = ClientFile {
        server: format!("{}:{}", client.server_ip, client.port),
        protocol: client.protocol,
        up_mbps: CLIENT_UP_MBPS,
        down_mbps: CLIENT_DOWN_MBPS,
        alpn: ALPN,
        http: ProxyListen {
            listen: HTTP_LISTEN,
            timeout: PROXY_TIMEOUT_SECS,
            disable_udp: false,
        },
        socks5: ProxyListen {
            listen: SOCKS5_LISTEN,
            timeout: PROXY_TIMEOUT_SECS,
            disable_udp: false,
        },
        auth_str: client.auth.clone(),
        server_name: client.server_name.clone(),
        insecure: client.insecure,
        retry: 3,
        retry_interval: 3,
        fast_open: true,
        hop_interval: 60,
    };
    serde_json::to_string_pretty(&file)
}

/// Write `hysteria.json` into the current directory.
pub fn write_server_config(server: &ServerConfig) -> anyhow::Result<()> {
    let json = server_config_json(server)?;
    fs::write(SERVER_CONFIG_FILE, json)?;
    info!(file = SERVER_CONFIG_FILE, "wrote server configuration");
    Ok(())
}

/// Write `client.json` into the current directory and return its contents.
pub fn write_client_config(client: &ClientConfig) -> anyhow::Result<String> {
    let json = client_config_json(client)?;
    fs::write(CLIENT_CONFIG_FILE, &json)?;
    info!(file = CLIENT_CONFIG_FILE, "wrote client configuration");
    Ok(json)
}

/// Write `docker-compose.yml` into the current directory.
pub fn write_compose_file(server: &ServerConfig) -> io::Result<()> {
    fs::write(COMPOSE_FILE, compose_file(server))?;
    info!(file = COMPOSE_FILE, "wrote compose file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn server(cert: Option<&str>, key: Option<&str>) -> ServerConfig {
        ServerConfig {
            port: 31337,
            protocol: Protocol::Udp,
            password: "s3cretpw".to_string(),
            cert: cert.map(String::from),
            key: key.map(String::from),
        }
    }

    #[test]
    fn test_server_file_fields() {
        let json = server_config_json(&server(Some("cert.crt"), Some("private.key"))).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["listen"], ":31337");
        assert_eq!(value["protocol"], "udp");
        assert_eq!(value["resolve_preference"], "46");
        assert_eq!(value["auth"]["mode"], "password");
        assert_eq!(value["auth"]["config"]["password"], "s3cretpw");
        assert_eq!(value["alpn"], "h3");
        assert_eq!(value["cert"], "/etc/hysteria/cert.crt");
        assert_eq!(value["key"], "/etc/hysteria/private.key");
    }

    #[test]
    fn test_server_file_custom_paths_use_file_name() {
        let json =
            server_config_json(&server(Some("/etc/key/cert.crt"), Some("/etc/key/private.key")))
                .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["cert"], "/etc/hysteria/cert.crt");
        assert_eq!(value["key"], "/etc/hysteria/private.key");
    }

    #[test]
    fn test_server_file_omits_acme_material() {
        let json = server_config_json(&server(None, None)).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("cert").is_none());
        assert!(value.get("key").is_none());
    }

    #[test]
    fn test_client_file_fields() {
        let client = ClientConfig {
            server_ip: "203.0.113.7".to_string(),
            port: 31337,
            protocol: Protocol::WechatVideo,
            auth: "s3cretpw".to_string(),
            server_name: "www.bing.com".to_string(),
            insecure: true,
        };
        let json = client_config_json(&client).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["server"], "203.0.113.7:31337");
        assert_eq!(value["protocol"], "wechat-video");
        assert_eq!(value["up_mbps"], 20);
        assert_eq!(value["down_mbps"], 100);
        assert_eq!(value["http"]["listen"], "127.0.0.1:10809");
        assert_eq!(value["http"]["timeout"], 300);
        assert_eq!(value["http"]["disable_udp"], false);
        assert_eq!(value["socks5"]["listen"], "127.0.0.1:10808");
        assert_eq!(value["auth_str"], "s3cretpw");
        assert_eq!(value["server_name"], "www.bing.com");
        assert_eq!(value["insecure"], true);
        assert_eq!(value["retry"], 3);
        assert_eq!(value["retry_interval"], 3);
        assert_eq!(value["fast_open"], true);
        assert_eq!(value["hop_interval"], 60);
    }
}
