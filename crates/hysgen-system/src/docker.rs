//! Docker orchestration
//!
//! Renders the docker-compose file for the Hysteria container and drives
//! docker / docker-compose through the command runner, installing either
//! one when missing.

use crate::runner::{CommandError, CommandRunner};
use hysgen_config::ServerConfig;
use std::path::Path;
use tracing::{info, warn};

/// Compose file written next to the generated configs.
pub const COMPOSE_FILE: &str = "docker-compose.yml";

const COMPOSE_VERSION: &str = "2.14.2";
const IMAGE: &str = "tobyxdd/hysteria";

const DOCKER_PATHS: [&str; 2] = ["/usr/bin/docker", "/usr/local/bin/docker"];
const COMPOSE_PATHS: [&str; 2] = ["/usr/bin/docker-compose", "/usr/local/bin/docker-compose"];

/// Render the compose file for the assembled server config.
///
/// Cert and key are bind-mounted read-only into `/etc/hysteria/` under
/// their file names; both mounts are dropped when the ACME script owns
/// the certificate material.
pub fn compose_file(server: &ServerConfig) -> String {
    let mut volumes = String::from("      - ./hysteria.json:/etc/hysteria.json");
    for path in [server.cert.as_deref(), server.key.as_deref()]
        .into_iter()
        .flatten()
    {
        let file_name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());
        let host = if Path::new(path).is_absolute() {
            path.to_string()
        } else {
            format!("./{path}")
        };
        volumes.push_str(&format!("\n      - {host}:/etc/hysteria/{file_name}:ro"));
    }

    format!(
        r#"version: '3.9'
services:
  hysteria:
    image: {IMAGE}
    container_name: hysteria
    restart: always
    network_mode: "host"
    volumes:
{volumes}
    command: ["server", "--config", "/etc/hysteria.json"]
"#
    )
}

/// Make sure the docker engine is installed and the service is running.
pub fn ensure_docker(runner: &dyn CommandRunner) -> Result<(), CommandError> {
    let installed = DOCKER_PATHS.iter().any(|p| Path::new(p).exists());
    ensure_docker_inner(runner, installed)
}

fn ensure_docker_inner(runner: &dyn CommandRunner, installed: bool) -> Result<(), CommandError> {
    if !installed {
        warn!("docker not found, installing with the official script");
        runner.run("curl https://get.docker.com | sh")?;
    }

    // Non-zero from is-active just means the service is down.
    match runner.run("systemctl is-active --quiet docker") {
        Ok(()) => {}
        Err(CommandError::Failed { .. }) => {
            info!("enabling the docker service");
            runner.run("systemctl enable --now --quiet docker")?;
        }
        Err(e) => return Err(e),
    }

    Ok(())
}

/// Bring the Hysteria container up, installing docker-compose if needed.
pub fn compose_up(runner: &dyn CommandRunner) -> Result<(), CommandError> {
    let installed = COMPOSE_PATHS.iter().any(|p| Path::new(p).exists());
    compose_up_inner(runner, installed)
}

fn compose_up_inner(runner: &dyn CommandRunner, installed: bool) -> Result<(), CommandError> {
    if !installed {
        warn!(version = COMPOSE_VERSION, "docker-compose not found, installing");
        runner.run(&format!(
            "curl -SL https://github.com/docker/compose/releases/download/v{COMPOSE_VERSION}/docker-compose-linux-x86_64 -o /usr/local/bin/docker-compose"
        ))?;
        runner.run("chmod +x /usr/local/bin/docker-compose")?;
        runner.run("ln -s /usr/local/bin/docker-compose /usr/bin/docker-compose")?;
    }

    runner.run(&format!("docker-compose -f {COMPOSE_FILE} up -d"))?;
    runner.run("docker-compose restart")?;

    info!("hysteria container is up");
    Ok(())
}
