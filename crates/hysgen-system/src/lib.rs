//! System collaborators for the Hysteria setup wizard
//!
//! Everything here is an external edge with a narrow interface: shelling
//! out to the package manager, openssl, acme.sh, docker and
//! docker-compose, plus rendering and writing the generated config files.
//! All subprocess work goes through the [`runner::CommandRunner`] seam so
//! the callers stay testable without touching the host.

mod distro;
mod docker;
mod render;
mod runner;
mod tls;

pub use distro::{Distro, DistroError, install_dependencies, kernel};
pub use docker::{COMPOSE_FILE, compose_file, compose_up, ensure_docker};
pub use render::{
    CLIENT_CONFIG_FILE, SERVER_CONFIG_FILE, client_config_json, server_config_json,
    write_client_config, write_compose_file, write_server_config,
};
pub use runner::{CommandError, CommandRunner, ShellRunner};
pub use tls::OpensslCertTool;
