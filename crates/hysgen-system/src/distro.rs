//! Distro detection and dependency install
//!
//! Reads `/etc/os-release` to decide which package manager installs the
//! wizard's host dependencies. Anything that is not a known Linux distro
//! is fatal: the generated setup only runs on Linux hosts.

use crate::runner::{CommandError, CommandRunner};
use std::fs;
use tracing::{info, warn};

const OS_RELEASE: &str = "/etc/os-release";

/// Host packages needed by the generated setup.
const PACKAGES: &str = "lsof curl iptables-persistent";

#[derive(Debug, thiserror::Error)]
pub enum DistroError {
    #[error("OS not detected, make sure to use a linux based os")]
    Unsupported,

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Detected Linux distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distro {
    pub name: String,
}

impl Distro {
    /// Detect the running distro from `/etc/os-release`.
    pub fn detect() -> Result<Self, DistroError> {
        let contents = fs::read_to_string(OS_RELEASE).map_err(|_| DistroError::Unsupported)?;
        Self::from_os_release(&contents).ok_or(DistroError::Unsupported)
    }

    /// Parse the `NAME=` field out of os-release contents.
    fn from_os_release(contents: &str) -> Option<Self> {
        for line in contents.lines() {
            if let Some(value) = line.strip_prefix("NAME=") {
                return Some(Self {
                    name: value.trim().trim_matches('"').to_string(),
                });
            }
        }
        None
    }

    fn is_apt_based(&self) -> bool {
        matches!(self.name.as_str(), "Ubuntu" | "Debian GNU/Linux")
    }

    fn is_yum_based(&self) -> bool {
        matches!(self.name.as_str(), "CentOS Linux" | "Fedora" | "Fedora Linux")
    }
}

/// Install the host dependencies with the distro's package manager.
pub fn install_dependencies(runner: &dyn CommandRunner, distro: &Distro) -> Result<(), DistroError> {
    if distro.is_apt_based() {
        info!(distro = %distro.name, "installing dependencies with apt");
        runner.run(&format!("apt install -y {PACKAGES}"))?;
    } else if distro.is_yum_based() {
        info!(distro = %distro.name, "installing dependencies with yum");
        runner.run(&format!("yum -y install {PACKAGES}"))?;
    } else {
        warn!(distro = %distro.name, "unknown package manager, skipping dependency install");
    }
    Ok(())
}

/// Kernel identification string, as reported by `uname`.
pub fn kernel(runner: &dyn CommandRunner) -> Result<String, CommandError> {
    runner.output("uname -s -r -p")
}
