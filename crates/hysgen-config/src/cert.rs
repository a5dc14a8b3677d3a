//! Certificate resolver
//!
//! Three mutually exclusive strategies behind one menu, all resolving to a
//! uniform [`CertificateBundle`]:
//!
//! - self-signed: the external tool generates an EC key and a 100-year
//!   certificate for a fixed common name;
//! - ACME: the external installer takes over issuance, only the domain and
//!   the insecure flag are resolved here;
//! - custom paths: the user points at existing cert/key files.
//!
//! Bad paths are recoverable and re-ask the same question; they never
//! restart port or protocol selection. Tool failures propagate.

use crate::error::PromptError;
use crate::prompt::Prompter;
use crate::validate;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

/// File the self-signed certificate is written to.
pub const SELF_SIGNED_CERT: &str = "cert.crt";
/// File the self-signed private key is written to.
pub const SELF_SIGNED_KEY: &str = "private.key";
/// Common name of the self-signed certificate.
pub const SELF_SIGNED_DOMAIN: &str = "www.bing.com";

/// Resolved certificate material.
///
/// `cert_path`/`key_path` are `None` for the ACME strategy, where the
/// automation script owns the files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateBundle {
    pub cert_path: Option<PathBuf>,
    pub key_path: Option<PathBuf>,
    pub domain: String,
    pub insecure: bool,
}

/// External key/certificate collaborator.
///
/// Implemented over the system command runner; the resolver itself never
/// spawns processes.
pub trait CertTool {
    /// Generate a self-signed EC key and certificate for `common_name`.
    fn generate_self_signed(&self, common_name: &str) -> anyhow::Result<()>;

    /// Install the ACME automation script.
    fn install_acme(&self) -> anyhow::Result<()>;
}

#[derive(Debug, thiserror::Error)]
pub enum CertError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("certificate tool failed: {0:#}")]
    Tool(anyhow::Error),
}

/// Certificate strategy resolver over a [`CertTool`].
pub struct CertificateResolver<'a> {
    tool: &'a dyn CertTool,
}

impl<'a> CertificateResolver<'a> {
    pub fn new(tool: &'a dyn CertTool) -> Self {
        Self { tool }
    }

    /// Run the strategy menu and resolve a bundle.
    pub fn resolve<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<CertificateBundle, CertError> {
        let options = [
            "www.bing.com self-signed certificate",
            "Acme one-click certificate application script (supports regular port 80 mode and dns api mode)",
            "Custom certificate path",
        ];
        let choice = prompter.choose("Select an option:", &options)?;

        match choice {
            0 => self.self_signed(),
            1 => self.acme(prompter),
            _ => Self::custom_paths(prompter),
        }
    }

    fn self_signed(&self) -> Result<CertificateBundle, CertError> {
        info!(common_name = SELF_SIGNED_DOMAIN, "generating self-signed certificate");
        self.tool
            .generate_self_signed(SELF_SIGNED_DOMAIN)
            .map_err(CertError::Tool)?;

        Ok(CertificateBundle {
            cert_path: Some(PathBuf::from(SELF_SIGNED_CERT)),
            key_path: Some(PathBuf::from(SELF_SIGNED_KEY)),
            domain: SELF_SIGNED_DOMAIN.to_string(),
            insecure: true,
        })
    }

    fn acme<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<CertificateBundle, CertError> {
        info!("delegating certificate issuance to acme.sh");
        self.tool.install_acme().map_err(CertError::Tool)?;

        // acme.sh manages the cert/key files from here on; the domain is
        // still needed for the client config and the share URL.
        let domain = prompter.ask("Please enter the resolved domain name: ", |raw| {
            Ok(raw.to_string())
        })?;

        Ok(CertificateBundle {
            cert_path: None,
            key_path: None,
            domain,
            insecure: false,
        })
    }

    fn custom_paths<R: BufRead, W: Write>(
        prompter: &mut Prompter<R, W>,
    ) -> Result<CertificateBundle, CertError> {
        let cert_path = prompter.ask(
            "Enter the path of the public key file crt (/etc/key/cert.crt): ",
            validate::existing_path,
        )?;
        let key_path = prompter.ask(
            "Enter the path of the key file (/etc/key/private.key): ",
            validate::existing_path,
        )?;
        // Accepted verbatim, no format validation.
        let domain = prompter.ask("Please enter the resolved domain name: ", |raw| {
            Ok(raw.to_string())
        })?;

        Ok(CertificateBundle {
            cert_path: Some(cert_path),
            key_path: Some(key_path),
            domain,
            // A user-supplied certificate implies verifiable trust.
            insecure: false,
        })
    }
}
