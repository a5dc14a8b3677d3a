//! Certificate tool over the command runner
//!
//! Implements the pipeline's [`CertTool`] seam with openssl (self-signed
//! branch) and the acme.sh installer (ACME branch).

use crate::runner::CommandRunner;
use anyhow::Context;
use hysgen_config::{CertTool, SELF_SIGNED_CERT, SELF_SIGNED_KEY};
use tracing::info;

const ACME_INSTALL: &str = "curl https://get.acme.sh | sh";

/// openssl-backed certificate tool.
pub struct OpensslCertTool<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> OpensslCertTool<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }
}

impl CertTool for OpensslCertTool<'_> {
    fn generate_self_signed(&self, common_name: &str) -> anyhow::Result<()> {
        self.runner
            .run(&format!(
                "openssl ecparam -genkey -name prime256v1 -out {SELF_SIGNED_KEY}"
            ))
            .context("generating the EC private key failed")?;

        // 36500 days: effectively never expires.
        self.runner
            .run(&format!(
                "openssl req -new -x509 -days 36500 -key {SELF_SIGNED_KEY} -out {SELF_SIGNED_CERT} -subj '/CN={common_name}'"
            ))
            .context("issuing the self-signed certificate failed")?;

        info!(common_name, cert = SELF_SIGNED_CERT, key = SELF_SIGNED_KEY, "self-signed certificate ready");
        Ok(())
    }

    fn install_acme(&self) -> anyhow::Result<()> {
        self.runner
            .run(ACME_INSTALL)
            .context("installing acme.sh failed")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::RecordingRunner;

    #[test]
    fn test_self_signed_runs_keygen_then_issue() {
        let runner = RecordingRunner::default();

        OpensslCertTool::new(&runner)
            .generate_self_signed("www.bing.com")
            .unwrap();

        let commands = runner.commands.borrow();
        assert_eq!(commands.len(), 2);
        assert!(commands[0].contains("ecparam -genkey -name prime256v1"));
        assert!(commands[0].contains("private.key"));
        assert!(commands[1].contains("-x509 -days 36500"));
        assert!(commands[1].contains("/CN=www.bing.com"));
    }

    #[test]
    fn test_acme_install_command() {
        let runner = RecordingRunner::default();

        OpensslCertTool::new(&runner).install_acme().unwrap();

        assert_eq!(runner.commands.borrow()[0], "curl https://get.acme.sh | sh");
    }

    #[test]
    fn test_openssl_failure_surfaces() {
        let runner = RecordingRunner {
            fail_matching: Some("openssl"),
            ..Default::default()
        };

        let result = OpensslCertTool::new(&runner).generate_self_signed("www.bing.com");
        assert!(result.is_err());
    }
}
