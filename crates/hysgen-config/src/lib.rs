//! Hysteria Setup Pipeline
//!
//! Turns raw interactive input into a syntactically valid, internally
//! consistent configuration bundle (port, password, certificate material,
//! transport protocol) for a Hysteria proxy server.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     Prompt Loop Driver                   │
//! │                                                          │
//! │  ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐  │
//! │  │   Cert   │  │ Protocol │  │   Port   │  │  Secret  │  │
//! │  │ Resolver │  │ Selector │  │Allocator │  │ Resolver │  │
//! │  └────┬─────┘  └────┬─────┘  └────┬─────┘  └────┬─────┘  │
//! │       └─────────────┴──────┬──────┴─────────────┘        │
//! │                            ▼                             │
//! │                 Configuration Assembler                  │
//! │          (ServerConfig, ClientConfig, share URL)         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything with a side effect wider than reading a line or probing
//! loopback sits behind a trait seam ([`cert::CertTool`],
//! [`port::PortProbe`]) so the pipeline is testable without touching the
//! system.

mod assemble;
mod cert;
mod error;
mod port;
mod prompt;
mod protocol;
mod secret;
pub mod validate;

pub use assemble::{Assembly, ClientConfig, ServerConfig, assemble};
pub use cert::{
    CertError, CertTool, CertificateBundle, CertificateResolver, SELF_SIGNED_CERT,
    SELF_SIGNED_DOMAIN, SELF_SIGNED_KEY,
};
pub use error::{PromptError, ValidationError};
pub use port::{MAX_PORT, PortAllocator, PortChoice, PortProbe, RANDOM_PORT_FLOOR, TcpProbe};
pub use prompt::Prompter;
pub use protocol::Protocol;
pub use secret::{Credential, MIN_PASSWORD_LEN};
