//! Port allocator
//!
//! Produces a usable listen port: either the user's value validated against
//! the 0..=65535 bound, or a random fallback in the safe band when the
//! input is empty. Every accepted port is probed on loopback; a bound port
//! is still accepted, the probe only feeds the "already in use" advisory.

use crate::error::ValidationError;
use crate::validate;
use rand::Rng;
use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::time::Duration;
use tracing::debug;

/// Upper bound of the valid port range.
pub const MAX_PORT: u16 = 65535;

/// Lower bound of the random fallback band.
pub const RANDOM_PORT_FLOOR: u16 = 2000;

/// An accepted listen port.
///
/// `in_use` is advisory only: the caller decides whether to warn, the
/// allocation itself never blocks on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortChoice {
    pub port: u16,
    pub in_use: bool,
}

/// Loopback liveness probe.
///
/// Behind a trait so the allocator can be exercised without opening
/// sockets.
pub trait PortProbe {
    fn is_in_use(&self, port: u16) -> bool;
}

/// Real probe: a short-timeout TCP connect against loopback.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

impl PortProbe for TcpProbe {
    fn is_in_use(&self, port: u16) -> bool {
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
        TcpStream::connect_timeout(&addr, self.timeout).is_ok()
    }
}

/// Port allocator over a liveness probe.
pub struct PortAllocator<'a> {
    probe: &'a dyn PortProbe,
}

impl<'a> PortAllocator<'a> {
    pub fn new(probe: &'a dyn PortProbe) -> Self {
        Self { probe }
    }

    /// Resolve a raw input line into a [`PortChoice`].
    ///
    /// Empty input draws uniformly from `[RANDOM_PORT_FLOOR, MAX_PORT]`.
    /// Anything else must parse and sit inside 0..=65535.
    pub fn resolve(&self, raw: &str) -> Result<PortChoice, ValidationError> {
        let port = if raw.is_empty() {
            let drawn = rand::thread_rng().gen_range(RANDOM_PORT_FLOOR..=MAX_PORT);
            debug!(port = drawn, "no port given, drew a random one");
            drawn
        } else {
            validate::port_in_range(raw)?
        };

        let in_use = self.probe.is_in_use(port);
        if in_use {
            debug!(port, "loopback probe found the port bound");
        }

        Ok(PortChoice { port, in_use })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverInUse;
    impl PortProbe for NeverInUse {
        fn is_in_use(&self, _port: u16) -> bool {
            false
        }
    }

    struct AlwaysInUse;
    impl PortProbe for AlwaysInUse {
        fn is_in_use(&self, _port: u16) -> bool {
            true
        }
    }

    #[test]
    fn test_explicit_port_accepted() {
        let allocator = PortAllocator::new(&NeverInUse);
        let choice = allocator.resolve("8443").unwrap();

        assert_eq!(choice.port, 8443);
        assert!(!choice.in_use);
    }

    #[test]
    fn test_bound_specific_errors() {
        let allocator = PortAllocator::new(&NeverInUse);

        assert_eq!(
            allocator.resolve("-5"),
            Err(ValidationError::BelowRange)
        );
        assert_eq!(
            allocator.resolve("70000"),
            Err(ValidationError::AboveRange { max: MAX_PORT })
        );
        assert_eq!(
            allocator.resolve("not-a-port"),
            Err(ValidationError::NotANumber)
        );
    }

    #[test]
    fn test_busy_port_is_advisory_not_fatal() {
        let allocator = PortAllocator::new(&AlwaysInUse);
        let choice = allocator.resolve("8080").unwrap();

        assert_eq!(choice.port, 8080);
        assert!(choice.in_use);
    }

    #[test]
    fn test_empty_input_draws_from_safe_band() {
        let allocator = PortAllocator::new(&NeverInUse);

        for _ in 0..1000 {
            let choice = allocator.resolve("").unwrap();
            assert!(choice.port >= RANDOM_PORT_FLOOR);
        }
    }

    #[test]
    fn test_random_fallback_spreads_over_the_band() {
        let allocator = PortAllocator::new(&NeverInUse);
        let midpoint = RANDOM_PORT_FLOOR + (MAX_PORT - RANDOM_PORT_FLOOR) / 2;

        let mut low = 0usize;
        let mut high = 0usize;
        for _ in 0..2000 {
            let choice = allocator.resolve("").unwrap();
            if choice.port < midpoint {
                low += 1;
            } else {
                high += 1;
            }
        }

        // Uniform over the band: both halves must be hit well away from
        // never or always.
        assert!(low > 600, "low half drawn only {low} times");
        assert!(high > 600, "high half drawn only {high} times");
    }
}
