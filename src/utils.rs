//! General utility function for module.

use ethers::types::Address;
use tracing_subscriber::EnvFilter;

use crate::errors::NetworkCheckError;

/// Parse a `0x` prefixed (or bare) hex address.
pub fn parse_address(raw: &str) -> Result<Address, NetworkCheckError> {
    raw.trim()
        .parse::<Address>()
        .map_err(|_| NetworkCheckError::InvalidAddress(raw.to_string()))
}

/// Strips surrounding whitespace and an optional `0x` prefix from a hex private key.
pub fn normalize_private_key(raw: &str) -> &str {
    let key = raw.trim();
    key.strip_prefix("0x").unwrap_or(key)
}

/// Install a global `tracing` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once, later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
