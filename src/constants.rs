//! Well-known values for local EVM development networks.

/// Chain identifier of a local hardhat network.
pub const HARDHAT_CHAIN_ID: u64 = 31337;
/// Chain identifier of a kvtool (kava) local network.
pub const KVTOOL_CHAIN_ID: u64 = 8888;

/// Default JSON-RPC endpoint of a local node.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
/// File name for default network configuration, looked up under `configs/`.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "networks.json";
/// Network selected when none is given.
pub const DEFAULT_NETWORK_NAME: &str = "hardhat";

/// Pre-funded whale account of the development networks.
pub const DEFAULT_WHALE_ADDRESS: &str = "0x03db6b11F47d074a532b9eb8a98aB7AdA5845087";
/// Pre-funded user account of the development networks.
pub const DEFAULT_USER_ADDRESS: &str = "0x7Bbf300890857b8c241b219C6a489431669b3aFA";
/// Number of wallet accounts a conforming network provisions.
pub const EXPECTED_ACCOUNT_COUNT: usize = 2;

/// Gas used by a plain value transfer to an account without code.
pub const ETH_TRANSFER_GAS: u64 = 21_000;
/// Amount of wei sent in each conformance transfer.
pub const DEFAULT_TRANSFER_VALUE_WEI: u64 = 1;

/// Upper bound on waiting for a transaction receipt.
pub const DEFAULT_RECEIPT_TIMEOUT_SECS: u64 = 60;
/// Interval between receipt polls (and provider polling).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Environment variable naming the network to check.
pub const NETWORK_ENV_VAR: &str = "NETWORK_CHECK_NETWORK";
/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV_VAR: &str = "NETWORK_CHECK_CONFIG";
