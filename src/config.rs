//! Network configuration.
//!
//! Every network the checks can run against is listed in [`KnownNetwork`], together with the
//! chain id it must report. A [`ConformanceConfig`] is read from a JSON file under `configs/`
//! and describes where each network lives and how its wallet accounts are obtained.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::account::AccountFixture;
use crate::constants;
use crate::errors::NetworkCheckError;
use crate::types::WaitPolicy;

/// Development networks the checks know the expected chain id of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KnownNetwork {
    Hardhat,
    Kvtool,
}

impl KnownNetwork {
    pub const ALL: [KnownNetwork; 2] = [KnownNetwork::Hardhat, KnownNetwork::Kvtool];

    pub fn name(&self) -> &'static str {
        match self {
            KnownNetwork::Hardhat => "hardhat",
            KnownNetwork::Kvtool => "kvtool",
        }
    }

    /// Chain id the network must report.
    pub fn expected_chain_id(&self) -> u64 {
        match self {
            KnownNetwork::Hardhat => constants::HARDHAT_CHAIN_ID,
            KnownNetwork::Kvtool => constants::KVTOOL_CHAIN_ID,
        }
    }
}

impl FromStr for KnownNetwork {
    type Err = NetworkCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnownNetwork::ALL
            .into_iter()
            .find(|network| network.name() == s)
            .ok_or_else(|| NetworkCheckError::UnknownNetwork(s.to_string()))
    }
}

impl fmt::Display for KnownNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the wallet accounts of a network come from.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum AccountSource {
    /// Accounts unlocked on the node itself (`eth_accounts`), sent unsigned.
    #[default]
    Node,
    /// Hex private keys, signed locally.
    Keys { private_keys: Vec<String> },
    /// Names of environment variables holding hex private keys, signed locally.
    Env { vars: Vec<String> },
}

impl AccountSource {
    /// Private keys for locally signing sources, `None` for node managed accounts.
    pub fn private_keys(&self) -> Result<Option<Vec<String>>, NetworkCheckError> {
        match self {
            AccountSource::Node => Ok(None),
            AccountSource::Keys { private_keys } => Ok(Some(private_keys.clone())),
            AccountSource::Env { vars } => vars
                .iter()
                .map(|var| {
                    std::env::var(var).map_err(|_| NetworkCheckError::MissingPrivateKey(var.clone()))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
        }
    }
}

// Keys never end up in logs.
impl fmt::Debug for AccountSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountSource::Node => write!(f, "Node"),
            AccountSource::Keys { private_keys } => write!(f, "Keys({} keys)", private_keys.len()),
            AccountSource::Env { vars } => f.debug_struct("Env").field("vars", vars).finish(),
        }
    }
}

/// Configuration of the network a conformance run targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub network: KnownNetwork,
    /// Chain id the configuration declares for the network
    pub chain_id: u64,
    /// JSON-RPC endpoint of a node on the network
    pub rpc_url: String,
    pub accounts: AccountSource,
    /// Provider polling interval
    pub poll_interval: Duration,
}

impl NetworkConfig {
    /// Configuration with the defaults for `network`: local RPC, node managed accounts.
    pub fn for_network(network: KnownNetwork) -> Self {
        Self {
            network,
            chain_id: network.expected_chain_id(),
            rpc_url: constants::DEFAULT_RPC_URL.to_string(),
            accounts: AccountSource::Node,
            poll_interval: Duration::from_millis(constants::DEFAULT_POLL_INTERVAL_MS),
        }
    }

    pub fn expected_chain_id(&self) -> u64 {
        self.network.expected_chain_id()
    }
}

/// Network entry of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEntry {
    pub chain_id: u64,
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default)]
    pub accounts: AccountSource,
}

/// Expected account addresses, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureEntry {
    pub whale: String,
    pub user: String,
}

impl Default for FixtureEntry {
    fn default() -> Self {
        Self {
            whale: constants::DEFAULT_WHALE_ADDRESS.to_string(),
            user: constants::DEFAULT_USER_ADDRESS.to_string(),
        }
    }
}

/// Contents of a network configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceConfig {
    pub networks: BTreeMap<String, NetworkEntry>,
    #[serde(default)]
    pub fixture: FixtureEntry,
    #[serde(default = "default_receipt_timeout_secs")]
    pub receipt_timeout_secs: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_rpc_url() -> String {
    constants::DEFAULT_RPC_URL.to_string()
}

fn default_receipt_timeout_secs() -> u64 {
    constants::DEFAULT_RECEIPT_TIMEOUT_SECS
}

fn default_poll_interval_ms() -> u64 {
    constants::DEFAULT_POLL_INTERVAL_MS
}

impl Default for ConformanceConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(
            KnownNetwork::Hardhat.name().to_string(),
            NetworkEntry {
                chain_id: constants::HARDHAT_CHAIN_ID,
                rpc_url: default_rpc_url(),
                accounts: AccountSource::Node,
            },
        );
        networks.insert(
            KnownNetwork::Kvtool.name().to_string(),
            NetworkEntry {
                chain_id: constants::KVTOOL_CHAIN_ID,
                rpc_url: default_rpc_url(),
                accounts: AccountSource::Env {
                    vars: vec!["WHALE_PRIVATE_KEY".to_string(), "USER_PRIVATE_KEY".to_string()],
                },
            },
        );
        Self {
            networks,
            fixture: FixtureEntry::default(),
            receipt_timeout_secs: default_receipt_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl ConformanceConfig {
    /// Parse configuration from JSON, rejecting networks without a known chain id.
    pub fn from_json_str(raw: &str) -> Result<Self, NetworkCheckError> {
        let config: ConformanceConfig =
            serde_json::from_str(raw).map_err(|e| NetworkCheckError::ConfigParse(e.to_string()))?;
        for name in config.networks.keys() {
            KnownNetwork::from_str(name)?;
        }
        if config.poll_interval_ms == 0 {
            return Err(NetworkCheckError::ConfigParse(
                "poll_interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// Read configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NetworkCheckError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| NetworkCheckError::ConfigRead(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "loaded network configuration");
        Self::from_json_str(&raw)
    }

    /// Read configuration from the file named by `NETWORK_CHECK_CONFIG`, else from
    /// `configs/networks.json` if present, else fall back to the built-in defaults.
    pub fn load_default() -> Result<Self, NetworkCheckError> {
        if let Ok(path) = std::env::var(constants::CONFIG_ENV_VAR) {
            return Self::load(path);
        }
        let default_path = Path::new("configs").join(constants::DEFAULT_CONFIG_FILE_NAME);
        if default_path.exists() {
            return Self::load(default_path);
        }
        debug!("no configuration file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Resolve the configuration of network `name`.
    ///
    /// Fails with [`NetworkCheckError::UnknownNetwork`] for names without an expected chain id
    /// and [`NetworkCheckError::NetworkNotConfigured`] for known networks missing from the file.
    pub fn network(&self, name: &str) -> Result<NetworkConfig, NetworkCheckError> {
        let network = KnownNetwork::from_str(name)?;
        let entry = self
            .networks
            .get(network.name())
            .ok_or_else(|| NetworkCheckError::NetworkNotConfigured(name.to_string()))?;
        Ok(NetworkConfig {
            network,
            chain_id: entry.chain_id,
            rpc_url: entry.rpc_url.clone(),
            accounts: entry.accounts.clone(),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        })
    }

    pub fn fixture(&self) -> Result<AccountFixture, NetworkCheckError> {
        AccountFixture::from_hex(&self.fixture.whale, &self.fixture.user)
    }

    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy {
            timeout: Duration::from_secs(self.receipt_timeout_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}
