//! Shared value types.

use std::time::Duration;

use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Provider};
use ethers::signers::LocalWallet;
use ethers::types::{Address, TxHash, U256, U64};

use crate::constants;

pub type EthRpcClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// A single native value transfer to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferIntent {
    pub from: Address,
    pub to: Address,
    /// Amount in wei
    pub value: U256,
}

impl TransferIntent {
    pub fn new(from: Address, to: Address, value: impl Into<U256>) -> Self {
        Self { from, to, value: value.into() }
    }
}

/// Result of a transfer that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub intent: TransferIntent,
    pub tx_hash: TxHash,
    pub gas_used: U256,
    /// Block the transaction was included in, if the node reported it
    pub block_number: Option<U64>,
}

/// How long and how often to poll for a transaction receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(constants::DEFAULT_RECEIPT_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(constants::DEFAULT_POLL_INTERVAL_MS),
        }
    }
}
