//! Error types for the network conformance checks

use std::fmt;
use std::time::Duration;

use ethers::types::{Address, TxHash, U256};

use crate::account::AccountRole;

/// Where a mismatching chain identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainIdSource {
    /// Chain id declared in the network configuration
    Declared,
    /// Chain id reported by the running node
    Live,
}

impl fmt::Display for ChainIdSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainIdSource::Declared => write!(f, "declared"),
            ChainIdSource::Live => write!(f, "live"),
        }
    }
}

/// Broad classes of failure, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// Unknown network, unreadable config, missing keys
    Configuration,
    /// Chain id or account set differ from expectations
    ConfigurationMismatch,
    /// Transaction did not execute as a plain successful transfer
    TransactionFailure,
    /// Gas used differs from a plain value transfer
    GasAnomaly,
    /// Receipt never arrived
    Timeout,
    /// RPC, connection or signing failure
    Transport,
}

#[derive(thiserror::Error, Debug)]
pub enum NetworkCheckError {
    #[error("unknown network `{0}`, expected one of: hardhat, kvtool")]
    UnknownNetwork(String),
    #[error("network `{0}` is not present in configuration")]
    NetworkNotConfigured(String),
    #[error("failed to read config file: {0}")]
    ConfigRead(String),
    #[error("failed to parse config: {0}")]
    ConfigParse(String),
    #[error("invalid address `{0}`")]
    InvalidAddress(String),
    #[error("private key environment variable `{0}` is not set")]
    MissingPrivateKey(String),
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("failed to instantiate RPC client: {0}")]
    FailedToCreateRpcClient(String),
    #[error("rpc call failed: {0}")]
    RpcCall(String),
    #[error("no wallet available for account {0:?}")]
    NoWalletForAccount(Address),
    #[error("sending transaction failed: {0}")]
    FailedToSendTransaction(String),
    #[error("timed out after {timeout:?} waiting for receipt of {tx_hash:?}")]
    ReceiptTimeout { tx_hash: TxHash, timeout: Duration },
    #[error("transaction {0:?} not found")]
    TransactionNotFound(TxHash),
    #[error("{origin} chain id is {actual}, expected {expected}")]
    ChainIdMismatch {
        origin: ChainIdSource,
        expected: u64,
        actual: u64,
    },
    #[error("expected {expected} wallet accounts, found {actual}")]
    AccountCountMismatch { expected: usize, actual: usize },
    #[error("wallet account {index} ({role}) is {actual:?}, expected {expected:?}")]
    AccountMismatch {
        index: usize,
        role: AccountRole,
        expected: Address,
        actual: Address,
    },
    #[error("transaction {0:?} was included but did not succeed")]
    TransferReverted(TxHash),
    #[error("receipt of {tx_hash:?} has no `{field}` field")]
    MissingReceiptField { tx_hash: TxHash, field: &'static str },
    #[error("transaction {tx_hash:?} used {actual} gas, expected {expected}")]
    UnexpectedGasUsed {
        tx_hash: TxHash,
        expected: U256,
        actual: U256,
    },
    #[error("transaction {tx_hash:?} carries value {actual}, expected {expected}")]
    ValueMismatch {
        tx_hash: TxHash,
        expected: U256,
        actual: U256,
    },
}

impl NetworkCheckError {
    /// Classify the error for reporting.
    pub fn category(&self) -> FailureCategory {
        use NetworkCheckError::*;
        match self {
            UnknownNetwork(_)
            | NetworkNotConfigured(_)
            | ConfigRead(_)
            | ConfigParse(_)
            | InvalidAddress(_)
            | MissingPrivateKey(_)
            | InvalidPrivateKey(_) => FailureCategory::Configuration,
            ChainIdMismatch { .. } | AccountCountMismatch { .. } | AccountMismatch { .. } => {
                FailureCategory::ConfigurationMismatch
            }
            TransferReverted(_)
            | MissingReceiptField { .. }
            | ValueMismatch { .. }
            | TransactionNotFound(_) => FailureCategory::TransactionFailure,
            UnexpectedGasUsed { .. } => FailureCategory::GasAnomaly,
            ReceiptTimeout { .. } => FailureCategory::Timeout,
            FailedToCreateRpcClient(_)
            | RpcCall(_)
            | NoWalletForAccount(_)
            | FailedToSendTransaction(_) => FailureCategory::Transport,
        }
    }
}
