//! Conformance checks for local EVM development networks.
//!
//! Verifies a running network reports the chain id its configuration names, provisions the
//! expected whale and user wallet accounts, and executes plain value transfers between them
//! for exactly 21000 gas.

pub mod account;
pub mod assertions;
pub mod checks;
pub mod client;
pub mod config;
pub mod constants;
pub mod errors;
pub mod network;
pub mod suite;
pub mod types;
pub mod utils;

pub use crate::account::{AccountFixture, AccountRole, TestAccount};
pub use crate::client::NetworkClient;
pub use crate::config::{AccountSource, ConformanceConfig, KnownNetwork, NetworkConfig};
pub use crate::errors::{ChainIdSource, FailureCategory, NetworkCheckError};
pub use crate::network::{RpcNetwork, WalletHandle};
pub use crate::suite::{CheckDetail, CheckOutcome, ConformanceReport, ConformanceSuite};
pub use crate::types::{TransferIntent, TransferOutcome, WaitPolicy};
