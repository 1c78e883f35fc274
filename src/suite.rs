//! Full conformance run over a single network.

use std::fmt;

use ethers::types::{Address, U256};
use tracing::{error, info};

use crate::account::{AccountFixture, AccountRole};
use crate::checks;
use crate::client::NetworkClient;
use crate::config::{KnownNetwork, NetworkConfig};
use crate::constants;
use crate::errors::NetworkCheckError;
use crate::types::{TransferIntent, TransferOutcome, WaitPolicy};

/// What a passing check observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckDetail {
    ChainId(u64),
    Accounts(Vec<Address>),
    Transfer(TransferOutcome),
}

impl fmt::Display for CheckDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckDetail::ChainId(chain_id) => write!(f, "chain id {}", chain_id),
            CheckDetail::Accounts(accounts) => write!(f, "{} accounts", accounts.len()),
            CheckDetail::Transfer(outcome) => {
                write!(f, "tx {:?}, gas used {}", outcome.tx_hash, outcome.gas_used)
            }
        }
    }
}

#[derive(Debug)]
pub struct CheckOutcome {
    pub name: String,
    pub result: Result<CheckDetail, NetworkCheckError>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcome of every check of a run, in execution order.
#[derive(Debug)]
pub struct ConformanceReport {
    pub network: KnownNetwork,
    pub outcomes: Vec<CheckOutcome>,
}

impl ConformanceReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(CheckOutcome::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed())
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "network {}:", self.network)?;
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(detail) => writeln!(f, "  ok   {}: {}", outcome.name, detail)?,
                Err(e) => writeln!(f, "  FAIL {}: {} ({:?})", outcome.name, e, e.category())?,
            }
        }
        let failed = self.failures().count();
        write!(f, "{} passed, {} failed", self.outcomes.len() - failed, failed)
    }
}

/// Chain identity, account provisioning and both transfer directions against one network.
#[derive(Debug, Clone)]
pub struct ConformanceSuite {
    network: NetworkConfig,
    fixture: AccountFixture,
    wait: WaitPolicy,
    transfer_value: U256,
}

impl ConformanceSuite {
    pub fn new(network: NetworkConfig, fixture: AccountFixture, wait: WaitPolicy) -> Self {
        Self {
            network,
            fixture,
            wait,
            transfer_value: U256::from(constants::DEFAULT_TRANSFER_VALUE_WEI),
        }
    }

    /// Override the amount sent in each transfer (1 wei by default).
    pub fn with_transfer_value(mut self, value: impl Into<U256>) -> Self {
        self.transfer_value = value.into();
        self
    }

    /// Transfers to run, whale to user then user to whale.
    pub fn transfer_intents(&self) -> [(AccountRole, TransferIntent); 2] {
        [(AccountRole::Whale, AccountRole::User), (AccountRole::User, AccountRole::Whale)].map(
            |(from, to)| {
                let intent = TransferIntent::new(
                    self.fixture.account(from).address,
                    self.fixture.account(to).address,
                    self.transfer_value,
                );
                (from, intent)
            },
        )
    }

    /// Run every check in order. A failing check does not stop the ones after it.
    pub async fn run<C: NetworkClient + ?Sized>(&self, client: &C) -> ConformanceReport {
        info!(network = %self.network.network, "running conformance checks");
        let mut outcomes = Vec::new();

        let chain_id = checks::check_chain_identity(&self.network, client)
            .await
            .map(CheckDetail::ChainId);
        outcomes.push(Self::record("chain identity", chain_id));

        let accounts = checks::check_wallet_accounts(&self.fixture, client)
            .await
            .map(CheckDetail::Accounts);
        outcomes.push(Self::record("wallet accounts", accounts));

        for (role, intent) in self.transfer_intents() {
            let transfer = checks::check_transfer(client, &intent, &self.wait)
                .await
                .map(CheckDetail::Transfer);
            outcomes.push(Self::record(&format!("{} transfer", role), transfer));
        }

        ConformanceReport {
            network: self.network.network,
            outcomes,
        }
    }

    fn record(name: &str, result: Result<CheckDetail, NetworkCheckError>) -> CheckOutcome {
        if let Err(e) = &result {
            error!(check = name, category = ?e.category(), "{}", e);
        }
        CheckOutcome {
            name: name.to_string(),
            result,
        }
    }
}
