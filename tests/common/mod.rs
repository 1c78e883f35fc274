//! In-memory network used to exercise the checks without a node.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use ethers::types::{Address, Transaction, TransactionReceipt, TxHash, U256};
use evm_network_check::{
    AccountFixture, KnownNetwork, NetworkCheckError, NetworkClient, NetworkConfig, TransferIntent,
};

pub fn fixture() -> AccountFixture {
    AccountFixture::new(Address::from_low_u64_be(0xa1), Address::from_low_u64_be(0xb2))
}

pub fn hardhat_config() -> NetworkConfig {
    NetworkConfig::for_network(KnownNetwork::Hardhat)
}

#[derive(Default)]
struct Ledger {
    next_nonce: u64,
    sent: HashMap<TxHash, TransferIntent>,
    balances: HashMap<Address, U256>,
    polls: HashMap<TxHash, usize>,
}

/// Network that includes every transfer after a configurable number of receipt polls.
pub struct FakeNetwork {
    pub chain_id: u64,
    pub accounts: Vec<Address>,
    pub status: u64,
    pub gas_used: u64,
    /// Value the node reports for every transaction instead of the submitted one
    pub value_override: Option<U256>,
    /// Receipt polls answered with `None` before the receipt shows up
    pub pending_polls: usize,
    pub never_include: bool,
    ledger: Mutex<Ledger>,
}

impl FakeNetwork {
    /// A network that behaves like a conforming hardhat node for [`fixture`].
    pub fn conforming() -> Self {
        let fixture = fixture();
        Self {
            chain_id: 31337,
            accounts: vec![fixture.whale.address, fixture.user.address],
            status: 1,
            gas_used: 21_000,
            value_override: None,
            pending_polls: 0,
            never_include: false,
            ledger: Mutex::new(Ledger::default()),
        }
    }

    /// Credit `address` with `amount` wei.
    pub fn fund(&self, address: Address, amount: U256) {
        let mut ledger = self.ledger.lock().unwrap();
        *ledger.balances.entry(address).or_default() += amount;
    }

    pub fn sent_count(&self) -> usize {
        self.ledger.lock().unwrap().sent.len()
    }

    pub fn polls_for(&self, tx_hash: TxHash) -> usize {
        self.ledger.lock().unwrap().polls.get(&tx_hash).copied().unwrap_or(0)
    }
}

#[async_trait]
impl NetworkClient for FakeNetwork {
    async fn chain_id(&self) -> Result<u64, NetworkCheckError> {
        Ok(self.chain_id)
    }

    async fn wallet_accounts(&self) -> Result<Vec<Address>, NetworkCheckError> {
        Ok(self.accounts.clone())
    }

    async fn send_transfer(&self, intent: &TransferIntent) -> Result<TxHash, NetworkCheckError> {
        if !self.accounts.contains(&intent.from) {
            return Err(NetworkCheckError::NoWalletForAccount(intent.from));
        }
        let mut ledger = self.ledger.lock().unwrap();
        ledger.next_nonce += 1;
        let tx_hash = TxHash::from_low_u64_be(ledger.next_nonce);
        ledger.sent.insert(tx_hash, *intent);
        // gas is not charged
        let sender = ledger.balances.entry(intent.from).or_default();
        *sender = sender.saturating_sub(intent.value);
        *ledger.balances.entry(intent.to).or_default() += intent.value;
        Ok(tx_hash)
    }

    async fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, NetworkCheckError> {
        let mut ledger = self.ledger.lock().unwrap();
        if !ledger.sent.contains_key(&tx_hash) {
            return Ok(None);
        }
        let polls = ledger.polls.entry(tx_hash).or_insert(0);
        *polls += 1;
        if self.never_include || *polls <= self.pending_polls {
            return Ok(None);
        }
        Ok(Some(TransactionReceipt {
            transaction_hash: tx_hash,
            status: Some(self.status.into()),
            gas_used: Some(self.gas_used.into()),
            block_number: Some(1u64.into()),
            ..Default::default()
        }))
    }

    async fn balance(&self, address: Address) -> Result<U256, NetworkCheckError> {
        let ledger = self.ledger.lock().unwrap();
        Ok(ledger.balances.get(&address).copied().unwrap_or_default())
    }

    async fn transaction(&self, tx_hash: TxHash) -> Result<Option<Transaction>, NetworkCheckError> {
        let ledger = self.ledger.lock().unwrap();
        Ok(ledger.sent.get(&tx_hash).map(|intent| Transaction {
            hash: tx_hash,
            from: intent.from,
            to: Some(intent.to),
            value: self.value_override.unwrap_or(intent.value),
            ..Default::default()
        }))
    }
}
