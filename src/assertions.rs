//! Panicking wrappers around the checks, for use in test code.

use ethers::types::{Address, U256};

use crate::account::AccountFixture;
use crate::checks;
use crate::client::NetworkClient;
use crate::config::NetworkConfig;
use crate::types::{TransferIntent, TransferOutcome, WaitPolicy};

/// Assert declared and live chain id match the known network's chain id.
pub async fn assert_chain_id<C: NetworkClient + ?Sized>(config: &NetworkConfig, client: &C) {
    if let Err(e) = checks::check_chain_identity(config, client).await {
        panic!("chain identity check failed: {}", e);
    }
}

/// Assert the network's wallet accounts are exactly `[whale, user]`.
pub async fn assert_wallet_accounts<C: NetworkClient + ?Sized>(fixture: &AccountFixture, client: &C) {
    if let Err(e) = checks::check_wallet_accounts(fixture, client).await {
        panic!("wallet account check failed: {}", e);
    }
}

/// Assert `intent` executes as a successful plain transfer.
pub async fn assert_transfer<C: NetworkClient + ?Sized>(
    client: &C,
    intent: &TransferIntent,
    policy: &WaitPolicy,
) -> TransferOutcome {
    match checks::check_transfer(client, intent, policy).await {
        Ok(outcome) => outcome,
        Err(e) => panic!("transfer check failed ({:?}): {}", e.category(), e),
    }
}

/// Assert the latest balance of `address` equals `expected_balance`.
pub async fn assert_balance<C: NetworkClient + ?Sized>(
    client: &C,
    address: Address,
    expected_balance: U256,
) {
    let balance = client
        .balance(address)
        .await
        .unwrap_or_else(|e| panic!("failed to fetch balance of {:?}: {}", address, e));
    assert_eq!(balance, expected_balance, "unexpected balance of {:?}", address);
}
