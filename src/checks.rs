//! Conformance checks a development network must pass.
//!
//! Each check talks to the network only through [`NetworkClient`] and returns the first
//! deviation it finds as a [`NetworkCheckError`]. Nothing is retried.

use std::time::Duration;

use ethers::types::{Address, Transaction, TransactionReceipt, TxHash, U256, U64};
use tracing::{debug, info};

use crate::account::AccountFixture;
use crate::client::NetworkClient;
use crate::config::NetworkConfig;
use crate::constants;
use crate::errors::{ChainIdSource, NetworkCheckError};
use crate::types::{TransferIntent, TransferOutcome, WaitPolicy};

/// Floor for receipt polling, `tokio::time::interval` rejects a zero period.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Check the chain id both declared by `config` and reported live matches the known network's.
///
/// Returns the live chain id.
pub async fn check_chain_identity<C: NetworkClient + ?Sized>(
    config: &NetworkConfig,
    client: &C,
) -> Result<u64, NetworkCheckError> {
    let expected = config.expected_chain_id();
    if config.chain_id != expected {
        return Err(NetworkCheckError::ChainIdMismatch {
            origin: ChainIdSource::Declared,
            expected,
            actual: config.chain_id,
        });
    }

    let live = client.chain_id().await?;
    if live != expected {
        return Err(NetworkCheckError::ChainIdMismatch {
            origin: ChainIdSource::Live,
            expected,
            actual: live,
        });
    }
    info!(network = %config.network, chain_id = live, "chain identity matches");
    Ok(live)
}

/// Check `accounts` are exactly the fixture's accounts, in order.
pub fn check_account_provisioning(
    fixture: &AccountFixture,
    accounts: &[Address],
) -> Result<(), NetworkCheckError> {
    let expected = fixture.accounts();
    if accounts.len() != constants::EXPECTED_ACCOUNT_COUNT {
        return Err(NetworkCheckError::AccountCountMismatch {
            expected: constants::EXPECTED_ACCOUNT_COUNT,
            actual: accounts.len(),
        });
    }
    for (index, (account, actual)) in expected.iter().zip(accounts).enumerate() {
        if account.address != *actual {
            return Err(NetworkCheckError::AccountMismatch {
                index,
                role: account.role,
                expected: account.address,
                actual: *actual,
            });
        }
    }
    Ok(())
}

/// Fetch the wallet accounts from `client` and check them against `fixture`.
pub async fn check_wallet_accounts<C: NetworkClient + ?Sized>(
    fixture: &AccountFixture,
    client: &C,
) -> Result<Vec<Address>, NetworkCheckError> {
    let accounts = client.wallet_accounts().await?;
    check_account_provisioning(fixture, &accounts)?;
    info!(whale = %fixture.whale, user = %fixture.user, "wallet accounts match");
    Ok(accounts)
}

/// Poll for the receipt of `tx_hash` until it shows up or `policy.timeout` elapses.
pub async fn wait_for_receipt<C: NetworkClient + ?Sized>(
    client: &C,
    tx_hash: TxHash,
    policy: &WaitPolicy,
) -> Result<TransactionReceipt, NetworkCheckError> {
    let poll = async {
        let mut interval = tokio::time::interval(policy.poll_interval.max(MIN_POLL_INTERVAL));
        loop {
            interval.tick().await;
            if let Some(receipt) = client.transaction_receipt(tx_hash).await? {
                return Ok::<_, NetworkCheckError>(receipt);
            }
            debug!(?tx_hash, "receipt not available yet");
        }
    };
    tokio::time::timeout(policy.timeout, poll)
        .await
        .map_err(|_| NetworkCheckError::ReceiptTimeout {
            tx_hash,
            timeout: policy.timeout,
        })?
}

/// Apply the plain transfer rules to an included transaction: success status, exactly
/// [`constants::ETH_TRANSFER_GAS`] gas used and the submitted value on chain.
pub fn evaluate_transfer(
    intent: &TransferIntent,
    receipt: &TransactionReceipt,
    tx: &Transaction,
) -> Result<TransferOutcome, NetworkCheckError> {
    let tx_hash = receipt.transaction_hash;

    let status = receipt.status.ok_or(NetworkCheckError::MissingReceiptField {
        tx_hash,
        field: "status",
    })?;
    if status != U64::one() {
        return Err(NetworkCheckError::TransferReverted(tx_hash));
    }

    let gas_used = receipt.gas_used.ok_or(NetworkCheckError::MissingReceiptField {
        tx_hash,
        field: "gasUsed",
    })?;
    let expected_gas = U256::from(constants::ETH_TRANSFER_GAS);
    if gas_used != expected_gas {
        return Err(NetworkCheckError::UnexpectedGasUsed {
            tx_hash,
            expected: expected_gas,
            actual: gas_used,
        });
    }

    if tx.value != intent.value {
        return Err(NetworkCheckError::ValueMismatch {
            tx_hash,
            expected: intent.value,
            actual: tx.value,
        });
    }

    Ok(TransferOutcome {
        intent: *intent,
        tx_hash,
        gas_used,
        block_number: receipt.block_number,
    })
}

/// Submit `intent`, wait for inclusion, fetch the transaction back and evaluate it.
pub async fn check_transfer<C: NetworkClient + ?Sized>(
    client: &C,
    intent: &TransferIntent,
    policy: &WaitPolicy,
) -> Result<TransferOutcome, NetworkCheckError> {
    let tx_hash = client.send_transfer(intent).await?;
    debug!(?tx_hash, "waiting for transfer receipt");

    let receipt = wait_for_receipt(client, tx_hash, policy).await?;
    let tx = client
        .transaction(tx_hash)
        .await?
        .ok_or(NetworkCheckError::TransactionNotFound(tx_hash))?;

    let outcome = evaluate_transfer(intent, &receipt, &tx)?;
    info!(
        ?tx_hash,
        from = ?intent.from,
        to = ?intent.to,
        value = %intent.value,
        gas_used = %outcome.gas_used,
        "transfer included"
    );
    Ok(outcome)
}
