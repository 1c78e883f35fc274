//!

mod common;

use std::time::Duration;

use ethers::types::{Address, TxHash, U256};
use evm_network_check::assertions::assert_balance;
use evm_network_check::checks;
use evm_network_check::{
    ChainIdSource, CheckDetail, ConformanceSuite, FailureCategory, NetworkCheckError, NetworkClient,
    TransferIntent, WaitPolicy,
};

use common::{fixture, hardhat_config, FakeNetwork};

fn fast_wait() -> WaitPolicy {
    WaitPolicy {
        timeout: Duration::from_secs(5),
        poll_interval: Duration::from_millis(100),
    }
}

fn suite() -> ConformanceSuite {
    ConformanceSuite::new(hardhat_config(), fixture(), fast_wait())
}

#[tokio::test]
async fn conforming_network_passes_every_check() {
    let network = FakeNetwork::conforming();
    let report = suite().run(&network).await;

    assert!(report.is_success(), "{}", report);
    let names: Vec<_> = report.outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(
        names,
        ["chain identity", "wallet accounts", "whale transfer", "user transfer"]
    );
    assert!(matches!(report.outcomes[0].result, Ok(CheckDetail::ChainId(31337))));
    assert_eq!(network.sent_count(), 2);
}

#[tokio::test]
async fn transfers_run_in_both_directions() {
    let fixture = fixture();
    let network = FakeNetwork::conforming();
    let report = suite().run(&network).await;

    let transfers: Vec<_> = report
        .outcomes
        .iter()
        .filter_map(|o| match &o.result {
            Ok(CheckDetail::Transfer(outcome)) => Some(outcome.intent),
            _ => None,
        })
        .collect();
    assert_eq!(
        transfers,
        vec![
            TransferIntent::new(fixture.whale.address, fixture.user.address, 1u64),
            TransferIntent::new(fixture.user.address, fixture.whale.address, 1u64),
        ]
    );
}

#[tokio::test]
async fn live_chain_id_mismatch_is_reported_and_run_continues() {
    let mut network = FakeNetwork::conforming();
    network.chain_id = 8888;
    let report = suite().run(&network).await;

    assert!(!report.is_success());
    assert_eq!(report.failures().count(), 1);
    match &report.outcomes[0].result {
        Err(e @ NetworkCheckError::ChainIdMismatch { origin, expected, actual }) => {
            assert_eq!(*origin, ChainIdSource::Live);
            assert_eq!(*expected, 31337);
            assert_eq!(*actual, 8888);
            assert_eq!(e.category(), FailureCategory::ConfigurationMismatch);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(report.outcomes[1..].iter().all(|o| o.passed()));
}

#[tokio::test]
async fn declared_chain_id_mismatch_is_caught_before_querying_node() {
    let mut config = hardhat_config();
    config.chain_id = 1337;
    let network = FakeNetwork::conforming();

    let err = checks::check_chain_identity(&config, &network).await.unwrap_err();
    assert!(matches!(
        err,
        NetworkCheckError::ChainIdMismatch {
            origin: ChainIdSource::Declared,
            expected: 31337,
            actual: 1337,
        }
    ));
}

#[tokio::test]
async fn missing_user_account_fails_provisioning() {
    let mut network = FakeNetwork::conforming();
    network.accounts.truncate(1);
    let report = suite().run(&network).await;

    assert!(matches!(
        report.outcomes[1].result,
        Err(NetworkCheckError::AccountCountMismatch { expected: 2, actual: 1 })
    ));
    // user can no longer sign
    assert!(matches!(
        report.outcomes[3].result,
        Err(NetworkCheckError::NoWalletForAccount(_))
    ));
    assert!(report.to_string().ends_with("2 passed, 2 failed"));
}

#[tokio::test]
async fn unexpected_gas_usage_fails_both_transfers() {
    let mut network = FakeNetwork::conforming();
    network.gas_used = 23_400;
    let report = suite().run(&network).await;

    let categories: Vec<_> = report
        .failures()
        .map(|o| o.result.as_ref().unwrap_err().category())
        .collect();
    assert_eq!(categories, vec![FailureCategory::GasAnomaly; 2]);
}

#[tokio::test]
async fn failed_status_and_wrong_value_are_transaction_failures() {
    let mut reverted = FakeNetwork::conforming();
    reverted.status = 0;
    let intent = TransferIntent::new(fixture().whale.address, fixture().user.address, 1u64);
    let err = checks::check_transfer(&reverted, &intent, &fast_wait())
        .await
        .unwrap_err();
    assert!(matches!(err, NetworkCheckError::TransferReverted(_)));
    assert_eq!(err.category(), FailureCategory::TransactionFailure);

    let mut wrong_value = FakeNetwork::conforming();
    wrong_value.value_override = Some(U256::zero());
    let err = checks::check_transfer(&wrong_value, &intent, &fast_wait())
        .await
        .unwrap_err();
    assert!(matches!(err, NetworkCheckError::ValueMismatch { .. }));
}

#[tokio::test(start_paused = true)]
async fn receipt_is_awaited_until_included() {
    let mut network = FakeNetwork::conforming();
    network.pending_polls = 3;
    let intent = TransferIntent::new(fixture().whale.address, fixture().user.address, 1u64);

    let outcome = checks::check_transfer(&network, &intent, &fast_wait()).await.unwrap();
    assert_eq!(network.polls_for(outcome.tx_hash), 4);
    assert_eq!(outcome.gas_used, U256::from(21_000u64));
}

#[tokio::test(start_paused = true)]
async fn receipt_wait_is_bounded() {
    let mut network = FakeNetwork::conforming();
    network.never_include = true;
    let intent = TransferIntent::new(fixture().whale.address, fixture().user.address, 1u64);
    let tx_hash = network.send_transfer(&intent).await.unwrap();

    let err = checks::wait_for_receipt(&network, tx_hash, &fast_wait())
        .await
        .unwrap_err();
    match err {
        NetworkCheckError::ReceiptTimeout { tx_hash: timed_out, timeout } => {
            assert_eq!(timed_out, tx_hash);
            assert_eq!(timeout, Duration::from_secs(5));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(network.polls_for(tx_hash) > 1);
}

#[tokio::test]
async fn unknown_hash_and_unknown_sender() {
    let network = FakeNetwork::conforming();
    assert!(network
        .transaction(TxHash::from_low_u64_be(99))
        .await
        .unwrap()
        .is_none());

    let stranger = Address::from_low_u64_be(0xdead);
    let intent = TransferIntent::new(stranger, fixture().user.address, 1u64);
    let err = checks::check_transfer(&network, &intent, &fast_wait())
        .await
        .unwrap_err();
    assert_eq!(err.category(), FailureCategory::Transport);
}

#[tokio::test]
async fn transfer_value_can_be_overridden() {
    let network = FakeNetwork::conforming();
    let report = suite().with_transfer_value(1_000u64).run(&network).await;
    assert!(report.is_success());
    match &report.outcomes[2].result {
        Ok(CheckDetail::Transfer(outcome)) => assert_eq!(outcome.intent.value, U256::from(1_000u64)),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn balances_move_by_the_transferred_value() {
    let fixture = fixture();
    let network = FakeNetwork::conforming();
    network.fund(fixture.whale.address, U256::from(100u64));

    let intent = TransferIntent::new(fixture.whale.address, fixture.user.address, 1u64);
    checks::check_transfer(&network, &intent, &fast_wait()).await.unwrap();

    assert_balance(&network, fixture.whale.address, U256::from(99u64)).await;
    assert_balance(&network, fixture.user.address, U256::one()).await;
}

#[tokio::test]
#[should_panic(expected = "unexpected balance")]
async fn balance_assertion_fails_on_mismatch() {
    let network = FakeNetwork::conforming();
    assert_balance(&network, fixture().user.address, U256::one()).await;
}

#[tokio::test(start_paused = true)]
async fn zero_poll_interval_does_not_panic() {
    let mut network = FakeNetwork::conforming();
    network.pending_polls = 2;
    let wait = WaitPolicy {
        timeout: Duration::from_secs(5),
        poll_interval: Duration::ZERO,
    };
    let intent = TransferIntent::new(fixture().whale.address, fixture().user.address, 1u64);

    let outcome = checks::check_transfer(&network, &intent, &wait).await.unwrap();
    assert_eq!(network.polls_for(outcome.tx_hash), 3);
}
