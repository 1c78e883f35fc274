//! Surface of the running network the checks rely on.

use async_trait::async_trait;
use ethers::types::{Address, Transaction, TransactionReceipt, TxHash, U256};

use crate::errors::NetworkCheckError;
use crate::types::TransferIntent;

/// Read and submit operations against a running network.
///
/// [`crate::network::RpcNetwork`] implements this over JSON-RPC. The checks only ever talk to a
/// network through this trait.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Chain id reported by the node.
    async fn chain_id(&self) -> Result<u64, NetworkCheckError>;

    /// Accounts able to sign transactions, in provisioning order.
    async fn wallet_accounts(&self) -> Result<Vec<Address>, NetworkCheckError>;

    /// Sign (or have the node sign) and broadcast a value transfer, returning its hash.
    async fn send_transfer(&self, intent: &TransferIntent) -> Result<TxHash, NetworkCheckError>;

    /// Receipt of an included transaction, `None` while pending.
    async fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, NetworkCheckError>;

    /// Balance of `address` at the latest block, in wei.
    async fn balance(&self, address: Address) -> Result<U256, NetworkCheckError>;

    /// Transaction record by hash, `None` if the node does not know it.
    async fn transaction(&self, tx_hash: TxHash) -> Result<Option<Transaction>, NetworkCheckError>;
}
