//! JSON-RPC backed network client.

use async_trait::async_trait;
use ethers::prelude::*;
use tracing::{debug, info};

use crate::client::NetworkClient;
use crate::config::NetworkConfig;
use crate::errors::NetworkCheckError;
use crate::types::{EthRpcClient, TransferIntent};
use crate::utils;

/// Running EVM network reached through a node's HTTP JSON-RPC endpoint.
pub struct RpcNetwork {
    provider: Provider<Http>,
    /// Local signers, one per configured private key, in configuration order
    signers: Vec<EthRpcClient>,
    /// Whether accounts are unlocked on the node rather than signed locally
    node_managed: bool,
}

/// Handle able to send transactions from a single wallet account.
pub enum WalletHandle<'a> {
    /// Signs locally with a private key
    Local(&'a EthRpcClient),
    /// Node signs with one of its unlocked accounts
    Node {
        provider: &'a Provider<Http>,
        address: Address,
    },
}

impl WalletHandle<'_> {
    pub fn address(&self) -> Address {
        match self {
            WalletHandle::Local(client) => client.address(),
            WalletHandle::Node { address, .. } => *address,
        }
    }

    /// Submit a value transfer from this wallet, gas and fees filled by the client.
    pub async fn send_transfer(&self, to: Address, value: U256) -> Result<TxHash, NetworkCheckError> {
        let tx = TransactionRequest::new().from(self.address()).to(to).value(value);
        let tx_hash = match self {
            WalletHandle::Local(client) => client
                .send_transaction(tx, None)
                .await
                .map_err(|e| NetworkCheckError::FailedToSendTransaction(e.to_string()))?
                .tx_hash(),
            WalletHandle::Node { provider, .. } => provider
                .send_transaction(tx, None)
                .await
                .map_err(|e| NetworkCheckError::FailedToSendTransaction(e.to_string()))?
                .tx_hash(),
        };
        Ok(tx_hash)
    }
}

/// Parse hex private keys into wallets, keeping key order as wallet account order.
pub fn local_wallets(private_keys: &[String]) -> Result<Vec<LocalWallet>, NetworkCheckError> {
    private_keys
        .iter()
        .map(|key| {
            utils::normalize_private_key(key)
                .parse::<LocalWallet>()
                .map_err(|e| NetworkCheckError::InvalidPrivateKey(e.to_string()))
        })
        .collect()
}

/// Convert a chain id reported over RPC, rejecting values beyond `u64`.
fn chain_id_from_rpc(chain_id: U256) -> Result<u64, NetworkCheckError> {
    u64::try_from(chain_id).map_err(|e| {
        NetworkCheckError::RpcCall(format!("chain id {} out of range: {}", chain_id, e))
    })
}

impl RpcNetwork {
    /// Connect to the network's RPC endpoint and set up signers for its accounts.
    pub async fn connect(config: &NetworkConfig) -> Result<Self, NetworkCheckError> {
        let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
            .map_err(|e| NetworkCheckError::FailedToCreateRpcClient(e.to_string()))?
            .interval(config.poll_interval);

        let (signers, node_managed) = match config.accounts.private_keys()? {
            Some(keys) => {
                let mut signers = Vec::with_capacity(keys.len());
                for wallet in local_wallets(&keys)? {
                    let signer = SignerMiddleware::new_with_provider_chain(provider.clone(), wallet)
                        .await
                        .map_err(|e| NetworkCheckError::FailedToCreateRpcClient(e.to_string()))?;
                    signers.push(signer);
                }
                (signers, false)
            }
            None => (Vec::new(), true),
        };
        info!(
            network = %config.network,
            rpc_url = %config.rpc_url,
            accounts = ?config.accounts,
            "connected to network"
        );

        Ok(Self {
            provider,
            signers,
            node_managed,
        })
    }

    /// Get a wallet handle for `address`, which must be one of the wallet accounts.
    pub async fn wallet(&self, address: Address) -> Result<WalletHandle<'_>, NetworkCheckError> {
        if self.node_managed {
            let accounts = self.wallet_accounts().await?;
            if !accounts.contains(&address) {
                return Err(NetworkCheckError::NoWalletForAccount(address));
            }
            return Ok(WalletHandle::Node {
                provider: &self.provider,
                address,
            });
        }
        self.signers
            .iter()
            .find(|signer| signer.address() == address)
            .map(WalletHandle::Local)
            .ok_or(NetworkCheckError::NoWalletForAccount(address))
    }
}

#[async_trait]
impl NetworkClient for RpcNetwork {
    async fn chain_id(&self) -> Result<u64, NetworkCheckError> {
        let chain_id = self
            .provider
            .get_chainid()
            .await
            .map_err(|e| NetworkCheckError::RpcCall(e.to_string()))?;
        chain_id_from_rpc(chain_id)
    }

    async fn wallet_accounts(&self) -> Result<Vec<Address>, NetworkCheckError> {
        if self.node_managed {
            return self
                .provider
                .get_accounts()
                .await
                .map_err(|e| NetworkCheckError::RpcCall(e.to_string()));
        }
        Ok(self.signers.iter().map(|signer| signer.address()).collect())
    }

    async fn send_transfer(&self, intent: &TransferIntent) -> Result<TxHash, NetworkCheckError> {
        let wallet = self.wallet(intent.from).await?;
        let tx_hash = wallet.send_transfer(intent.to, intent.value).await?;
        debug!(?tx_hash, from = ?intent.from, to = ?intent.to, value = %intent.value, "sent transfer");
        Ok(tx_hash)
    }

    async fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, NetworkCheckError> {
        self.provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| NetworkCheckError::RpcCall(e.to_string()))
    }

    async fn balance(&self, address: Address) -> Result<U256, NetworkCheckError> {
        self.provider
            .get_balance(address, None)
            .await
            .map_err(|e| NetworkCheckError::RpcCall(e.to_string()))
    }

    async fn transaction(&self, tx_hash: TxHash) -> Result<Option<Transaction>, NetworkCheckError> {
        self.provider
            .get_transaction(tx_hash)
            .await
            .map_err(|e| NetworkCheckError::RpcCall(e.to_string()))
    }
}
