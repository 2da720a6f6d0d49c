use super::{Client, RpcError};
use crate::settings::{NodeSettings, ReceiptSettings, TransactionSettings};
use ethers::{
    providers::{Http, Middleware, Provider},
    types::{transaction::eip2718::TypedTransaction, U256},
};
use std::{sync::Arc, time::Duration};

/// Node connection that sends transactions from a single node-managed account.
pub struct TransactionManager {
    client: Arc<Client>,
    gas_limit: U256,
    gas_price: U256,
    receipt_timeout: Duration,
}

impl TransactionManager {
    pub async fn connect(
        node: &NodeSettings,
        transaction: &TransactionSettings,
        receipt: &ReceiptSettings,
    ) -> Result<Self, RpcError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(node.request_timeout))
            .build()?;
        let provider = Provider::new(Http::new_with_client(node.rpc_url.clone(), http_client))
            .interval(receipt.poll_interval());

        let from = match transaction.from {
            Some(from) => from,
            None => provider
                .get_accounts()
                .await?
                .first()
                .copied()
                .ok_or(RpcError::NoAccounts)?,
        };
        tracing::info!(rpc_url = %node.rpc_url, from = ?from, "connected to node");

        let attempts = u32::try_from(receipt.attempts.get()).unwrap_or(u32::MAX);
        Ok(Self {
            client: Arc::new(provider.with_sender(from)),
            gas_limit: transaction.gas_limit.into(),
            gas_price: transaction.gas_price.into(),
            receipt_timeout: receipt.poll_interval().saturating_mul(attempts),
        })
    }

    pub fn client(&self) -> Arc<Client> {
        self.client.clone()
    }

    /// Sets the configured gas limit and price, so the node is never asked to estimate them.
    pub fn prepare(&self, tx: &mut TypedTransaction) {
        tx.set_gas(self.gas_limit);
        tx.set_gas_price(self.gas_price);
    }

    /// Longest time to wait for a receipt before giving up on a transaction.
    pub fn receipt_timeout(&self) -> Duration {
        self.receipt_timeout
    }
}
