mod artifacts;
mod assembly_returns;

pub use artifacts::{ArtifactError, Artifacts};
pub use assembly_returns::{AssemblyReturns, FReturn, ASSEMBLYRETURNS_ABI};

use crate::rpc::{Client, RpcError, TransactionManager};
use ethers::{
    abi::Abi,
    contract::ContractFactory,
    providers::{Middleware, ProviderError},
    types::{Address, Bytes, TransactionReceipt, H256, U64},
};
use std::time::Duration;
use thiserror::Error;

type BindingError = ethers::contract::ContractError<Client>;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error("deployment transaction {0:?} reverted")]
    Reverted(H256),
    #[error("receipt of transaction {0:?} has no contract address")]
    NoContractAddress(H256),
    #[error("transaction {0:?} was dropped by the node")]
    Dropped(H256),
    #[error("receipt for transaction {hash:?} not available after {timeout:?}")]
    ReceiptTimeout { hash: H256, timeout: Duration },
    #[error(transparent)]
    Binding(BindingError),
}

impl From<ProviderError> for ContractError {
    fn from(err: ProviderError) -> Self {
        Self::Rpc(err.into())
    }
}

impl From<BindingError> for ContractError {
    fn from(err: BindingError) -> Self {
        match err {
            BindingError::MiddlewareError(err) => err.into(),
            other => Self::Binding(other),
        }
    }
}

/// Contract created by a mined deployment transaction.
#[derive(Debug, Clone)]
pub struct Deployment {
    pub address: Address,
    pub receipt: TransactionReceipt,
}

impl Deployment {
    pub fn from_receipt(receipt: TransactionReceipt) -> Result<Self, ContractError> {
        let hash = receipt.transaction_hash;
        if receipt.status == Some(U64::zero()) {
            return Err(ContractError::Reverted(hash));
        }
        let address = receipt
            .contract_address
            .ok_or(ContractError::NoContractAddress(hash))?;
        tracing::debug!(address = ?address, hash = ?hash, "contract deployed");
        Ok(Self { address, receipt })
    }
}

/// Sends the creation transaction for `bytecode` and waits for it to be mined.
pub async fn deploy(
    manager: &TransactionManager,
    abi: Abi,
    bytecode: Bytes,
) -> Result<Deployment, ContractError> {
    let client = manager.client();
    let factory = ContractFactory::new(abi, bytecode, client.clone());
    let mut tx = factory.deploy(())?.legacy().tx;
    manager.prepare(&mut tx);

    let pending = client.send_transaction(tx, None).await?;
    let hash = *pending;
    tracing::debug!(hash = ?hash, "deployment submitted");

    let timeout = manager.receipt_timeout();
    let receipt = tokio::time::timeout(timeout, pending)
        .await
        .map_err(|_| ContractError::ReceiptTimeout { hash, timeout })??
        .ok_or(ContractError::Dropped(hash))?;
    Deployment::from_receipt(receipt)
}
