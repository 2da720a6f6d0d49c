mod transaction_manager;

pub use transaction_manager::TransactionManager;

use ethers::providers::{Http, HttpClientError, Provider, ProviderError};
use thiserror::Error;

/// Connection to the node under test.
pub type Client = Provider<Http>;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("couldn't set up http client: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("node returned error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error(transparent)]
    Provider(ProviderError),
    #[error("node reports no accounts to send transactions from")]
    NoAccounts,
}

impl From<ProviderError> for RpcError {
    fn from(err: ProviderError) -> Self {
        if let ProviderError::JsonRpcClientError(inner) = &err {
            if let Some(HttpClientError::JsonRpcError(rpc)) =
                inner.downcast_ref::<HttpClientError>()
            {
                return Self::Rpc {
                    code: rpc.code,
                    message: rpc.message.clone(),
                };
            }
        }
        Self::Provider(err)
    }
}
