use super::{deploy, Artifacts, ContractError, Deployment};
use crate::rpc::{Client, TransactionManager};
use ethers::{
    contract::abigen,
    types::{Address, U256},
};

abigen!(
    AssemblyReturns,
    r#"[
        function f() external pure returns (uint256, bytes32, bytes3, bool, address)
    ]"#,
);

/// Return values of `AssemblyReturns.f()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FReturn {
    pub a: U256,
    pub b: Vec<u8>,
    pub c: Vec<u8>,
    pub d: bool,
    pub e: Address,
}

impl From<(U256, [u8; 32], [u8; 3], bool, Address)> for FReturn {
    fn from((a, b, c, d, e): (U256, [u8; 32], [u8; 3], bool, Address)) -> Self {
        Self {
            a,
            b: b.to_vec(),
            c: c.to_vec(),
            d,
            e,
        }
    }
}

impl AssemblyReturns<Client> {
    pub const NAME: &'static str = "AssemblyReturns";

    /// Deploys the compiled contract from `artifacts`.
    pub async fn deploy_from(
        manager: &TransactionManager,
        artifacts: &Artifacts,
    ) -> Result<(Self, Deployment), ContractError> {
        let bytecode = artifacts.bytecode(Self::NAME)?;
        let deployment = deploy(manager, ASSEMBLYRETURNS_ABI.clone(), bytecode).await?;
        let contract = Self::new(deployment.address, manager.client());
        Ok((contract, deployment))
    }

    pub async fn returns(&self) -> Result<FReturn, ContractError> {
        Ok(self.f().call().await?.into())
    }
}
