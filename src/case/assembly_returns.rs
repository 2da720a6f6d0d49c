use super::{expected_hex, to_hex, CaseContext, CaseError, ContractCase};
use crate::{
    contract::AssemblyReturns,
    data_source::Params,
    report::{CaseMetadata, Collector},
    rpc::Client,
};
use async_trait::async_trait;
use ethers::types::U256;
use serde::Deserialize;

pub const EXPECTED_ADDRESS: &str = "0x1212121212121212121212121212121212121212";

/// Expected hex encodings of the two byte values returned by `f()`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssemblyReturnsParams {
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
}

/// Checks values assigned in inline assembly and returned as a tuple of mixed types.
pub struct AssemblyReturnsCase {
    metadata: CaseMetadata,
}

impl Default for AssemblyReturnsCase {
    fn default() -> Self {
        Self {
            metadata: CaseMetadata {
                name: AssemblyReturns::<Client>::NAME,
                show_name: "function.AssemblyReturnsTest-AssemblyReturns测试",
                author: "liweic",
                data_file: "test.toml",
                sheet_name: "Sheet1",
            },
        }
    }
}

#[async_trait]
impl ContractCase for AssemblyReturnsCase {
    fn metadata(&self) -> &CaseMetadata {
        &self.metadata
    }

    async fn run(
        &self,
        ctx: &CaseContext<'_>,
        params: &Params,
        collector: &mut Collector,
    ) -> Result<(), CaseError> {
        let expected: AssemblyReturnsParams = params.parse()?;

        let (contract, deployment) =
            AssemblyReturns::<Client>::deploy_from(ctx.manager, ctx.artifacts).await?;
        collector.log_step_pass(format!(
            "AssemblyReturns deployed. contract address: {:?}, hash: {:?}",
            deployment.address, deployment.receipt.transaction_hash
        ));

        let result = contract.returns().await?;

        collector.log_step_pass(format!("first return value: {}", result.a));
        collector.assert_equal("first return value", U256::from(2u64), result.a);

        let b = to_hex(&result.b);
        collector.log_step_pass(format!("second return value: {b}"));
        collector.assert_equal("second return value", expected_hex("B", &expected.b), b);

        let c = to_hex(&result.c);
        collector.log_step_pass(format!("third return value: {c}"));
        collector.assert_equal("third return value", expected_hex("C", &expected.c), c);

        collector.log_step_pass(format!("fourth return value: {}", result.d));
        collector.assert_equal("fourth return value", true, result.d);

        let e = format!("{:?}", result.e);
        collector.log_step_pass(format!("fifth return value: {e}"));
        collector.assert_equal("fifth return value", EXPECTED_ADDRESS, e.as_str());

        Ok(())
    }
}
