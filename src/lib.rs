mod consts;

pub mod case;
pub mod cli;
pub mod contract;
pub mod data_source;
pub mod report;
pub mod rpc;
pub mod settings;

pub use self::settings::Settings;

use case::{CaseContext, ContractCase, Runner};
use contract::Artifacts;
use report::RunReport;
use rpc::TransactionManager;

/// Connects to the configured node and runs `cases` for every row of their sheets.
pub async fn run(
    settings: Settings,
    cases: &[Box<dyn ContractCase>],
) -> anyhow::Result<RunReport> {
    let manager =
        TransactionManager::connect(&settings.node, &settings.transaction, &settings.receipt)
            .await?;
    let artifacts = Artifacts::new(settings.contracts.artifacts_dir.clone());

    let ctx = CaseContext {
        manager: &manager,
        artifacts: &artifacts,
    };
    let report = Runner::new(ctx, settings.data_source.dir.clone())
        .run_all(cases)
        .await;
    tracing::info!(
        passed = report.passed(),
        failed = report.failed(),
        "all cases finished"
    );
    Ok(report)
}
