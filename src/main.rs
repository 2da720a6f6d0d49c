use contract_autotest::{case, cli::Args, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::default();
    let settings = Settings::load(args.config_path)?;

    let mut cases = case::all_cases();
    if let Some(name) = &args.case {
        cases.retain(|case| case.metadata().name == name.as_str());
        if cases.is_empty() {
            anyhow::bail!("unknown case '{name}'");
        }
    }

    let report = contract_autotest::run(settings, &cases).await?;
    for failed in report.cases.iter().filter(|report| !report.passed()) {
        tracing::error!(
            case = failed.case.name,
            row = failed.row,
            error = failed.error.as_deref().unwrap_or_default(),
            failed_assertions = failed.failed_outcomes().count(),
            "case failed"
        );
    }
    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
