use super::{CaseContext, ContractCase};
use crate::{
    data_source::Workbook,
    report::{CaseReport, Collector, RunReport},
};
use std::path::{Path, PathBuf};

/// Runs cases against every row of their sheet, one run at a time.
pub struct Runner<'a> {
    ctx: CaseContext<'a>,
    data_dir: PathBuf,
}

impl<'a> Runner<'a> {
    /// `data_dir` is the directory the `data_file` of every case is resolved against.
    pub fn new(ctx: CaseContext<'a>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            ctx,
            data_dir: data_dir.into(),
        }
    }

    fn data_path(&self, case: &dyn ContractCase) -> PathBuf {
        let data_file = Path::new(case.metadata().data_file);
        self.data_dir.join(data_file)
    }

    pub async fn run(&self, case: &dyn ContractCase) -> RunReport {
        let metadata = case.metadata();
        let mut report = RunReport::default();

        let workbook = match Workbook::load(&self.data_path(case)) {
            Ok(workbook) => workbook,
            Err(err) => {
                report.push(aborted(case, err.to_string()));
                return report;
            }
        };
        let rows = match workbook.sheet(metadata.sheet_name) {
            Ok(rows) if !rows.is_empty() => rows,
            Ok(_) => {
                report.push(aborted(case, "sheet has no data rows".into()));
                return report;
            }
            Err(err) => {
                report.push(aborted(case, err.to_string()));
                return report;
            }
        };

        for (row, params) in rows.iter().enumerate() {
            tracing::info!(case = metadata.name, row, "running {}", metadata.show_name);
            let mut collector = Collector::new(metadata.name, row);
            let error = match case.run(&self.ctx, params, &mut collector).await {
                Ok(()) => None,
                Err(err) => {
                    collector.log_step_fail(format!("run aborted: {err}"));
                    Some(err.to_string())
                }
            };
            let case_report = collector.finish(metadata, error);
            if case_report.passed() {
                tracing::info!(case = metadata.name, row, "passed");
            } else {
                tracing::error!(case = metadata.name, row, "failed");
            }
            report.push(case_report);
        }
        report
    }

    pub async fn run_all(&self, cases: &[Box<dyn ContractCase>]) -> RunReport {
        let mut report = RunReport::default();
        for case in cases {
            report.extend(self.run(case.as_ref()).await);
        }
        report
    }
}

fn aborted(case: &dyn ContractCase, error: String) -> CaseReport {
    let metadata = case.metadata();
    let collector = Collector::new(metadata.name, 0);
    collector.log_step_fail(format!("run aborted: {error}"));
    collector.finish(metadata, Some(error))
}
