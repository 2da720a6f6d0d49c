use serde::Serialize;
use std::fmt::Debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseMetadata {
    pub name: &'static str,
    pub show_name: &'static str,
    pub author: &'static str,
    /// Workbook with the case parameters, relative to the data directory.
    pub data_file: &'static str,
    pub sheet_name: &'static str,
}

/// Result of a single comparison. Never changes once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionOutcome {
    pub step: String,
    pub passed: bool,
    pub expected: String,
    pub found: String,
}

/// Collects step logs and assertion outcomes of one case run.
#[derive(Debug)]
pub struct Collector {
    case: &'static str,
    row: usize,
    outcomes: Vec<AssertionOutcome>,
}

impl Collector {
    pub fn new(case: &'static str, row: usize) -> Self {
        Self {
            case,
            row,
            outcomes: Vec::new(),
        }
    }

    pub fn log_step_pass(&self, message: impl AsRef<str>) {
        tracing::info!(case = self.case, row = self.row, "{}", message.as_ref());
    }

    pub fn log_step_fail(&self, message: impl AsRef<str>) {
        tracing::error!(case = self.case, row = self.row, "{}", message.as_ref());
    }

    /// Records whether `found` equals `expected`. Returns the comparison result.
    pub fn assert_equal<E, F>(&mut self, step: impl Into<String>, expected: E, found: F) -> bool
    where
        E: Debug + PartialEq<F>,
        F: Debug,
    {
        let outcome = AssertionOutcome {
            step: step.into(),
            passed: expected == found,
            expected: format!("{expected:?}"),
            found: format!("{found:?}"),
        };
        if outcome.passed {
            tracing::debug!(case = self.case, row = self.row, step = %outcome.step, "assertion passed");
        } else {
            self.log_step_fail(format!(
                "{}: expected {}, found {}",
                outcome.step, outcome.expected, outcome.found
            ));
        }
        let passed = outcome.passed;
        self.outcomes.push(outcome);
        passed
    }

    pub fn outcomes(&self) -> &[AssertionOutcome] {
        &self.outcomes
    }

    pub fn finish(self, metadata: &CaseMetadata, error: Option<String>) -> CaseReport {
        CaseReport {
            case: metadata.clone(),
            row: self.row,
            outcomes: self.outcomes,
            error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseReport {
    pub case: CaseMetadata,
    pub row: usize,
    pub outcomes: Vec<AssertionOutcome>,
    /// Set when the run was aborted before all steps completed.
    pub error: Option<String>,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.outcomes.iter().all(|outcome| outcome.passed)
    }

    pub fn failed_outcomes(&self) -> impl Iterator<Item = &AssertionOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub cases: Vec<CaseReport>,
}

impl RunReport {
    pub fn push(&mut self, report: CaseReport) {
        self.cases.push(report);
    }

    pub fn extend(&mut self, other: RunReport) {
        self.cases.extend(other.cases);
    }

    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|report| report.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}
