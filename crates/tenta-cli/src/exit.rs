//! Process exit status.

use tenta_store::CommitReport;

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Some products were not written; rerunning retries them.
    WritesFailed,
}

impl ExitStatus {
    pub fn from_report(report: &CommitReport) -> Self {
        if report.is_complete() {
            Self::Success
        } else {
            Self::WritesFailed
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::WritesFailed => 1,
        }
    }
}
