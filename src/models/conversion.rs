use std::fmt;
use std::path::PathBuf;

use crate::error::FailureReason;

#[derive(Clone, Debug)]
pub struct ConversionInput {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub input_extension: String,
    pub output_extension: String,
    pub no_progress: bool,
}

/// 單一檔案的轉換結果
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionResult {
    Success,
    Failure(FailureReason),
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionResult::Success)
    }
}

/// 整次執行的成功與失敗計數
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub success_count: usize,
    pub failure_count: usize,
}

impl RunSummary {
    pub fn record(&mut self, result: &ConversionResult) {
        if result.is_success() {
            self.success_count += 1;
        } else {
            self.failure_count += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "成功: {} | 失敗: {}", self.success_count, self.failure_count)
    }
}

/// 執行流程的階段
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Validating,
    Discovering,
    Processing,
    Reporting,
    Terminated,
}

#[derive(Debug)]
pub struct ConversionOutput {
    pub output_path: PathBuf,
    pub discovered: usize,
    pub summary: RunSummary,
}
