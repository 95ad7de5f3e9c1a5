use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 使整次執行中止的錯誤，一律在轉換任何檔案之前發生
#[derive(Debug, Error)]
pub enum RunError {
    #[error("源目錄不存在：{}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("源路徑不是目錄：{}", .0.display())]
    SourceNotDirectory(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// 單一檔案轉換失敗的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    /// 轉碼程式以非零狀態結束，附上其 stderr
    #[error("轉碼程式異常結束（{}）：{diagnostics}", describe_code(.code))]
    ToolExit {
        code: Option<i32>,
        diagnostics: String,
    },
    /// 準備或啟動轉碼時發生的本地錯誤
    #[error("{0}")]
    Local(String),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("代碼 {}", code),
        None => "被訊號終止".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_exit_message_carries_code_and_diagnostics() {
        let reason = FailureReason::ToolExit {
            code: Some(1),
            diagnostics: "moov atom not found".to_string(),
        };
        let message = reason.to_string();
        assert!(message.contains("代碼 1"));
        assert!(message.contains("moov atom not found"));
    }

    #[test]
    fn tool_exit_without_code_is_reported_as_signal() {
        let reason = FailureReason::ToolExit {
            code: None,
            diagnostics: String::new(),
        };
        assert!(reason.to_string().contains("被訊號終止"));
    }

    #[test]
    fn io_errors_convert_into_run_error() {
        let err: RunError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, RunError::Io(_)));
        assert_eq!(err.to_string(), "denied");
    }
}
