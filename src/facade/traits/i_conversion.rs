use crate::error::RunError;
use crate::models::conversion::{ConversionInput, ConversionOutput};

// Facade 接口，負責協調批次轉換流程
pub trait ConversionFacadeTrait: Send + Sync {
    /// 執行批次轉換：驗證、掃描、逐檔轉換、彙總
    /// # 參數
    /// - input: 源目錄、目標目錄與副檔名
    /// # 回傳
    /// - 執行完成時返回計數（即使有檔案失敗）；源目錄無效時返回 RunError
    fn execute_conversion(&self, input: ConversionInput) -> Result<ConversionOutput, RunError>;
}
