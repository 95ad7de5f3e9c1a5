use std::io;
use std::path::PathBuf;

use crate::error::RunError;
use crate::models::conversion::ConversionOutput;
use crate::models::transcode::EncodingSettings;

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub input_extension: String,
    pub output_extension: String,
    pub encoding: EncodingSettings,
    pub no_progress: bool,
    pub fail_on_error: bool,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}

// 轉換執行的 Port
pub trait ConversionPort {
    fn execute(&self, config: AppConfig) -> Result<ConversionOutput, RunError>;
}
