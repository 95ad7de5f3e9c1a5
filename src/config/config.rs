use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::RunError;

pub const INPUT_EXTENSION: &str = "mp4";
pub const OUTPUT_EXTENSION: &str = "mp3";
pub const DEFAULT_FFMPEG: &str = "ffmpeg";
pub const DEFAULT_AUDIO_CODEC: &str = "libmp3lame";
pub const DEFAULT_BITRATE: &str = "192k";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser, Clone, Debug)]
#[command(
    name = "video_to_audio",
    version,
    about = "批次將目錄中的 .mp4 影片提取為 .mp3 音訊",
    long_about = "遞迴掃描源目錄中的 .mp4 檔案，透過 ffmpeg 提取音訊並輸出為 .mp3，保持原有資料夾結構。\n單一檔案失敗不會中斷整批轉換，結束時輸出成功與失敗數量。\n僅指定源目錄與目標目錄時使用預設配置（libmp3lame，192k）。",
    arg_required_else_help = true
)]
pub struct Cli {
    /// 源目錄（遞迴搜尋 .mp4）
    pub source: PathBuf,
    /// 目標目錄（不存在時自動建立）
    pub destination: PathBuf,
    /// ffmpeg 執行檔路徑
    #[arg(long, env = "FFMPEG_PATH")]
    pub ffmpeg: Option<PathBuf>,
    #[arg(long)]
    pub audio_codec: Option<String>,
    #[arg(long)]
    pub bitrate: Option<String>,
    #[arg(long, value_parser = ["info", "warn", "error"])]
    pub log_level: Option<String>,
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    /// 有任何檔案失敗時以狀態碼 2 結束
    #[arg(long, default_value_t = false)]
    pub fail_on_error: bool,
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}

impl Cli {
    /// 僅提供源目錄與目標目錄時視為預設配置
    pub fn is_default_config(&self) -> bool {
        self.ffmpeg.is_none()
            && self.audio_codec.is_none()
            && self.bitrate.is_none()
            && self.log_level.is_none()
            && self.log_dir.is_none()
            && !self.no_progress
            && !self.fail_on_error
    }
}

/// 將相對路徑轉為以目前工作目錄為基準的絕對路徑，不要求路徑存在
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    std::path::absolute(path)
}

pub fn validate_source_dir(source: &Path) -> Result<PathBuf, RunError> {
    let path = absolutize(source)?;
    if !path.exists() {
        return Err(RunError::SourceNotFound(path));
    }
    if !path.is_dir() {
        return Err(RunError::SourceNotDirectory(path));
    }
    Ok(path)
}
