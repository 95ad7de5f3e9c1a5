use std::path::PathBuf;

use crate::config::config::{DEFAULT_AUDIO_CODEC, DEFAULT_BITRATE, DEFAULT_FFMPEG};

/// 轉碼參數，整批固定不變
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingSettings {
    pub program: PathBuf,
    pub audio_codec: String,
    pub bitrate: String,
}

impl Default for EncodingSettings {
    fn default() -> Self {
        EncodingSettings {
            program: PathBuf::from(DEFAULT_FFMPEG),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            bitrate: DEFAULT_BITRATE.to_string(),
        }
    }
}

/// 轉碼程式單次執行的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeOutput {
    pub success: bool,
    /// 被訊號終止時為 None
    pub code: Option<i32>,
    pub diagnostics: String,
}
