use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::models::transcode::{EncodingSettings, TranscodeOutput};
use crate::service::traits::i_service::TranscoderServiceTrait;
use crate::utils::command::FfmpegCommand;

/// 以外部 ffmpeg 程式實現 TranscoderServiceTrait
pub struct FfmpegTranscoder {
    settings: EncodingSettings,
}

impl FfmpegTranscoder {
    pub fn new(settings: EncodingSettings) -> Self {
        FfmpegTranscoder { settings }
    }

    pub fn settings(&self) -> &EncodingSettings {
        &self.settings
    }

    /// 在 PATH 中尋找轉碼程式；絕對路徑則檢查是否可執行
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(&self.settings.program).ok()
    }
}

impl TranscoderServiceTrait for FfmpegTranscoder {
    fn transcode(&self, input: &Path, output: &Path) -> io::Result<TranscodeOutput> {
        let command = FfmpegCommand::new(&self.settings, input, output);
        debug!(
            "執行：{} {:?}",
            command.program().display(),
            command.args()
        );
        let result = command.to_command().output()?;
        Ok(TranscodeOutput {
            success: result.status.success(),
            code: result.status.code(),
            diagnostics: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_program_is_a_launch_error() {
        let dir = tempdir().unwrap();
        let transcoder = FfmpegTranscoder::new(EncodingSettings {
            program: dir.path().join("no-such-ffmpeg"),
            ..EncodingSettings::default()
        });

        assert!(transcoder.locate().is_none());
        let err = transcoder
            .transcode(&dir.path().join("a.mp4"), &dir.path().join("a.mp3"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_reported_with_stderr() {
        // `false` ignores its arguments and exits with status 1
        let Ok(program) = which::which("false") else {
            return;
        };
        let transcoder = FfmpegTranscoder::new(EncodingSettings {
            program,
            ..EncodingSettings::default()
        });
        let output = transcoder
            .transcode(Path::new("a.mp4"), Path::new("a.mp3"))
            .unwrap();
        assert!(!output.success);
        assert_eq!(output.code, Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_is_success() {
        let Ok(program) = which::which("true") else {
            return;
        };
        let transcoder = FfmpegTranscoder::new(EncodingSettings {
            program,
            ..EncodingSettings::default()
        });
        let output = transcoder
            .transcode(Path::new("a.mp4"), Path::new("a.mp3"))
            .unwrap();
        assert!(output.success);
        assert_eq!(output.code, Some(0));
        assert!(output.diagnostics.is_empty());
    }
}
