use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::models::transcode::EncodingSettings;

/// ffmpeg 命令列建構器
///
/// 參數順序固定：覆寫、輸入、捨棄視訊流、音訊編碼器、位元率、輸出。
pub struct FfmpegCommand<'a> {
    settings: &'a EncodingSettings,
    input: &'a Path,
    output: &'a Path,
}

impl<'a> FfmpegCommand<'a> {
    pub fn new(settings: &'a EncodingSettings, input: &'a Path, output: &'a Path) -> Self {
        FfmpegCommand {
            settings,
            input,
            output,
        }
    }

    pub fn program(&self) -> &Path {
        &self.settings.program
    }

    pub fn args(&self) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-i".into(),
            self.input.as_os_str().to_owned(),
            "-vn".into(),
            "-acodec".into(),
            self.settings.audio_codec.clone().into(),
            "-b:a".into(),
            self.settings.bitrate.clone().into(),
            self.output.as_os_str().to_owned(),
        ]
    }

    /// stdout 與 stderr 皆被擷取，不會與進度輸出交錯
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_argument_template() {
        let settings = EncodingSettings::default();
        let input = PathBuf::from("/videos/sub/clip.mp4");
        let output = PathBuf::from("/audio/sub/clip.mp3");
        let command = FfmpegCommand::new(&settings, &input, &output);

        let args: Vec<OsString> = command.args();
        let expected: Vec<OsString> = [
            "-y",
            "-i",
            "/videos/sub/clip.mp4",
            "-vn",
            "-acodec",
            "libmp3lame",
            "-b:a",
            "192k",
            "/audio/sub/clip.mp3",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
        assert_eq!(command.program(), Path::new("ffmpeg"));
    }

    #[test]
    fn custom_settings_flow_into_arguments() {
        let settings = EncodingSettings {
            program: PathBuf::from("/opt/ffmpeg/bin/ffmpeg"),
            audio_codec: "libshine".to_string(),
            bitrate: "128k".to_string(),
        };
        let input = PathBuf::from("in put.mp4");
        let output = PathBuf::from("out put.mp3");
        let command = FfmpegCommand::new(&settings, &input, &output);
        let args = command.args();

        assert_eq!(args[2], OsString::from("in put.mp4"));
        assert_eq!(args[5], OsString::from("libshine"));
        assert_eq!(args[7], OsString::from("128k"));
        assert_eq!(args.last(), Some(&OsString::from("out put.mp3")));
        assert_eq!(
            command.to_command().get_program(),
            OsString::from("/opt/ffmpeg/bin/ffmpeg").as_os_str()
        );
    }
}
