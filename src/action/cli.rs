use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use crate::config::config::{
    absolutize, Cli, DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL, INPUT_EXTENSION, OUTPUT_EXTENSION,
};
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::error::RunError;
use crate::facade::conversion_facade::ConversionAdapter;
use crate::models::conversion::RunSummary;
use crate::models::transcode::EncodingSettings;
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::utils::utils::setup_logging;

pub const EXIT_OK: u8 = 0;
pub const EXIT_CONFIG_ERROR: u8 = 1;
pub const EXIT_FILE_FAILURES: u8 = 2;

pub fn process_args(args: Vec<String>) -> ExitCode {
    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_exit_status(e.kind()));
        }
    };

    let log_dir = log_dir_or_default(cli.log_dir.as_deref());
    if let Err(e) = setup_logging(cli.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL), &log_dir) {
        eprintln!("日誌初始化失敗：{}", e);
    }

    match process_cli_mode(cli) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

/// 說明與版本資訊視為正常結束，其餘參數錯誤一律為配置錯誤
pub fn usage_exit_status(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_OK,
        _ => EXIT_CONFIG_ERROR,
    }
}

/// 個別檔案失敗預設不影響狀態碼，除非啟用 --fail-on-error
pub fn exit_status(summary: &RunSummary, fail_on_error: bool) -> u8 {
    if fail_on_error && summary.has_failures() {
        EXIT_FILE_FAILURES
    } else {
        EXIT_OK
    }
}

pub fn process_cli_mode(cli: Cli) -> Result<u8, RunError> {
    let config_port: Box<dyn ConfigPort> = if cli.is_default_config() {
        log::info!("未提供選項參數，使用預設配置：libmp3lame，192k");
        Box::new(DefaultConfigAdapter::new(cli.source.clone(), cli.destination.clone()))
    } else {
        Box::new(CliConfigAdapter::new(cli.clone()))
    };

    let config_service = ConfigService::new(config_port);
    let config = config_service.get_config()?;

    let conversion_port: Box<dyn ConversionPort> = Box::new(ConversionAdapter);
    let output = conversion_port.execute(config.clone())?;

    log::info!("程式執行完成，輸出目錄：{}", output.output_path.display());
    if output.discovered == 0 {
        println!("\n[結果回報] 發現 0 個 .{} 檔案，無需處理", config.input_extension);
    } else {
        println!("\n[結果回報] {}", output.summary);
    }

    if cli.show_config {
        println!("實際使用的配置：{:#?}", config);
    }

    Ok(exit_status(&output.summary, config.fail_on_error))
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let defaults = EncodingSettings::default();
        let encoding = EncodingSettings {
            program: self.cli.ffmpeg.clone().unwrap_or(defaults.program),
            audio_codec: non_empty(self.cli.audio_codec.as_deref(), "audio-codec")?
                .unwrap_or(defaults.audio_codec),
            bitrate: non_empty(self.cli.bitrate.as_deref(), "bitrate")?
                .unwrap_or(defaults.bitrate),
        };

        log::warn!(
            "使用自訂配置，實際使用的參數：ffmpeg={}, audio_codec={}, bitrate={}, no_progress={}, fail_on_error={}",
            encoding.program.display(),
            encoding.audio_codec,
            encoding.bitrate,
            self.cli.no_progress,
            self.cli.fail_on_error
        );

        Ok(AppConfig {
            source: absolutize(&self.cli.source)?,
            destination: absolutize(&self.cli.destination)?,
            input_extension: INPUT_EXTENSION.to_string(),
            output_extension: OUTPUT_EXTENSION.to_string(),
            encoding,
            no_progress: self.cli.no_progress,
            fail_on_error: self.cli.fail_on_error,
        })
    }
}

fn non_empty(value: Option<&str>, name: &str) -> io::Result<Option<String>> {
    match value.map(str::trim) {
        Some("") => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("參數 --{} 不可為空", name),
        )),
        other => Ok(other.map(String::from)),
    }
}

pub fn log_dir_or_default(log_dir: Option<&Path>) -> PathBuf {
    log_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["video_to_audio"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn failures_keep_exit_zero_by_default() {
        let summary = RunSummary {
            success_count: 2,
            failure_count: 1,
        };
        assert_eq!(exit_status(&summary, false), EXIT_OK);
        assert_eq!(exit_status(&summary, true), EXIT_FILE_FAILURES);
        assert_eq!(exit_status(&RunSummary::default(), true), EXIT_OK);
    }

    #[test]
    fn usage_errors_map_to_configuration_status() {
        assert_eq!(usage_exit_status(ErrorKind::MissingRequiredArgument), EXIT_CONFIG_ERROR);
        assert_eq!(
            usage_exit_status(ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand),
            EXIT_CONFIG_ERROR
        );
        assert_eq!(usage_exit_status(ErrorKind::DisplayHelp), EXIT_OK);
        assert_eq!(usage_exit_status(ErrorKind::DisplayVersion), EXIT_OK);
    }

    #[test]
    fn cli_adapter_applies_overrides() {
        let cli = parse(&[
            "in",
            "out",
            "--ffmpeg",
            "/opt/bin/ffmpeg",
            "--bitrate",
            "320k",
            "--fail-on-error",
            "--no-progress",
        ]);
        let config = CliConfigAdapter::new(cli).get_config().unwrap();

        assert_eq!(config.encoding.program, PathBuf::from("/opt/bin/ffmpeg"));
        assert_eq!(config.encoding.bitrate, "320k");
        assert_eq!(config.encoding.audio_codec, "libmp3lame");
        assert!(config.fail_on_error);
        assert!(config.no_progress);
        assert!(config.source.is_absolute());
        assert!(config.destination.ends_with("out"));
    }

    #[test]
    fn cli_adapter_rejects_blank_codec() {
        let cli = parse(&["in", "out", "--audio-codec", "  "]);
        let err = CliConfigAdapter::new(cli).get_config().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn log_dir_defaults_to_logs() {
        assert_eq!(log_dir_or_default(None), PathBuf::from("logs"));
        assert_eq!(
            log_dir_or_default(Some(Path::new("/var/log/v2a"))),
            PathBuf::from("/var/log/v2a")
        );
    }
}
