use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use env_logger::{Target, WriteStyle};
use indicatif::{ProgressBar, ProgressStyle};

use crate::utils::logging::{
    register_console_progress, DailyRotatingFile, TeeWriter, LOG_BACKUP_COUNT, LOG_FILE_NAME,
};

pub fn parse_log_level(log_level: &str) -> log::LevelFilter {
    match log_level {
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    }
}

/// 初始化日誌：主控台與按天滾動的檔案同時輸出
///
/// 每個程序只會安裝一次；重複呼叫不會增加輸出目標。
pub fn setup_logging(log_level: &str, log_dir: &Path) -> io::Result<()> {
    if log::max_level() != log::LevelFilter::Off {
        return Ok(());
    }

    let file = match DailyRotatingFile::open(log_dir, LOG_FILE_NAME, LOG_BACKUP_COUNT) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("無法開啟日誌檔案 {}：{}，僅輸出至主控台", log_dir.display(), e);
            None
        }
    };

    let result = env_logger::Builder::new()
        .filter_level(parse_log_level(log_level))
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.level(),
                record.args()
            )
        })
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(TeeWriter::new(file))))
        .try_init();

    if result.is_err() {
        log::debug!("日誌系統已初始化，略過重複設定");
    }
    Ok(())
}

pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
}

impl ProgressManager {
    pub fn new(total: u64, no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            let style = ProgressStyle::default_bar()
                .template("{msg} [{bar:40}] {pos}/{len} ETA: {eta_precise}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-");
            pb.set_style(style);
            register_console_progress(Some(pb.clone()));
            pb
        };
        ProgressManager { pb, no_progress }
    }

    pub fn update(&self, processed: u64, current: &Path) {
        if self.no_progress {
            return;
        }
        self.pb.set_message(format!("處理中：{}", current.display()));
        self.pb.set_position(processed);
    }

    pub fn finish(&self, message: String) {
        if self.no_progress {
            return;
        }
        self.pb.finish_with_message(message);
    }
}

impl Drop for ProgressManager {
    fn drop(&mut self) {
        if !self.no_progress {
            register_console_progress(None);
        }
    }
}

pub fn create_progress_bar(total: u64, no_progress: bool) -> ProgressManager {
    ProgressManager::new(total, no_progress)
}
