use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveDate};
use indicatif::ProgressBar;

pub const LOG_FILE_NAME: &str = "skill_execution.log";
pub const LOG_BACKUP_COUNT: usize = 3;
const BACKUP_DATE_FORMAT: &str = "%Y-%m-%d";

/// 按天滾動的日誌檔案
///
/// 跨日後第一次寫入時，目前檔案改名為 `<name>.<YYYY-MM-DD>`（舊日期），
/// 再開新檔；僅保留最近 `backup_count` 個備份。
pub struct DailyRotatingFile {
    dir: PathBuf,
    file_name: String,
    backup_count: usize,
    current_date: NaiveDate,
    file: File,
}

impl DailyRotatingFile {
    pub fn open(dir: &Path, file_name: &str, backup_count: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(file_name);
        // 沿用既有檔案的修改日期，讓前一天留下的檔案在首次寫入時滾動
        let current_date = fs::metadata(&path)
            .and_then(|m| m.modified())
            .map(|modified| DateTime::<Local>::from(modified).date_naive())
            .unwrap_or_else(|_| Local::now().date_naive());
        let file = open_append(&path)?;
        Ok(DailyRotatingFile {
            dir: dir.to_path_buf(),
            file_name: file_name.to_string(),
            backup_count,
            current_date,
            file,
        })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    pub fn rotate_if_needed(&mut self, today: NaiveDate) -> io::Result<()> {
        if today == self.current_date {
            return Ok(());
        }
        self.file.flush()?;
        let backup = self.dir.join(format!(
            "{}.{}",
            self.file_name,
            self.current_date.format(BACKUP_DATE_FORMAT)
        ));
        fs::rename(self.path(), &backup)?;
        self.file = open_append(&self.path())?;
        self.current_date = today;
        self.prune_backups()
    }

    /// 依檔名中的日期排序，刪除超出保留數量的舊備份
    fn prune_backups(&self) -> io::Result<()> {
        let prefix = format!("{}.", self.file_name);
        let mut backups: Vec<(NaiveDate, PathBuf)> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                let date = name.strip_prefix(&prefix)?;
                let date = NaiveDate::parse_from_str(date, BACKUP_DATE_FORMAT).ok()?;
                Some((date, entry.path()))
            })
            .collect();
        backups.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, path) in backups.into_iter().skip(self.backup_count) {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl Write for DailyRotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.rotate_if_needed(Local::now().date_naive())?;
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// 同時寫入主控台與日誌檔案
// 正在顯示的進度條；主控台輸出日誌時先暫停它，避免互相覆蓋
static CONSOLE_PROGRESS: Mutex<Option<ProgressBar>> = Mutex::new(None);

pub fn register_console_progress(pb: Option<ProgressBar>) {
    *CONSOLE_PROGRESS.lock().unwrap_or_else(|e| e.into_inner()) = pb;
}

pub fn console_progress_active() -> bool {
    CONSOLE_PROGRESS
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .is_some()
}

fn write_console(buf: &[u8]) -> io::Result<()> {
    let pb = CONSOLE_PROGRESS
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .clone();
    match pb {
        Some(pb) => pb.suspend(|| io::stdout().write_all(buf)),
        None => io::stdout().write_all(buf),
    }
}

pub struct TeeWriter {
    file: Option<DailyRotatingFile>,
}

impl TeeWriter {
    pub fn new(file: Option<DailyRotatingFile>) -> Self {
        TeeWriter { file }
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        write_console(buf)?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}
