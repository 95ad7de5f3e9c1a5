use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct FileCollectInput {
    pub source_root: PathBuf,
    pub extension: String,
}

/// 源目錄下找到的待轉換檔案
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct InputFile {
    pub path: PathBuf,
    pub relative_path: PathBuf,
}

#[derive(Debug, Default)]
pub struct FileCollectOutput {
    pub files: Vec<InputFile>,
    pub skipped_entries: usize,
}
