use std::io;
use std::path::{Component, Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::models::file::{FileCollectInput, FileCollectOutput, InputFile};
use crate::service::traits::i_service::FileServiceTrait;

/// 檔案服務，負責掃描源目錄並實現 FileServiceTrait
pub struct FileService;

impl FileService {
    pub fn new() -> Self {
        FileService
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::new()
    }
}

impl FileServiceTrait for FileService {
    fn collect_files(&self, input: FileCollectInput) -> io::Result<FileCollectOutput> {
        let mut output = FileCollectOutput::default();

        for entry in WalkDir::new(&input.source_root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // 根目錄本身無法讀取時直接回報
                    if e.depth() == 0 {
                        return Err(e.into());
                    }
                    warn!("略過無法讀取的項目：{}", e);
                    output.skipped_entries += 1;
                    continue;
                }
            };

            if entry.file_type().is_dir() || !has_extension(entry.path(), &input.extension) {
                continue;
            }

            let path = entry.into_path();
            let relative_path = relative_to(&input.source_root, &path)?;
            debug!("發現檔案：{}", relative_path.display());
            output.files.push(InputFile {
                path,
                relative_path,
            });
        }

        output.files.sort();
        Ok(output)
    }
}

/// 檔名以 `.<extension>` 結尾即符合，區分大小寫；檔名恰為 `.mp4` 也算
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let suffix = format!(".{}", extension);
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(&suffix))
        .unwrap_or(false)
}

/// 替換副檔名；檔名只有副檔名（如 `.mp4`）時整個換掉
fn replace_extension(path: &Path, extension: &str) -> PathBuf {
    match (path.extension(), path.file_name()) {
        (None, Some(name)) if name.to_string_lossy().starts_with('.') => {
            path.with_file_name(format!(".{}", extension))
        }
        _ => path.with_extension(extension),
    }
}

fn relative_to(root: &Path, path: &Path) -> io::Result<PathBuf> {
    let relative = pathdiff::diff_paths(path, root).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("無法計算相對路徑：{}", path.display()),
        )
    })?;
    if relative.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("路徑 {} 不在 {} 之下", path.display(), root.display()),
        ));
    }
    Ok(relative)
}

/// 計算輸出路徑：源目錄換成目標目錄，副檔名換成輸出副檔名，其餘路徑段不變
pub fn map_output_path(
    source_root: &Path,
    destination_root: &Path,
    input_path: &Path,
    output_extension: &str,
) -> io::Result<PathBuf> {
    let relative = relative_to(source_root, input_path)?;
    Ok(replace_extension(&destination_root.join(relative), output_extension))
}
