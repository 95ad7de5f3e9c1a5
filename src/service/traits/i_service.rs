use std::io;
use std::path::Path;

use crate::models::file::{FileCollectInput, FileCollectOutput};
use crate::models::transcode::TranscodeOutput;

// File 服務接口，負責檔案收集
pub trait FileServiceTrait: Send + Sync {
    /// 遞迴收集源目錄下符合副檔名的檔案
    /// # 參數
    /// - input: 源目錄與副檔名
    /// # 回傳
    /// - 依路徑排序的檔案列表；無法讀取的項目會被略過並計數
    fn collect_files(&self, input: FileCollectInput) -> io::Result<FileCollectOutput>;
}

// 轉碼服務接口，負責執行外部轉碼程式
pub trait TranscoderServiceTrait: Send + Sync {
    /// 將單一輸入檔轉碼為輸出檔，阻塞直到程式結束
    /// # 回傳
    /// - 程式已執行時返回其結束狀態與 stderr；無法啟動時返回 IO 錯誤
    fn transcode(&self, input: &Path, output: &Path) -> io::Result<TranscodeOutput>;
}
