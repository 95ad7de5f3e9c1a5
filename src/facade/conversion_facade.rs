use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Mutex;

use log::{debug, error, info, warn};

use crate::config::config::{absolutize, validate_source_dir};
use crate::config::ports::{AppConfig, ConversionPort};
use crate::error::{FailureReason, RunError};
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{
    ConversionInput, ConversionOutput, ConversionResult, RunPhase, RunSummary,
};
use crate::models::file::{FileCollectInput, InputFile};
use crate::service::file::{map_output_path, FileService};
use crate::service::traits::i_service::{FileServiceTrait, TranscoderServiceTrait};
use crate::service::transcoder::FfmpegTranscoder;
use crate::utils::utils::create_progress_bar;

/// 批次轉換流程，依序處理每個檔案
pub struct ConversionFacade {
    file_service: Box<dyn FileServiceTrait>,
    transcoder: Box<dyn TranscoderServiceTrait>,
    phase: Mutex<RunPhase>,
}

impl ConversionFacade {
    pub fn new(
        file_service: Box<dyn FileServiceTrait>,
        transcoder: Box<dyn TranscoderServiceTrait>,
    ) -> Self {
        ConversionFacade {
            file_service,
            transcoder,
            phase: Mutex::new(RunPhase::Idle),
        }
    }

    /// 目前的流程階段；任何提前結束的執行都停在 Terminated
    pub fn phase(&self) -> RunPhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn advance(&self, next: RunPhase) {
        let mut phase = self.phase.lock().unwrap_or_else(|e| e.into_inner());
        debug!("流程階段：{:?} -> {:?}", *phase, next);
        *phase = next;
    }

    fn terminate<E>(&self, e: E) -> RunError
    where
        E: Into<RunError>,
    {
        self.advance(RunPhase::Terminated);
        e.into()
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn execute_conversion(&self, input: ConversionInput) -> Result<ConversionOutput, RunError> {
        self.advance(RunPhase::Idle);
        info!("--- 開始任務: 從 {} 提取音訊 ---", input.source_root.display());

        self.advance(RunPhase::Validating);
        let source_root = validate_source_dir(&input.source_root).map_err(|e| self.terminate(e))?;
        let destination_root =
            absolutize(&input.destination_root).map_err(|e| self.terminate(e))?;

        self.advance(RunPhase::Discovering);
        let collected = self
            .file_service
            .collect_files(FileCollectInput {
                source_root: source_root.clone(),
                extension: input.input_extension.clone(),
            })
            .map_err(|e| self.terminate(e))?;
        if collected.skipped_entries > 0 {
            warn!("掃描時略過 {} 個無法讀取的項目", collected.skipped_entries);
        }

        let discovered = collected.files.len();
        if discovered == 0 {
            warn!("掃描完成：未發現任何 .{} 檔案。", input.input_extension);
            self.advance(RunPhase::Terminated);
            return Ok(ConversionOutput {
                output_path: destination_root,
                discovered: 0,
                summary: RunSummary::default(),
            });
        }
        info!(
            "掃描完成，發現 {} 個影片檔案。目標路徑: {}",
            discovered,
            destination_root.display()
        );

        self.advance(RunPhase::Processing);
        let mut summary = RunSummary::default();
        let pm = create_progress_bar(discovered as u64, input.no_progress);
        for (index, file) in collected.files.iter().enumerate() {
            pm.update(index as u64, &file.relative_path);
            let result = self.process_file(
                file,
                &source_root,
                &destination_root,
                &input.output_extension,
            );
            summary.record(&result);
        }
        pm.finish(format!("處理完成，{}", summary));

        self.advance(RunPhase::Reporting);
        debug_assert_eq!(summary.total(), discovered);
        info!(
            "--- 任務結束: 共 {} 個，成功 {}, 失敗 {} ---",
            summary.total(),
            summary.success_count,
            summary.failure_count
        );
        self.advance(RunPhase::Terminated);

        Ok(ConversionOutput {
            output_path: destination_root,
            discovered,
            summary,
        })
    }
}

impl ConversionFacade {
    /// 單一檔案的錯誤邊界：任何錯誤或 panic 都轉為 Failure，不中斷整批
    fn process_file(
        &self,
        file: &InputFile,
        source_root: &Path,
        destination_root: &Path,
        output_extension: &str,
    ) -> ConversionResult {
        info!("正在處理: {}", file.relative_path.display());
        let file_name = file
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.path.display().to_string());

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.convert_one(file, source_root, destination_root, output_extension)
        }));
        let result = outcome.unwrap_or_else(|payload| {
            ConversionResult::Failure(FailureReason::Local(panic_message(payload)))
        });

        if let ConversionResult::Failure(reason) = &result {
            match reason {
                FailureReason::ToolExit { .. } => error!("FFmpeg 報錯 ({}): {}", file_name, reason),
                FailureReason::Local(_) => error!("系統錯誤 ({}): {}", file_name, reason),
            }
        }
        result
    }

    fn convert_one(
        &self,
        file: &InputFile,
        source_root: &Path,
        destination_root: &Path,
        output_extension: &str,
    ) -> ConversionResult {
        let target = match map_output_path(source_root, destination_root, &file.path, output_extension) {
            Ok(target) => target,
            Err(e) => return ConversionResult::Failure(FailureReason::Local(e.to_string())),
        };

        if let Some(parent) = target.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                return ConversionResult::Failure(FailureReason::Local(format!(
                    "無法建立目錄 {}：{}",
                    parent.display(),
                    e
                )));
            }
        }

        match self.transcoder.transcode(&file.path, &target) {
            Ok(output) if output.success => {
                let name = target
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                info!("成功提取: {}", name);
                ConversionResult::Success
            }
            Ok(output) => ConversionResult::Failure(FailureReason::ToolExit {
                code: output.code,
                diagnostics: output.diagnostics,
            }),
            Err(e) => ConversionResult::Failure(FailureReason::Local(e.to_string())),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "未知的內部錯誤".to_string()
    }
}

// 以 FileService 與 FfmpegTranscoder 組裝並執行轉換
pub struct ConversionAdapter;

impl ConversionPort for ConversionAdapter {
    fn execute(&self, config: AppConfig) -> Result<ConversionOutput, RunError> {
        let transcoder = FfmpegTranscoder::new(config.encoding.clone());
        match transcoder.locate() {
            Some(path) => info!("使用轉碼程式：{}", path.display()),
            None => warn!(
                "找不到轉碼程式 {}，所有檔案都將轉換失敗",
                transcoder.settings().program.display()
            ),
        }

        let facade = ConversionFacade::new(Box::new(FileService::new()), Box::new(transcoder));
        facade.execute_conversion(ConversionInput {
            source_root: config.source,
            destination_root: config.destination,
            input_extension: config.input_extension,
            output_extension: config.output_extension,
            no_progress: config.no_progress,
        })
    }
}
