//! 轉檔引擎邊界
//!
//! 所有媒體處理都交給外部引擎：先把輸入檔寫入引擎的暫存空間，
//! 再傳入命令列形式的參數列表執行，最後讀回輸出檔。

mod command;
mod error;
mod ffmpeg;
mod lazy;
mod pipeline;

pub use command::{
    CONCAT_MANIFEST, EncodeOptions, PREVIEW_DURATION_SECS, concat_args, concat_manifest,
    format_seconds, frame_args, preview_args, trim_args,
};
pub use error::{EngineError, EngineStage};
pub use ffmpeg::FfmpegEngine;
pub use lazy::LazyEngine;
pub use pipeline::{EngineJob, StagedInput, run_job};

/// 引擎介面：以名稱定址的暫存檔案 + 單一執行入口
pub trait Transcoder {
    /// 初始化引擎，重複呼叫應為 no-op
    fn load(&mut self) -> Result<(), EngineError>;

    fn is_loaded(&self) -> bool;

    fn write_file(&mut self, name: &str, data: &[u8]) -> Result<(), EngineError>;

    fn exec(&mut self, args: &[String]) -> Result<(), EngineError>;

    fn read_file(&mut self, name: &str) -> Result<Vec<u8>, EngineError>;

    /// 刪除暫存檔；檔案不存在時視為成功
    fn delete_file(&mut self, name: &str) -> Result<(), EngineError>;
}
