use crate::engine::EngineError;
use crate::media::MediaError;

/// 編輯類元件的錯誤
///
/// 驗證錯誤在呼叫引擎前就回報；引擎錯誤帶有失敗的階段。
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("至少需要 {required} 個影片，目前只有 {actual} 個")]
    NotEnoughInputs { required: usize, actual: usize },

    #[error("尚未選擇影片")]
    NoFileSelected,

    #[error("無效的剪輯範圍: {start}s - {end}s")]
    InvalidRange { start: f64, end: f64 },

    #[error("無效的時間點: {0}s")]
    InvalidTimestamp(f64),

    #[error("已有處理中的工作，請稍候")]
    Busy,

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Media(#[from] MediaError),
}

impl EditError {
    /// 是否為呼叫引擎前就能發現的輸入錯誤
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NotEnoughInputs { .. }
                | Self::NoFileSelected
                | Self::InvalidRange { .. }
                | Self::InvalidTimestamp(_)
        )
    }
}
