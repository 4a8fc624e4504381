use std::fmt;

/// 引擎呼叫的階段，錯誤訊息會標示失敗的是哪一步
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStage {
    Load,
    Write,
    Exec,
    Read,
    Delete,
}

impl fmt::Display for EngineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Load => "load",
            Self::Write => "write",
            Self::Exec => "exec",
            Self::Read => "read",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("轉檔引擎載入失敗: {reason}")]
    Load { reason: String },

    #[error("無法寫入引擎檔案 {name}: {reason}")]
    Write { name: String, reason: String },

    #[error("引擎指令執行失敗: {reason}")]
    Exec { reason: String },

    #[error("無法讀取引擎檔案 {name}: {reason}")]
    Read { name: String, reason: String },

    #[error("無法刪除引擎檔案 {name}: {reason}")]
    Delete { name: String, reason: String },

    #[error("引擎指令被中斷")]
    Interrupted,
}

impl EngineError {
    #[must_use]
    pub const fn stage(&self) -> EngineStage {
        match self {
            Self::Load { .. } => EngineStage::Load,
            Self::Write { .. } => EngineStage::Write,
            Self::Exec { .. } | Self::Interrupted => EngineStage::Exec,
            Self::Read { .. } => EngineStage::Read,
            Self::Delete { .. } => EngineStage::Delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupted_belongs_to_exec_stage() {
        assert_eq!(EngineError::Interrupted.stage(), EngineStage::Exec);
    }

    #[test]
    fn test_error_message_names_the_file() {
        let err = EngineError::Read {
            name: "thumbnail.png".to_string(),
            reason: "not found".to_string(),
        };
        assert_eq!(err.stage(), EngineStage::Read);
        assert!(err.to_string().contains("thumbnail.png"));
    }
}
