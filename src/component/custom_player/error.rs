use crate::media::MediaError;

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("音量必須介於 0 到 1 之間: {0}")]
    InvalidVolume(f64),

    #[error("播放速度必須介於 0.5 到 2.0 之間，且以 0.25 為單位: {0}")]
    InvalidSpeed(f64),

    #[error("尚未載入影片")]
    NoSource,

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("播放器錯誤: {0}")]
    Backend(String),
}
