//! 上傳檔案、暫時性參照（物件 URL）與輸出成品

mod artifact;
mod object_url;
mod probe;
mod upload;

pub use artifact::{ArtifactKind, OutputArtifact, save_artifact};
pub use object_url::{BlobSource, ObjectUrl, ObjectUrlRegistry};
pub use probe::{MediaInfo, probe_media};
pub use upload::UploadedMedia;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("找不到檔案: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("不支援的影片格式: {}", .0.display())]
    UnsupportedType(PathBuf),

    #[error("物件 URL 不存在或已釋放: {0}")]
    UnknownUrl(String),

    #[error("檔案存取失敗 {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
