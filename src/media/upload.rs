use super::{MediaError, ObjectUrl, ObjectUrlRegistry};
use crate::config::VideoTypeTable;
use std::path::{Path, PathBuf};

/// 使用者選取的影片，以及為它建立的物件 URL
#[derive(Debug, Clone)]
pub struct UploadedMedia {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: String,
    pub size: u64,
    pub url: ObjectUrl,
}

impl UploadedMedia {
    /// 檢查檔案並建立播放用的物件 URL
    ///
    /// 只接受影片類型表中的副檔名，不檢查實際內容。
    pub fn open(
        path: &Path,
        video_types: &VideoTypeTable,
        registry: &mut ObjectUrlRegistry,
    ) -> Result<Self, MediaError> {
        let metadata = match path.metadata() {
            Ok(metadata) if metadata.is_file() => metadata,
            _ => return Err(MediaError::MissingFile(path.to_path_buf())),
        };

        let mime = video_types
            .mime_for(path)
            .ok_or_else(|| MediaError::UnsupportedType(path.to_path_buf()))?
            .to_string();

        let file_name = path
            .file_name()
            .map_or_else(|| "video".to_string(), |s| s.to_string_lossy().to_string());

        let url = registry.create_for_file(path, &mime);

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            mime,
            size: metadata.len(),
            url,
        })
    }

    /// 寫入引擎時使用的檔名，保留原始副檔名
    #[must_use]
    pub fn staged_name(&self, stem: &str) -> String {
        let ext = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or_else(|| "mp4".to_string(), str::to_lowercase);
        format!("{stem}.{ext}")
    }
}
