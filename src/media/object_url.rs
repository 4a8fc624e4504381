use super::MediaError;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// 暫時性、可撤銷的參照，可用來當作播放來源或下載來源
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    fn mint() -> Self {
        Self(format!("blob:video-workbench/{}", Uuid::new_v4()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// URL 背後的資料：上傳檔案只記錄路徑，引擎輸出則保留在記憶體
#[derive(Debug)]
pub enum BlobSource {
    File(PathBuf),
    Bytes(Vec<u8>),
}

#[derive(Debug)]
struct BlobEntry {
    source: BlobSource,
    mime: String,
}

/// 追蹤元件建立的所有物件 URL
///
/// 被取代的 URL 應呼叫 [`ObjectUrlRegistry::revoke`]；registry 被 drop 時
/// 其餘 URL 一併釋放。
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    entries: HashMap<ObjectUrl, BlobEntry>,
}

impl ObjectUrlRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_for_file(&mut self, path: &Path, mime: &str) -> ObjectUrl {
        self.insert(BlobSource::File(path.to_path_buf()), mime)
    }

    pub fn create_for_bytes(&mut self, data: Vec<u8>, mime: &str) -> ObjectUrl {
        self.insert(BlobSource::Bytes(data), mime)
    }

    fn insert(&mut self, source: BlobSource, mime: &str) -> ObjectUrl {
        let url = ObjectUrl::mint();
        debug!("建立物件 URL {url} ({mime})");
        self.entries.insert(
            url.clone(),
            BlobEntry {
                source,
                mime: mime.to_string(),
            },
        );
        url
    }

    /// 釋放 URL，回傳它原本是否有效
    pub fn revoke(&mut self, url: &ObjectUrl) -> bool {
        let removed = self.entries.remove(url).is_some();
        if removed {
            debug!("釋放物件 URL {url}");
        }
        removed
    }

    pub fn revoke_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        if count > 0 {
            debug!("釋放全部 {count} 個物件 URL");
        }
        count
    }

    #[must_use]
    pub fn is_live(&self, url: &ObjectUrl) -> bool {
        self.entries.contains_key(url)
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn mime(&self, url: &ObjectUrl) -> Option<&str> {
        self.entries.get(url).map(|entry| entry.mime.as_str())
    }

    #[must_use]
    pub fn source(&self, url: &ObjectUrl) -> Option<&BlobSource> {
        self.entries.get(url).map(|entry| &entry.source)
    }

    /// 讀出 URL 背後的完整內容
    pub fn read(&self, url: &ObjectUrl) -> Result<Vec<u8>, MediaError> {
        match self.source(url) {
            Some(BlobSource::Bytes(data)) => Ok(data.clone()),
            Some(BlobSource::File(path)) => fs::read(path).map_err(|source| MediaError::Io {
                path: path.clone(),
                source,
            }),
            None => Err(MediaError::UnknownUrl(url.to_string())),
        }
    }
}

impl Drop for ObjectUrlRegistry {
    fn drop(&mut self) {
        self.revoke_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_unique() {
        let mut registry = ObjectUrlRegistry::new();
        let a = registry.create_for_bytes(vec![1], "video/mp4");
        let b = registry.create_for_bytes(vec![1], "video/mp4");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("blob:"));
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn test_revoked_url_cannot_be_read() {
        let mut registry = ObjectUrlRegistry::new();
        let url = registry.create_for_bytes(vec![7, 8, 9], "image/png");
        assert_eq!(registry.read(&url).unwrap(), vec![7, 8, 9]);
        assert_eq!(registry.mime(&url), Some("image/png"));

        assert!(registry.revoke(&url));
        assert!(!registry.revoke(&url));
        assert!(!registry.is_live(&url));
        assert!(matches!(registry.read(&url), Err(MediaError::UnknownUrl(_))));
    }

    #[test]
    fn test_file_backed_url_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        fs::write(&path, b"fake video").unwrap();

        let mut registry = ObjectUrlRegistry::new();
        let url = registry.create_for_file(&path, "video/mp4");
        assert_eq!(registry.read(&url).unwrap(), b"fake video");

        fs::remove_file(&path).unwrap();
        assert!(matches!(registry.read(&url), Err(MediaError::Io { .. })));
    }

    #[test]
    fn test_revoke_all() {
        let mut registry = ObjectUrlRegistry::new();
        registry.create_for_bytes(vec![], "video/mp4");
        registry.create_for_bytes(vec![], "video/webm");
        assert_eq!(registry.revoke_all(), 2);
        assert_eq!(registry.live_count(), 0);
    }
}
