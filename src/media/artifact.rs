use super::{MediaError, ObjectUrl, ObjectUrlRegistry};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 各功能輸出成品的固定檔名與 MIME 類型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    MergedVideo,
    Thumbnail,
    TrimmedVideo,
    VideoPreview,
}

impl ArtifactKind {
    /// 下載時建議的檔名
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::MergedVideo => "merged-video.mp4",
            Self::Thumbnail => "thumbnail.png",
            Self::TrimmedVideo => "trimmed-video.mp4",
            Self::VideoPreview => "video-preview.webm",
        }
    }

    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::MergedVideo | Self::TrimmedVideo => "video/mp4",
            Self::Thumbnail => "image/png",
            Self::VideoPreview => "video/webm",
        }
    }

    /// 引擎暫存空間中的輸出檔名
    #[must_use]
    pub const fn engine_output(self) -> &'static str {
        match self {
            Self::MergedVideo | Self::TrimmedVideo => "output.mp4",
            Self::Thumbnail => "thumbnail.png",
            Self::VideoPreview => "preview.webm",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub url: ObjectUrl,
    pub kind: ArtifactKind,
    pub size: usize,
}

impl OutputArtifact {
    #[must_use]
    pub const fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }

    #[must_use]
    pub const fn mime(&self) -> &'static str {
        self.kind.mime()
    }
}

/// 將成品存到輸出資料夾，同名檔案已存在時加上 ` (n)` 後綴，不覆蓋
pub fn save_artifact(
    registry: &ObjectUrlRegistry,
    artifact: &OutputArtifact,
    output_dir: &Path,
) -> Result<PathBuf, MediaError> {
    let data = registry.read(&artifact.url)?;

    fs::create_dir_all(output_dir).map_err(|source| MediaError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let destination = available_path(output_dir, artifact.file_name());
    fs::write(&destination, &data).map_err(|source| MediaError::Io {
        path: destination.clone(),
        source,
    })?;

    info!("已儲存 {} ({} bytes)", destination.display(), data.len());
    Ok(destination)
}

fn available_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map_or_else(|| file_name.to_string(), |s| s.to_string_lossy().to_string());
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1..)
        .map(|n| dir.join(format!("{stem} ({n}){ext}")))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_and_mime_types() {
        assert_eq!(ArtifactKind::MergedVideo.file_name(), "merged-video.mp4");
        assert_eq!(ArtifactKind::Thumbnail.mime(), "image/png");
        assert_eq!(ArtifactKind::VideoPreview.mime(), "video/webm");
        assert_eq!(ArtifactKind::TrimmedVideo.engine_output(), "output.mp4");
    }

    #[test]
    fn test_save_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = ObjectUrlRegistry::new();
        let artifact = OutputArtifact {
            url: registry.create_for_bytes(b"png bytes".to_vec(), "image/png"),
            kind: ArtifactKind::Thumbnail,
            size: 9,
        };

        let first = save_artifact(&registry, &artifact, dir.path()).unwrap();
        let second = save_artifact(&registry, &artifact, dir.path()).unwrap();

        assert_eq!(first, dir.path().join("thumbnail.png"));
        assert_eq!(second, dir.path().join("thumbnail (1).png"));
        assert_eq!(fs::read(&second).unwrap(), b"png bytes");
    }

    #[test]
    fn test_save_revoked_artifact_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = ObjectUrlRegistry::new();
        let url = registry.create_for_bytes(vec![1, 2, 3], "video/mp4");
        registry.revoke(&url);

        let artifact = OutputArtifact {
            url,
            kind: ArtifactKind::MergedVideo,
            size: 3,
        };
        assert!(save_artifact(&registry, &artifact, dir.path()).is_err());
        assert!(!dir.path().join("merged-video.mp4").exists());
    }
}
