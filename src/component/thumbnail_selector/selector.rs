use crate::component::{EditError, EditSession};
use crate::config::VideoTypeTable;
use crate::engine::{EngineJob, LazyEngine, StagedInput, Transcoder, format_seconds, frame_args};
use crate::media::{ArtifactKind, OutputArtifact, UploadedMedia};
use log::info;
use std::path::Path;

pub struct ThumbnailSelector<E: Transcoder> {
    session: EditSession<E>,
    source: Option<UploadedMedia>,
    duration: Option<f64>,
    selected_time: f64,
}

impl<E: Transcoder> ThumbnailSelector<E> {
    pub fn new(video_types: VideoTypeTable, engine: LazyEngine<E>) -> Self {
        Self {
            session: EditSession::new(video_types, engine),
            source: None,
            duration: None,
            selected_time: 0.0,
        }
    }

    /// 選擇新影片，時間點歸零，舊影片的物件 URL 會被釋放
    pub fn select_file(&mut self, path: &Path) -> Result<&UploadedMedia, EditError> {
        self.session.replace_source(&mut self.source, path)?;
        self.duration = None;
        self.selected_time = 0.0;
        self.source.as_ref().ok_or(EditError::NoFileSelected)
    }

    #[must_use]
    pub const fn source(&self) -> Option<&UploadedMedia> {
        self.source.as_ref()
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = (duration.is_finite() && duration > 0.0).then_some(duration);
    }

    /// 記錄播放進度上的擷取時間點
    pub fn select_time(&mut self, seconds: f64) -> Result<(), EditError> {
        let in_range = seconds.is_finite()
            && seconds >= 0.0
            && self.duration.is_none_or(|duration| seconds <= duration);
        if !in_range {
            return Err(EditError::InvalidTimestamp(seconds));
        }
        self.selected_time = seconds;
        Ok(())
    }

    #[must_use]
    pub const fn selected_time(&self) -> f64 {
        self.selected_time
    }

    #[must_use]
    pub const fn session(&self) -> &EditSession<E> {
        &self.session
    }

    /// 擷取目前時間點的影格
    ///
    /// 寫入、擷取、讀取任一步失敗都會中止並回報該步驟；
    /// 輸入檔與輸出圖檔在結束後都會從引擎中刪除。
    pub fn capture(&self) -> Result<OutputArtifact, EditError> {
        let source = self.source.as_ref().ok_or(EditError::NoFileSelected)?;
        let kind = ArtifactKind::Thumbnail;
        let timestamp = self.selected_time;

        self.session.run(kind, |registry| {
            let input = source.staged_name("input");
            info!(
                "擷取縮圖 {} @ {}s",
                source.file_name,
                format_seconds(timestamp)
            );
            Ok(EngineJob {
                args: frame_args(&input, timestamp, kind.engine_output()),
                inputs: vec![StagedInput::new(input, registry.read(&source.url)?)],
                output: kind.engine_output().to_string(),
            })
        })
    }
}
