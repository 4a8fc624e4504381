use crate::component::{EditError, EditSession};
use crate::config::VideoTypeTable;
use crate::engine::{
    EngineJob, LazyEngine, PREVIEW_DURATION_SECS, StagedInput, Transcoder, format_seconds,
    preview_args,
};
use crate::media::{ArtifactKind, OutputArtifact, UploadedMedia};
use log::{info, warn};
use std::path::Path;

pub struct PreviewGenerator<E: Transcoder> {
    session: EditSession<E>,
    source: Option<UploadedMedia>,
    duration: Option<f64>,
    start: f64,
}

impl<E: Transcoder> PreviewGenerator<E> {
    pub fn new(video_types: VideoTypeTable, engine: LazyEngine<E>) -> Self {
        Self {
            session: EditSession::new(video_types, engine),
            source: None,
            duration: None,
            start: 0.0,
        }
    }

    pub fn select_file(&mut self, path: &Path) -> Result<&UploadedMedia, EditError> {
        self.session.replace_source(&mut self.source, path)?;
        self.duration = None;
        self.start = 0.0;
        self.source.as_ref().ok_or(EditError::NoFileSelected)
    }

    #[must_use]
    pub const fn source(&self) -> Option<&UploadedMedia> {
        self.source.as_ref()
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = (duration.is_finite() && duration > 0.0).then_some(duration);
    }

    /// 設定預覽起點，已知長度時必須落在 `[0, duration)`
    ///
    /// 剩餘長度不足 3 秒時仍接受，輸出會比較短。
    pub fn select_start(&mut self, seconds: f64) -> Result<(), EditError> {
        let in_range = seconds.is_finite()
            && seconds >= 0.0
            && self.duration.is_none_or(|duration| seconds < duration);
        if !in_range {
            return Err(EditError::InvalidTimestamp(seconds));
        }

        if let Some(duration) = self.duration
            && duration - seconds < PREVIEW_DURATION_SECS
        {
            warn!(
                "起點 {}s 之後只剩 {}s，預覽會短於 {}s",
                format_seconds(seconds),
                format_seconds(duration - seconds),
                format_seconds(PREVIEW_DURATION_SECS)
            );
        }
        self.start = seconds;
        Ok(())
    }

    #[must_use]
    pub const fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub const fn session(&self) -> &EditSession<E> {
        &self.session
    }

    pub fn generate(&self) -> Result<OutputArtifact, EditError> {
        let source = self.source.as_ref().ok_or(EditError::NoFileSelected)?;
        let kind = ArtifactKind::VideoPreview;
        let start = self.start;

        self.session.run(kind, |registry| {
            let input = source.staged_name("input");
            info!(
                "產生預覽 {} @ {}s",
                source.file_name,
                format_seconds(start)
            );
            Ok(EngineJob {
                args: preview_args(&input, start, PREVIEW_DURATION_SECS, kind.engine_output()),
                inputs: vec![StagedInput::new(input, registry.read(&source.url)?)],
                output: kind.engine_output().to_string(),
            })
        })
    }
}
