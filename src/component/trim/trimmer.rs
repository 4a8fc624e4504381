use crate::component::{EditError, EditSession};
use crate::config::VideoTypeTable;
use crate::engine::{
    EncodeOptions, EngineJob, LazyEngine, StagedInput, Transcoder, format_seconds, trim_args,
};
use crate::media::{ArtifactKind, OutputArtifact, UploadedMedia};
use log::info;
use std::path::Path;

/// 尚未調整範圍時使用的預設區段（秒）
pub const DEFAULT_TRIM_RANGE: (f64, f64) = (0.0, 10.0);

/// 剪輯範圍，保證 `0 <= start < end`，已知長度時 `end <= duration`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimRange {
    start: f64,
    end: f64,
}

impl TrimRange {
    pub fn new(start: f64, end: f64, duration: Option<f64>) -> Result<Self, EditError> {
        let valid = start.is_finite()
            && end.is_finite()
            && start >= 0.0
            && start < end
            && duration.is_none_or(|duration| end <= duration);
        if valid {
            Ok(Self { start, end })
        } else {
            Err(EditError::InvalidRange { start, end })
        }
    }

    #[must_use]
    pub const fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

pub struct Trimmer<E: Transcoder> {
    session: EditSession<E>,
    source: Option<UploadedMedia>,
    duration: Option<f64>,
    range: (f64, f64),
    encode: EncodeOptions,
}

impl<E: Transcoder> Trimmer<E> {
    pub fn new(video_types: VideoTypeTable, engine: LazyEngine<E>, encode: EncodeOptions) -> Self {
        Self {
            session: EditSession::new(video_types, engine),
            source: None,
            duration: None,
            range: DEFAULT_TRIM_RANGE,
            encode,
        }
    }

    /// 選擇新影片，範圍回到預設值
    pub fn select_file(&mut self, path: &Path) -> Result<&UploadedMedia, EditError> {
        self.session.replace_source(&mut self.source, path)?;
        self.duration = None;
        self.range = DEFAULT_TRIM_RANGE;
        self.source.as_ref().ok_or(EditError::NoFileSelected)
    }

    #[must_use]
    pub const fn source(&self) -> Option<&UploadedMedia> {
        self.source.as_ref()
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = (duration.is_finite() && duration > 0.0).then_some(duration);
    }

    #[must_use]
    pub const fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn select_range(&mut self, start: f64, end: f64) -> Result<TrimRange, EditError> {
        let range = TrimRange::new(start, end, self.duration)?;
        self.range = (range.start(), range.end());
        Ok(range)
    }

    /// 目前的範圍；預設範圍可能超出較短影片的長度，所以這裡會重新驗證
    pub fn range(&self) -> Result<TrimRange, EditError> {
        TrimRange::new(self.range.0, self.range.1, self.duration)
    }

    #[must_use]
    pub const fn session(&self) -> &EditSession<E> {
        &self.session
    }

    /// 剪出選定範圍，範圍不合法時不會呼叫引擎
    pub fn trim(&self) -> Result<OutputArtifact, EditError> {
        let source = self.source.as_ref().ok_or(EditError::NoFileSelected)?;
        let range = self.range()?;
        let kind = ArtifactKind::TrimmedVideo;

        self.session.run(kind, |registry| {
            let input = source.staged_name("input");
            info!(
                "剪輯 {}: {}s - {}s",
                source.file_name,
                format_seconds(range.start()),
                format_seconds(range.end())
            );
            Ok(EngineJob {
                args: trim_args(
                    &input,
                    range.start(),
                    range.duration(),
                    kind.engine_output(),
                    &self.encode,
                ),
                inputs: vec![StagedInput::new(input, registry.read(&source.url)?)],
                output: kind.engine_output().to_string(),
            })
        })
    }
}
