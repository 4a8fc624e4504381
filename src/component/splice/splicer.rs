use crate::component::{EditError, EditSession};
use crate::config::VideoTypeTable;
use crate::engine::{
    CONCAT_MANIFEST, EncodeOptions, EngineJob, LazyEngine, StagedInput, Transcoder, concat_args,
    concat_manifest,
};
use crate::media::{ArtifactKind, OutputArtifact, UploadedMedia};
use log::info;
use std::path::Path;

pub const MIN_MERGE_INPUTS: usize = 2;

pub struct Splicer<E: Transcoder> {
    session: EditSession<E>,
    videos: Vec<UploadedMedia>,
    encode: EncodeOptions,
}

impl<E: Transcoder> Splicer<E> {
    pub fn new(video_types: VideoTypeTable, engine: LazyEngine<E>, encode: EncodeOptions) -> Self {
        Self {
            session: EditSession::new(video_types, engine),
            videos: Vec::new(),
            encode,
        }
    }

    /// 依序加入影片，不去重；任何一個檔案不合格時整批都不加入
    pub fn add_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<usize, EditError> {
        let mut batch = Vec::with_capacity(paths.len());
        for path in paths {
            match self.session.open_upload(path.as_ref()) {
                Ok(media) => batch.push(media),
                Err(e) => {
                    for media in &batch {
                        self.session.release(media);
                    }
                    return Err(e);
                }
            }
        }

        let added = batch.len();
        self.videos.extend(batch);
        Ok(added)
    }

    #[must_use]
    pub fn videos(&self) -> &[UploadedMedia] {
        &self.videos
    }

    /// 從佇列移除一個影片並釋放它的物件 URL，其餘影片順序不變
    pub fn remove(&mut self, index: usize) -> Option<UploadedMedia> {
        if index >= self.videos.len() {
            return None;
        }
        let media = self.videos.remove(index);
        self.session.release(&media);
        info!("移除影片 {}", media.file_name);
        Some(media)
    }

    #[must_use]
    pub const fn session(&self) -> &EditSession<E> {
        &self.session
    }

    /// 合併所有已加入的影片
    ///
    /// 少於兩個影片時直接回報驗證錯誤，不會呼叫引擎。
    pub fn merge(&self) -> Result<OutputArtifact, EditError> {
        if self.videos.len() < MIN_MERGE_INPUTS {
            return Err(EditError::NotEnoughInputs {
                required: MIN_MERGE_INPUTS,
                actual: self.videos.len(),
            });
        }

        let kind = ArtifactKind::MergedVideo;
        self.session.run(kind, |registry| {
            let mut inputs = Vec::with_capacity(self.videos.len() + 1);
            let mut names = Vec::with_capacity(self.videos.len());

            for (index, video) in self.videos.iter().enumerate() {
                let name = video.staged_name(&format!("video{index}"));
                inputs.push(StagedInput::new(name.clone(), registry.read(&video.url)?));
                names.push(name);
            }
            inputs.push(StagedInput::new(
                CONCAT_MANIFEST,
                concat_manifest(&names).into_bytes(),
            ));

            info!("合併 {} 個影片: {}", names.len(), names.join(", "));

            Ok(EngineJob {
                inputs,
                args: concat_args(CONCAT_MANIFEST, kind.engine_output(), &self.encode),
                output: kind.engine_output().to_string(),
            })
        })
    }
}
