use super::EditError;
use crate::config::VideoTypeTable;
use crate::engine::{EngineJob, LazyEngine, Transcoder, run_job};
use crate::job::{JobGate, JobState};
use crate::media::{
    ArtifactKind, ObjectUrl, ObjectUrlRegistry, OutputArtifact, UploadedMedia, save_artifact,
};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 編輯類元件共用的狀態：物件 URL、延遲載入的引擎、工作閘門與最後一次的成品
///
/// 主要動作透過 [`EditSession::run`] 執行，同一時間只允許一個工作。
pub struct EditSession<E: Transcoder> {
    video_types: VideoTypeTable,
    registry: Mutex<ObjectUrlRegistry>,
    engine: Mutex<LazyEngine<E>>,
    gate: JobGate,
    output: Mutex<Option<OutputArtifact>>,
}

impl<E: Transcoder> EditSession<E> {
    pub fn new(video_types: VideoTypeTable, engine: LazyEngine<E>) -> Self {
        Self {
            video_types,
            registry: Mutex::new(ObjectUrlRegistry::new()),
            engine: Mutex::new(engine),
            gate: JobGate::new(),
            output: Mutex::new(None),
        }
    }

    pub fn open_upload(&mut self, path: &Path) -> Result<UploadedMedia, EditError> {
        let registry = self
            .registry
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        let media = UploadedMedia::open(path, &self.video_types, registry)?;
        info!("已選擇影片 {} ({})", media.file_name, media.mime);
        Ok(media)
    }

    /// 以新檔案取代單一來源，舊的物件 URL 會被釋放
    pub fn replace_source(
        &mut self,
        slot: &mut Option<UploadedMedia>,
        path: &Path,
    ) -> Result<(), EditError> {
        let media = self.open_upload(path)?;
        if let Some(previous) = slot.replace(media) {
            self.release(&previous);
        }
        Ok(())
    }

    pub fn release(&mut self, media: &UploadedMedia) {
        self.registry
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .revoke(&media.url);
    }

    #[must_use]
    pub fn job_state(&self) -> JobState {
        self.gate.state()
    }

    #[must_use]
    pub fn output(&self) -> Option<OutputArtifact> {
        lock(&self.output).clone()
    }

    #[must_use]
    pub fn is_live(&self, url: &ObjectUrl) -> bool {
        lock(&self.registry).is_live(url)
    }

    #[must_use]
    pub fn live_urls(&self) -> usize {
        lock(&self.registry).live_count()
    }

    #[must_use]
    pub fn engine_ready(&self) -> bool {
        lock(&self.engine).is_ready()
    }

    pub fn read_url(&self, url: &ObjectUrl) -> Result<Vec<u8>, EditError> {
        Ok(lock(&self.registry).read(url)?)
    }

    /// 把最後一次的成品存到輸出資料夾
    pub fn save_output(&self, output_dir: &Path) -> Result<Option<PathBuf>, EditError> {
        let Some(artifact) = self.output() else {
            return Ok(None);
        };
        let registry = lock(&self.registry);
        Ok(Some(save_artifact(&registry, &artifact, output_dir)?))
    }

    /// 執行一次引擎工作
    ///
    /// `build` 在取得閘門後才會被呼叫，負責讀取輸入並組出參數列表。
    /// 新成品會取代舊成品，舊成品的物件 URL 隨即釋放。
    pub fn run<F>(&self, kind: ArtifactKind, build: F) -> Result<OutputArtifact, EditError>
    where
        F: FnOnce(&ObjectUrlRegistry) -> Result<EngineJob, EditError>,
    {
        let Some(guard) = self.gate.try_begin() else {
            warn!("已有工作執行中，拒絕新的 {} 請求", kind.file_name());
            return Err(EditError::Busy);
        };

        let result = self.execute(kind, build);
        guard.finish(&result);
        result
    }

    fn execute<F>(&self, kind: ArtifactKind, build: F) -> Result<OutputArtifact, EditError>
    where
        F: FnOnce(&ObjectUrlRegistry) -> Result<EngineJob, EditError>,
    {
        let job = build(&lock(&self.registry))?;

        let data = {
            let mut engine = lock(&self.engine);
            let engine = engine.ensure_loaded()?;
            run_job(engine, &job)?
        };

        let mut registry = lock(&self.registry);
        let artifact = OutputArtifact {
            size: data.len(),
            url: registry.create_for_bytes(data, kind.mime()),
            kind,
        };

        if let Some(previous) = lock(&self.output).replace(artifact.clone()) {
            registry.revoke(&previous.url);
        }

        info!("成品 {} 已就緒: {}", kind.file_name(), artifact.url);
        Ok(artifact)
    }
}
