//! 測試用的記憶體引擎，記錄每一次呼叫

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use video_workbench::config::{Config, VideoTypeTable};
use video_workbench::engine::{EngineError, EngineStage, LazyEngine, Transcoder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Load,
    Write(String),
    Exec(Vec<String>),
    Read(String),
    Delete(String),
}

/// 讓 exec 停住直到測試放行，用來模擬長時間的工作
pub struct Hold {
    started: Sender<()>,
    release: Receiver<()>,
}

#[derive(Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
    pub files: HashMap<String, Vec<u8>>,
    pub loads: usize,
    pub fail_at: Option<EngineStage>,
    pub empty_output: bool,
    hold: Option<Hold>,
}

impl Recorder {
    pub fn exec_calls(&self) -> Vec<Vec<String>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Exec(args) => Some(args.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn written(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Write(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Delete(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Clone, Default)]
pub struct Shared(Arc<Mutex<Recorder>>);

impl Shared {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(stage: EngineStage) -> Self {
        let shared = Self::new();
        shared.lock().fail_at = Some(stage);
        shared
    }

    pub fn lock(&self) -> std::sync::MutexGuard<'_, Recorder> {
        self.0.lock().unwrap()
    }

    /// 下一次 exec 會停住；回傳 (開始通知, 放行)
    pub fn hold_next_exec(&self) -> (Receiver<()>, Sender<()>) {
        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        self.lock().hold = Some(Hold {
            started: started_tx,
            release: release_rx,
        });
        (started_rx, release_tx)
    }

    pub fn lazy(&self) -> LazyEngine<MemoryEngine> {
        let shared = self.clone();
        LazyEngine::new(move || MemoryEngine {
            shared: shared.clone(),
            loaded: false,
        })
    }
}

pub struct MemoryEngine {
    shared: Shared,
    loaded: bool,
}

impl MemoryEngine {
    fn fail(&self, stage: EngineStage) -> bool {
        self.shared.lock().fail_at == Some(stage)
    }
}

impl Transcoder for MemoryEngine {
    fn load(&mut self) -> Result<(), EngineError> {
        let mut recorder = self.shared.lock();
        recorder.calls.push(Call::Load);
        if recorder.fail_at == Some(EngineStage::Load) {
            return Err(EngineError::Load {
                reason: "load refused".to_string(),
            });
        }
        recorder.loads += 1;
        self.loaded = true;
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn write_file(&mut self, name: &str, data: &[u8]) -> Result<(), EngineError> {
        let mut recorder = self.shared.lock();
        recorder.calls.push(Call::Write(name.to_string()));
        if recorder.fail_at == Some(EngineStage::Write) {
            return Err(EngineError::Write {
                name: name.to_string(),
                reason: "disk full".to_string(),
            });
        }
        recorder.files.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn exec(&mut self, args: &[String]) -> Result<(), EngineError> {
        let hold = {
            let mut recorder = self.shared.lock();
            recorder.calls.push(Call::Exec(args.to_vec()));
            recorder.hold.take()
        };
        if let Some(hold) = hold {
            hold.started.send(()).unwrap();
            hold.release.recv().unwrap();
        }

        if self.fail(EngineStage::Exec) {
            return Err(EngineError::Exec {
                reason: "exit status 1".to_string(),
            });
        }

        // 參數列表最後一個就是輸出檔名
        let mut recorder = self.shared.lock();
        if let Some(output) = args.last() {
            let data = if recorder.empty_output {
                Vec::new()
            } else {
                format!("rendered {output}").into_bytes()
            };
            recorder.files.insert(output.clone(), data);
        }
        Ok(())
    }

    fn read_file(&mut self, name: &str) -> Result<Vec<u8>, EngineError> {
        let mut recorder = self.shared.lock();
        recorder.calls.push(Call::Read(name.to_string()));
        if recorder.fail_at == Some(EngineStage::Read) {
            return Err(EngineError::Read {
                name: name.to_string(),
                reason: "not found".to_string(),
            });
        }
        recorder
            .files
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::Read {
                name: name.to_string(),
                reason: "not found".to_string(),
            })
    }

    fn delete_file(&mut self, name: &str) -> Result<(), EngineError> {
        let mut recorder = self.shared.lock();
        recorder.calls.push(Call::Delete(name.to_string()));
        recorder.files.remove(name);
        Ok(())
    }
}

pub fn video_types() -> VideoTypeTable {
    Config::load_embedded_video_types().unwrap()
}

/// 在暫存資料夾建立假的影片檔
pub fn write_video(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

pub fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}

/// 以 shell 腳本模擬 ffmpeg，`$last` 為最後一個參數（輸出檔名）
#[cfg(unix)]
pub fn fake_ffmpeg(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("ffmpeg");
    let script = format!(
        "#!/bin/sh\nfor last; do :; done\nif [ \"$last\" = \"-version\" ]; then echo \"ffmpeg version test\"; exit 0; fi\n{body}\n"
    );
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
