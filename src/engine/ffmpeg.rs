use super::{EngineError, Transcoder};
use log::{debug, info, warn};
use std::fs;
use std::io::{ErrorKind, Read};
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 每個指令前固定加上的參數
const BASE_ARGS: [&str; 5] = ["-hide_banner", "-nostdin", "-loglevel", "error", "-y"];

/// 以本機 ffmpeg 執行檔實作的引擎
///
/// 暫存空間是一個私有的暫存資料夾，引擎被 drop 時一併刪除。
/// 指令以暫存資料夾為工作目錄執行，所以參數中的檔名都是相對名稱。
pub struct FfmpegEngine {
    ffmpeg_path: PathBuf,
    scratch: Option<TempDir>,
    shutdown_signal: Arc<AtomicBool>,
}

impl FfmpegEngine {
    pub fn new(ffmpeg_path: impl Into<PathBuf>, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            scratch: None,
            shutdown_signal,
        }
    }

    #[must_use]
    pub fn scratch_dir(&self) -> Option<&Path> {
        self.scratch.as_ref().map(TempDir::path)
    }

    /// 解析暫存檔名，只接受單層的相對檔名
    fn resolve(&self, name: &str) -> Result<PathBuf, String> {
        let scratch = self
            .scratch_dir()
            .ok_or_else(|| "引擎尚未載入".to_string())?;

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(scratch.join(name)),
            _ => Err(format!("不合法的暫存檔名: {name:?}")),
        }
    }
}

impl Transcoder for FfmpegEngine {
    fn load(&mut self) -> Result<(), EngineError> {
        if self.scratch.is_some() {
            return Ok(());
        }

        let output = Command::new(&self.ffmpeg_path)
            .args(["-hide_banner", "-version"])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| EngineError::Load {
                reason: format!("無法執行 {}: {e}", self.ffmpeg_path.display()),
            })?;

        if !output.status.success() {
            return Err(EngineError::Load {
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let version = String::from_utf8_lossy(&output.stdout);
        if let Some(line) = version.lines().next() {
            info!("轉檔引擎已載入: {line}");
        }

        let scratch = tempfile::Builder::new()
            .prefix("video_workbench_")
            .tempdir()
            .map_err(|e| EngineError::Load {
                reason: format!("無法建立暫存資料夾: {e}"),
            })?;
        debug!("引擎暫存資料夾: {}", scratch.path().display());
        self.scratch = Some(scratch);

        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.scratch.is_some()
    }

    fn write_file(&mut self, name: &str, data: &[u8]) -> Result<(), EngineError> {
        let path = self.resolve(name).map_err(|reason| EngineError::Write {
            name: name.to_string(),
            reason,
        })?;

        fs::write(&path, data).map_err(|e| EngineError::Write {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        debug!("寫入引擎檔案 {name} ({} bytes)", data.len());
        Ok(())
    }

    fn exec(&mut self, args: &[String]) -> Result<(), EngineError> {
        let scratch = self
            .scratch_dir()
            .ok_or_else(|| EngineError::Exec {
                reason: "引擎尚未載入".to_string(),
            })?
            .to_path_buf();

        let mut command = Command::new(&self.ffmpeg_path);
        command
            .args(BASE_ARGS)
            .args(args)
            .current_dir(&scratch)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        debug!("執行 ffmpeg {}", args.join(" "));

        let mut child = command.spawn().map_err(|e| EngineError::Exec {
            reason: format!("無法啟動 {}: {e}", self.ffmpeg_path.display()),
        })?;

        // 另開執行緒讀取 stderr，避免管線塞滿卡住 ffmpeg
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut buffer = String::new();
                let _ = stderr.read_to_string(&mut buffer);
                buffer
            })
        });

        let status = loop {
            // 中斷只取消目前這個指令，旗標在此清除，之後的工作照常執行
            if self.shutdown_signal.swap(false, Ordering::SeqCst) {
                warn!("收到中斷信號，終止 ffmpeg [{}]", child.id());
                let _ = child.kill();
                let _ = child.wait();
                return Err(EngineError::Interrupted);
            }

            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(EngineError::Exec {
                        reason: format!("無法檢查 ffmpeg 狀態: {e}"),
                    });
                }
            }
        };

        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        if !status.success() {
            let reason = if stderr.trim().is_empty() {
                format!("ffmpeg 結束狀態 {status}")
            } else {
                stderr.trim().to_string()
            };
            return Err(EngineError::Exec { reason });
        }

        Ok(())
    }

    fn read_file(&mut self, name: &str) -> Result<Vec<u8>, EngineError> {
        let path = self.resolve(name).map_err(|reason| EngineError::Read {
            name: name.to_string(),
            reason,
        })?;

        fs::read(&path).map_err(|e| EngineError::Read {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }

    fn delete_file(&mut self, name: &str) -> Result<(), EngineError> {
        let path = self.resolve(name).map_err(|reason| EngineError::Delete {
            name: name.to_string(),
            reason,
        })?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EngineError::Delete {
                name: name.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
