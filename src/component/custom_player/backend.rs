use super::{FullscreenCapability, FullscreenHost, PlayerError};
use crate::engine::format_seconds;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::Instant;

/// 播放引擎介面，音量與速度的變更需立即生效
pub trait PlaybackBackend: FullscreenHost {
    fn open(&mut self, path: &Path) -> Result<(), PlayerError>;

    fn set_playing(&mut self, playing: bool) -> Result<(), PlayerError>;

    fn set_volume(&mut self, volume: f64) -> Result<(), PlayerError>;

    fn set_rate(&mut self, rate: f64) -> Result<(), PlayerError>;

    /// 目前播放位置（秒）
    fn position(&self) -> f64;

    fn stop(&mut self);
}

/// 以 ffplay 子程序播放
///
/// ffplay 無法在執行中調整參數，所以每次變更都從目前位置重新啟動程序。
/// 播放位置由啟動時間與速度推算。
pub struct FfplayBackend {
    ffplay_path: PathBuf,
    source: Option<PathBuf>,
    volume: f64,
    rate: f64,
    fullscreen: bool,
    playing: bool,
    base_position: f64,
    started_at: Option<Instant>,
    child: Option<Child>,
}

impl FfplayBackend {
    pub fn new(ffplay_path: impl Into<PathBuf>) -> Self {
        Self {
            ffplay_path: ffplay_path.into(),
            source: None,
            volume: 1.0,
            rate: 1.0,
            fullscreen: false,
            playing: false,
            base_position: 0.0,
            started_at: None,
            child: None,
        }
    }

    fn build_command(&self, source: &Path) -> Command {
        let mut cmd = Command::new(&self.ffplay_path);
        cmd.args([
            "-hide_banner",
            "-loglevel",
            "error",
            "-autoexit",
            "-ss",
            format_seconds(self.base_position).as_str(),
            "-volume",
            ((self.volume * 100.0).round() as u32).to_string().as_str(),
            "-vf",
            format!("setpts=PTS/{}", self.rate).as_str(),
            "-af",
            format!("atempo={}", self.rate).as_str(),
        ]);
        if self.fullscreen {
            cmd.arg("-fs");
        }
        cmd.arg(source)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }

    fn kill(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    /// 記下目前位置並以新參數重新啟動
    fn restart(&mut self) -> Result<(), PlayerError> {
        self.base_position = self.position();
        self.started_at = None;
        self.kill();

        if !self.playing {
            return Ok(());
        }
        let Some(source) = self.source.clone() else {
            return Ok(());
        };

        let child = self.build_command(&source).spawn().map_err(|e| {
            PlayerError::Backend(format!("無法啟動 {}: {e}", self.ffplay_path.display()))
        })?;
        debug!(
            "ffplay [{}] 從 {}s 開始播放",
            child.id(),
            format_seconds(self.base_position)
        );
        self.child = Some(child);
        self.started_at = Some(Instant::now());
        Ok(())
    }
}

impl PlaybackBackend for FfplayBackend {
    fn open(&mut self, path: &Path) -> Result<(), PlayerError> {
        self.kill();
        self.source = Some(path.to_path_buf());
        self.base_position = 0.0;
        self.started_at = None;
        self.restart()
    }

    fn set_playing(&mut self, playing: bool) -> Result<(), PlayerError> {
        if self.playing == playing {
            return Ok(());
        }
        self.base_position = self.position();
        self.started_at = None;
        self.playing = playing;
        self.restart()
    }

    fn set_volume(&mut self, volume: f64) -> Result<(), PlayerError> {
        self.volume = volume;
        self.restart()
    }

    fn set_rate(&mut self, rate: f64) -> Result<(), PlayerError> {
        self.rate = rate;
        self.restart()
    }

    fn position(&self) -> f64 {
        self.started_at.map_or(self.base_position, |started| {
            self.base_position + started.elapsed().as_secs_f64() * self.rate
        })
    }

    fn stop(&mut self) {
        self.base_position = self.position();
        self.started_at = None;
        self.playing = false;
        self.kill();
    }
}

impl FullscreenHost for FfplayBackend {
    fn supports_fullscreen(&self, capability: FullscreenCapability) -> bool {
        capability == FullscreenCapability::Exclusive
    }

    fn enter_fullscreen(&mut self, capability: FullscreenCapability) -> Result<(), PlayerError> {
        if !self.supports_fullscreen(capability) {
            return Err(PlayerError::Backend(format!("不支援 {capability:?}")));
        }
        self.fullscreen = true;
        self.restart()
    }

    fn exit_fullscreen(&mut self, _capability: FullscreenCapability) -> Result<(), PlayerError> {
        self.fullscreen = false;
        self.restart()
    }
}

impl Drop for FfplayBackend {
    fn drop(&mut self) {
        if self.child.is_some() {
            warn!("播放器未正常關閉，終止 ffplay");
        }
        self.kill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_reflects_state() {
        let mut backend = FfplayBackend::new("ffplay");
        backend.volume = 0.8;
        backend.rate = 1.5;
        backend.fullscreen = true;
        backend.base_position = 12.5;

        let cmd = backend.build_command(Path::new("/videos/clip.mp4"));
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();

        assert!(args.windows(2).any(|w| w == ["-ss", "12.5"]));
        assert!(args.windows(2).any(|w| w == ["-volume", "80"]));
        assert!(args.windows(2).any(|w| w == ["-af", "atempo=1.5"]));
        assert!(args.contains(&"-fs".to_string()));
        assert_eq!(args.last().unwrap(), "/videos/clip.mp4");
    }

    #[test]
    fn test_paused_backend_keeps_position() {
        let mut backend = FfplayBackend::new("/nonexistent/ffplay");
        backend.base_position = 4.0;
        // 暫停狀態下調整音量不會啟動程序
        backend.set_volume(0.5).unwrap();
        assert!(backend.child.is_none());
        assert!((backend.position() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_binary_reports_backend_error() {
        let mut backend = FfplayBackend::new("/nonexistent/ffplay");
        backend.open(Path::new("/videos/clip.mp4")).unwrap();
        assert!(matches!(
            backend.set_playing(true),
            Err(PlayerError::Backend(_))
        ));
    }
}
