use super::state::{validate_speed, validate_volume};
use super::{
    ControlOverlay, FullscreenCapability, FullscreenOutcome, OverlayVisibility, PlaybackBackend,
    PlaybackState, PlayerError, find_capability,
};
use crate::config::VideoTypeTable;
use crate::media::{ObjectUrlRegistry, UploadedMedia};
use log::{debug, info, warn};
use std::path::Path;
use std::time::Instant;

/// 帶自訂控制列的播放器
///
/// 狀態只由使用者操作與播放進度回呼改變；卸載時（`teardown` 或 drop）
/// 會停止播放、取消控制列計時並釋放所有物件 URL。
pub struct Player<B: PlaybackBackend> {
    backend: B,
    video_types: VideoTypeTable,
    registry: ObjectUrlRegistry,
    source: Option<UploadedMedia>,
    state: PlaybackState,
    overlay: ControlOverlay,
    fullscreen_capability: Option<FullscreenCapability>,
}

impl<B: PlaybackBackend> Player<B> {
    pub fn new(video_types: VideoTypeTable, backend: B) -> Self {
        Self {
            backend,
            video_types,
            registry: ObjectUrlRegistry::new(),
            source: None,
            state: PlaybackState::default(),
            overlay: ControlOverlay::default(),
            fullscreen_capability: None,
        }
    }

    /// 載入新影片並自動開始播放，舊影片的物件 URL 會被釋放
    pub fn open_file(&mut self, path: &Path) -> Result<&UploadedMedia, PlayerError> {
        let media = UploadedMedia::open(path, &self.video_types, &mut self.registry)?;

        if let Err(e) = self.backend.open(&media.path) {
            self.registry.revoke(&media.url);
            return Err(e);
        }

        if let Some(previous) = self.source.take() {
            self.registry.revoke(&previous.url);
        }

        info!("播放器載入 {}", media.file_name);
        self.source = Some(media);
        self.state.position = 0.0;
        self.state.duration = None;

        self.backend.set_playing(true)?;
        self.state.playing = true;
        self.source.as_ref().ok_or(PlayerError::NoSource)
    }

    #[must_use]
    pub const fn source(&self) -> Option<&UploadedMedia> {
        self.source.as_ref()
    }

    #[must_use]
    pub const fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub const fn registry(&self) -> &ObjectUrlRegistry {
        &self.registry
    }

    pub fn toggle_play(&mut self) -> Result<bool, PlayerError> {
        if self.source.is_none() {
            return Err(PlayerError::NoSource);
        }
        let playing = !self.state.playing;
        self.backend.set_playing(playing)?;
        self.state.playing = playing;
        Ok(playing)
    }

    pub fn set_volume(&mut self, volume: f64) -> Result<(), PlayerError> {
        let volume = validate_volume(volume)?;
        self.backend.set_volume(volume)?;
        self.state.volume = volume;
        Ok(())
    }

    /// 變更播放速度；音高由播放引擎處理
    pub fn set_speed(&mut self, speed: f64) -> Result<(), PlayerError> {
        let speed = validate_speed(speed)?;
        self.backend.set_rate(speed)?;
        self.state.speed = speed;
        Ok(())
    }

    /// 切換全螢幕
    ///
    /// 依偏好順序尋找宿主支援的方式；都不支援或請求被拒時狀態不變。
    pub fn toggle_fullscreen(&mut self) -> FullscreenOutcome {
        let entering = !self.state.fullscreen;
        let capability = if entering {
            find_capability(&self.backend)
        } else {
            self.fullscreen_capability
                .or_else(|| find_capability(&self.backend))
        };

        let Some(capability) = capability else {
            debug!("宿主不支援全螢幕");
            return FullscreenOutcome::Unsupported;
        };

        let result = if entering {
            self.backend.enter_fullscreen(capability)
        } else {
            self.backend.exit_fullscreen(capability)
        };

        match result {
            Ok(()) => {
                self.state.fullscreen = entering;
                self.fullscreen_capability = entering.then_some(capability);
                if entering {
                    FullscreenOutcome::Entered(capability)
                } else {
                    FullscreenOutcome::Exited(capability)
                }
            }
            Err(e) => {
                warn!("全螢幕請求被拒絕: {e}");
                FullscreenOutcome::Denied
            }
        }
    }

    /// 宿主回報實際的全螢幕狀態（例如使用者按 Esc 離開）
    pub fn on_fullscreen_changed(&mut self, fullscreen: bool) {
        if self.state.fullscreen != fullscreen {
            debug!("全螢幕狀態同步為 {fullscreen}");
        }
        self.state.fullscreen = fullscreen;
        if !fullscreen {
            self.fullscreen_capability = None;
        }
    }

    pub fn on_duration(&mut self, duration: f64) {
        self.state.duration = (duration.is_finite() && duration > 0.0).then_some(duration);
    }

    /// 從播放引擎同步目前位置
    pub fn refresh_position(&mut self) -> f64 {
        let mut position = self.backend.position().max(0.0);
        if let Some(duration) = self.state.duration {
            position = position.min(duration);
        }
        self.state.position = position;
        position
    }

    pub fn pointer_moved(&mut self, now: Instant) {
        self.overlay.pointer_moved(now);
    }

    pub fn tick(&mut self, now: Instant) -> OverlayVisibility {
        self.overlay.tick(now)
    }

    /// 使用者操作時呼叫，回傳操作前控制列是否可見
    ///
    /// 控制列已隱藏時，這次操作只負責重新顯示控制列，呼叫端不應執行對應動作。
    pub fn interact(&mut self, now: Instant) -> bool {
        let was_visible = self.tick(now) == OverlayVisibility::Visible;
        self.pointer_moved(now);
        was_visible
    }

    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    #[must_use]
    pub const fn overlay(&self) -> &ControlOverlay {
        &self.overlay
    }

    pub fn teardown(&mut self) {
        self.overlay.teardown();
        self.backend.stop();
        self.state.playing = false;
        self.source = None;
        self.registry.revoke_all();
    }
}

impl<B: PlaybackBackend> Drop for Player<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::custom_player::{CONTROLS_HIDE_DELAY, FullscreenHost};
    use crate::config::Config;
    use std::time::Duration;
    use tempfile::TempDir;

    #[derive(Default)]
    struct FakeBackend {
        opened: Vec<std::path::PathBuf>,
        playing: bool,
        volume: f64,
        rate: f64,
        position: f64,
        supported: Vec<FullscreenCapability>,
        deny_fullscreen: bool,
        fullscreen: Option<FullscreenCapability>,
        stopped: bool,
    }

    impl PlaybackBackend for FakeBackend {
        fn open(&mut self, path: &Path) -> Result<(), PlayerError> {
            self.opened.push(path.to_path_buf());
            Ok(())
        }

        fn set_playing(&mut self, playing: bool) -> Result<(), PlayerError> {
            self.playing = playing;
            Ok(())
        }

        fn set_volume(&mut self, volume: f64) -> Result<(), PlayerError> {
            self.volume = volume;
            Ok(())
        }

        fn set_rate(&mut self, rate: f64) -> Result<(), PlayerError> {
            self.rate = rate;
            Ok(())
        }

        fn position(&self) -> f64 {
            self.position
        }

        fn stop(&mut self) {
            self.stopped = true;
            self.playing = false;
        }
    }

    impl FullscreenHost for FakeBackend {
        fn supports_fullscreen(&self, capability: FullscreenCapability) -> bool {
            self.supported.contains(&capability)
        }

        fn enter_fullscreen(&mut self, capability: FullscreenCapability) -> Result<(), PlayerError> {
            if self.deny_fullscreen {
                return Err(PlayerError::Backend("denied".to_string()));
            }
            self.fullscreen = Some(capability);
            Ok(())
        }

        fn exit_fullscreen(&mut self, _capability: FullscreenCapability) -> Result<(), PlayerError> {
            self.fullscreen = None;
            Ok(())
        }
    }

    fn player(backend: FakeBackend) -> Player<FakeBackend> {
        let video_types = Config::load_embedded_video_types().unwrap();
        Player::new(video_types, backend)
    }

    fn write_video(dir: &TempDir, name: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"fake video").unwrap();
        path
    }

    #[test]
    fn test_open_file_autoplays_and_revokes_previous_url() {
        let dir = TempDir::new().unwrap();
        let mut player = player(FakeBackend::default());

        let first = player
            .open_file(&write_video(&dir, "a.mp4"))
            .unwrap()
            .url
            .clone();
        assert!(player.state().playing);
        assert!(player.backend().playing);

        player.open_file(&write_video(&dir, "b.webm")).unwrap();
        assert!(!player.registry().is_live(&first));
        assert_eq!(player.registry().live_count(), 1);
        assert_eq!(player.backend().opened.len(), 2);
    }

    #[test]
    fn test_toggle_play_requires_source() {
        let mut player = player(FakeBackend::default());
        assert!(matches!(player.toggle_play(), Err(PlayerError::NoSource)));
    }

    #[test]
    fn test_toggle_play_flips_state() {
        let dir = TempDir::new().unwrap();
        let mut player = player(FakeBackend::default());
        player.open_file(&write_video(&dir, "a.mp4")).unwrap();

        assert!(!player.toggle_play().unwrap());
        assert!(!player.backend().playing);
        assert!(player.toggle_play().unwrap());
        assert!(player.backend().playing);
    }

    #[test]
    fn test_volume_and_speed_apply_immediately() {
        let mut player = player(FakeBackend::default());
        player.set_volume(0.3).unwrap();
        player.set_speed(1.75).unwrap();

        assert!((player.state().volume - 0.3).abs() < 1e-9);
        assert!((player.backend().volume - 0.3).abs() < 1e-9);
        assert!((player.state().speed - 1.75).abs() < 1e-9);
        assert!((player.backend().rate - 1.75).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_volume_leaves_state_unchanged() {
        let mut player = player(FakeBackend::default());
        assert!(matches!(
            player.set_volume(1.5),
            Err(PlayerError::InvalidVolume(_))
        ));
        assert!(matches!(
            player.set_speed(3.0),
            Err(PlayerError::InvalidSpeed(_))
        ));
        assert!((player.state().volume - 1.0).abs() < 1e-9);
        assert!((player.state().speed - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fullscreen_uses_first_supported_capability() {
        let mut player = player(FakeBackend {
            supported: vec![FullscreenCapability::Maximized, FullscreenCapability::Borderless],
            ..FakeBackend::default()
        });

        assert_eq!(
            player.toggle_fullscreen(),
            FullscreenOutcome::Entered(FullscreenCapability::Borderless)
        );
        assert!(player.state().fullscreen);
        assert_eq!(
            player.toggle_fullscreen(),
            FullscreenOutcome::Exited(FullscreenCapability::Borderless)
        );
        assert!(!player.state().fullscreen);
    }

    #[test]
    fn test_fullscreen_unsupported_or_denied_keeps_state() {
        let mut unsupported = player(FakeBackend::default());
        assert_eq!(unsupported.toggle_fullscreen(), FullscreenOutcome::Unsupported);
        assert!(!unsupported.state().fullscreen);

        let mut denied = player(FakeBackend {
            supported: vec![FullscreenCapability::Exclusive],
            deny_fullscreen: true,
            ..FakeBackend::default()
        });
        assert_eq!(denied.toggle_fullscreen(), FullscreenOutcome::Denied);
        assert!(!denied.state().fullscreen);
    }

    #[test]
    fn test_host_fullscreen_change_is_reflected() {
        let mut player = player(FakeBackend {
            supported: vec![FullscreenCapability::Exclusive],
            ..FakeBackend::default()
        });
        player.toggle_fullscreen();
        player.on_fullscreen_changed(false);
        assert!(!player.state().fullscreen);
    }

    #[test]
    fn test_refresh_position_clamps_to_duration() {
        let mut player = player(FakeBackend {
            position: 42.0,
            ..FakeBackend::default()
        });
        player.on_duration(30.0);
        assert!((player.refresh_position() - 30.0).abs() < 1e-9);
        assert!((player.state().position - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_controls_hide_after_idle() {
        let mut player = player(FakeBackend::default());
        let start = Instant::now();
        player.pointer_moved(start);
        assert!(player.controls_visible());

        player.tick(start + Duration::from_secs(2));
        assert!(!player.controls_visible());
    }

    #[test]
    fn test_interact_while_hidden_only_reveals_controls() {
        let mut player = player(FakeBackend::default());
        let start = Instant::now();
        player.pointer_moved(start);

        assert!(player.interact(start + Duration::from_millis(500)));

        // 距上次操作超過延遲，控制列已隱藏
        let later = start + Duration::from_secs(3);
        assert!(!player.interact(later));
        assert!(player.controls_visible());
        assert_eq!(
            player.overlay().pending_deadline(),
            Some(later + CONTROLS_HIDE_DELAY)
        );

        assert!(player.interact(later + Duration::from_millis(100)));
    }

    #[test]
    fn test_teardown_releases_everything() {
        let dir = TempDir::new().unwrap();
        let mut player = player(FakeBackend::default());
        player.open_file(&write_video(&dir, "a.mp4")).unwrap();
        player.pointer_moved(Instant::now());

        player.teardown();
        assert!(player.backend().stopped);
        assert!(player.source().is_none());
        assert_eq!(player.registry().live_count(), 0);
        assert!(player.overlay().pending_deadline().is_none());
    }
}
