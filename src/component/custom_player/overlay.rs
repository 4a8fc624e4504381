use std::time::{Duration, Instant};

/// 控制列在最後一次移動後隱藏的延遲
pub const CONTROLS_HIDE_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayVisibility {
    Visible,
    Hidden,
}

/// 控制列的 debounce 狀態機
///
/// 任何移動都會讓控制列顯示並重新計時；計時到期且期間沒有移動時隱藏。
/// 時間由呼叫端傳入，方便測試。
#[derive(Debug, Clone)]
pub struct ControlOverlay {
    visibility: OverlayVisibility,
    hide_at: Option<Instant>,
    delay: Duration,
}

impl Default for ControlOverlay {
    fn default() -> Self {
        Self::new(CONTROLS_HIDE_DELAY)
    }
}

impl ControlOverlay {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            visibility: OverlayVisibility::Visible,
            hide_at: None,
            delay,
        }
    }

    pub fn pointer_moved(&mut self, now: Instant) {
        self.visibility = OverlayVisibility::Visible;
        self.hide_at = Some(now + self.delay);
    }

    /// 推進時間，計時到期時隱藏控制列
    pub fn tick(&mut self, now: Instant) -> OverlayVisibility {
        if self.hide_at.is_some_and(|deadline| now >= deadline) {
            self.visibility = OverlayVisibility::Hidden;
            self.hide_at = None;
        }
        self.visibility
    }

    #[must_use]
    pub const fn visibility(&self) -> OverlayVisibility {
        self.visibility
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility == OverlayVisibility::Visible
    }

    #[must_use]
    pub const fn pending_deadline(&self) -> Option<Instant> {
        self.hide_at
    }

    /// 元件卸載時取消計時
    pub fn teardown(&mut self) {
        self.hide_at = None;
    }
}
