use super::PlayerError;

/// 宿主可能提供的全螢幕方式，依偏好排序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenCapability {
    Exclusive,
    Borderless,
    Maximized,
}

pub const FULLSCREEN_PREFERENCE: [FullscreenCapability; 3] = [
    FullscreenCapability::Exclusive,
    FullscreenCapability::Borderless,
    FullscreenCapability::Maximized,
];

pub trait FullscreenHost {
    fn supports_fullscreen(&self, capability: FullscreenCapability) -> bool;

    fn enter_fullscreen(&mut self, capability: FullscreenCapability) -> Result<(), PlayerError>;

    fn exit_fullscreen(&mut self, capability: FullscreenCapability) -> Result<(), PlayerError>;
}

/// 切換全螢幕的結果；不支援或被拒絕都不是錯誤，狀態維持不變
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenOutcome {
    Entered(FullscreenCapability),
    Exited(FullscreenCapability),
    Unsupported,
    Denied,
}

/// 依偏好順序找出宿主支援的第一種全螢幕方式
pub fn find_capability<H: FullscreenHost + ?Sized>(host: &H) -> Option<FullscreenCapability> {
    FULLSCREEN_PREFERENCE
        .into_iter()
        .find(|capability| host.supports_fullscreen(*capability))
}
