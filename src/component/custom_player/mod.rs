//! 自訂播放器元件
//!
//! 播放本身交給外部播放器（ffplay），這裡只負責控制列狀態：
//! 播放/暫停、音量、速度、全螢幕，以及閒置後自動隱藏的控制列。

mod backend;
mod error;
mod fullscreen;
mod main;
mod overlay;
mod player;
mod state;

pub use backend::{FfplayBackend, PlaybackBackend};
pub use error::PlayerError;
pub use fullscreen::{
    FULLSCREEN_PREFERENCE, FullscreenCapability, FullscreenHost, FullscreenOutcome,
    find_capability,
};
pub use main::PlayerPage;
pub use overlay::{CONTROLS_HIDE_DELAY, ControlOverlay, OverlayVisibility};
pub use player::Player;
pub use state::{MAX_SPEED, MIN_SPEED, PlaybackState, SPEED_OPTIONS, SPEED_STEP};
