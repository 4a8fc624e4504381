//! 縮圖選取元件
//!
//! 在使用者選定的時間點擷取單張影格並輸出 PNG

mod main;
mod selector;

pub use main::ThumbnailPage;
pub use selector::ThumbnailSelector;
