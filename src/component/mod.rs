//! 功能元件模組
//!
//! 每個子模組是一個獨立的頁面，彼此不共享狀態。
//! 編輯類元件（合併、縮圖、剪輯、預覽）都走同一個流程：
//! 選檔 -> 設定參數 -> 交給引擎 -> 取得成品。

pub mod custom_player;
pub mod preview_generator;
pub mod splice;
pub mod thumbnail_selector;
pub mod trim;

mod error;
mod prompt;
mod session;

pub use custom_player::{Player, PlayerPage};
pub use error::EditError;
pub use preview_generator::{PreviewGenerator, PreviewPage};
pub use session::EditSession;
pub use splice::{SplicePage, Splicer};
pub use thumbnail_selector::{ThumbnailPage, ThumbnailSelector};
pub use trim::{TrimPage, TrimRange, Trimmer};
