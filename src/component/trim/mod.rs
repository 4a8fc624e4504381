//! 影片剪輯元件
//!
//! 截取 `[start, end)` 區段並重新編碼成 MP4

mod main;
mod trimmer;

pub use main::TrimPage;
pub use trimmer::{DEFAULT_TRIM_RANGE, TrimRange, Trimmer};
