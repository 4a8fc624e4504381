//! 預覽片段產生元件
//!
//! 從指定起點截取固定 3 秒並轉成 WebM

mod generator;
mod main;

pub use generator::PreviewGenerator;
pub use main::PreviewPage;
