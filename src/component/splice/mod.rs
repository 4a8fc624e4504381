//! 影片合併元件
//!
//! 依上傳順序寫入引擎，以 concat demuxer 合併成單一 MP4

mod main;
mod splicer;

pub use main::SplicePage;
pub use splicer::{MIN_MERGE_INPUTS, Splicer};
