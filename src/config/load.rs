use crate::config::types::{Config, UserSettings, VideoTypeTable};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::Path;

/// 編譯時嵌入的影片類型表（副檔名 -> MIME）
const VIDEO_TYPES_JSON: &str = include_str!("../data/video_types.json");

pub const SETTINGS_FILE: &str = "settings.json";

impl Config {
    pub fn new() -> Result<Self> {
        let video_types = Self::load_embedded_video_types()?;
        let settings = match Self::load_settings(Path::new(SETTINGS_FILE)) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("設定檔讀取失敗，改用預設值: {e:#}");
                UserSettings::default()
            }
        };

        Ok(Self {
            video_types,
            settings,
        })
    }

    pub fn load_settings(path: &Path) -> Result<UserSettings> {
        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }

    pub fn load_embedded_video_types() -> Result<VideoTypeTable> {
        serde_json::from_str(VIDEO_TYPES_JSON).context("無法解析嵌入的影片類型設定")
    }
}
