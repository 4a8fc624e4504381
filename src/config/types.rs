use crate::engine::EncodeOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

pub const MAX_RECENT_PATHS: usize = 10;

/// 上傳控制項接受的影片類型，key 為含點的小寫副檔名
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoTypeTable {
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: BTreeMap<String, String>,
}

impl VideoTypeTable {
    #[must_use]
    pub fn mime_for(&self, path: &Path) -> Option<&str> {
        let ext = path.extension().and_then(|ext| ext.to_str())?;
        self.video_file
            .get(&format!(".{}", ext.to_lowercase()))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnUs => write!(f, "English"),
            Self::ZhTw => write!(f, "繁體中文"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    /// libx264 preset，用於合併與剪輯
    pub preset: String,
    pub crf: u8,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            preset: "fast".to_string(),
            crf: 23,
        }
    }
}

impl EngineSettings {
    #[must_use]
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            preset: self.preset.clone(),
            crf: self.crf,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub ffplay_path: String,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            ffplay_path: "ffplay".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    /// 下載（輸出成品）存放的資料夾
    pub output_directory: String,
    pub engine: EngineSettings,
    pub player: PlayerSettings,
    pub recent_paths: Vec<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            output_directory: ".".to_string(),
            engine: EngineSettings::default(),
            player: PlayerSettings::default(),
            recent_paths: Vec::new(),
        }
    }
}

impl UserSettings {
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_directory)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub video_types: VideoTypeTable,
    pub settings: UserSettings,
}
