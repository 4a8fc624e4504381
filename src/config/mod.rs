pub mod load;
pub mod save;
pub mod types;

pub use types::{
    Config, EngineSettings, Language, MAX_RECENT_PATHS, PlayerSettings, UserSettings,
    VideoTypeTable,
};
