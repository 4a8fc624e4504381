use crate::config::load::SETTINGS_FILE;
use crate::config::types::{MAX_RECENT_PATHS, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn save_settings(settings: &UserSettings) -> Result<()> {
    save_settings_to(settings, Path::new(SETTINGS_FILE))
}

pub fn save_settings_to(settings: &UserSettings, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    Ok(())
}

/// 更新最近使用的路徑
/// 將新路徑加入最前面，去重並限制數量
pub fn add_recent_path(settings: &mut UserSettings, path: &str) {
    settings.recent_paths.retain(|p| p != path);
    settings.recent_paths.insert(0, path.to_string());
    settings.recent_paths.truncate(MAX_RECENT_PATHS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_add_recent_path_moves_to_front() {
        let mut settings = UserSettings::default();
        add_recent_path(&mut settings, "/a.mp4");
        add_recent_path(&mut settings, "/b.mp4");
        add_recent_path(&mut settings, "/a.mp4");
        assert_eq!(settings.recent_paths, vec!["/a.mp4", "/b.mp4"]);
    }

    #[test]
    fn test_add_recent_path_is_capped() {
        let mut settings = UserSettings::default();
        for i in 0..(MAX_RECENT_PATHS + 5) {
            add_recent_path(&mut settings, &format!("/clip_{i}.mp4"));
        }
        assert_eq!(settings.recent_paths.len(), MAX_RECENT_PATHS);
        assert_eq!(
            settings.recent_paths[0],
            format!("/clip_{}.mp4", MAX_RECENT_PATHS + 4)
        );
    }

    #[test]
    fn test_settings_survive_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = UserSettings::default();
        settings.output_directory = "/tmp/exports".to_string();
        settings.engine.crf = 28;
        save_settings_to(&settings, &path).unwrap();

        let loaded = Config::load_settings(&path).unwrap();
        assert_eq!(loaded.output_directory, "/tmp/exports");
        assert_eq!(loaded.engine.crf, 28);
    }
}
