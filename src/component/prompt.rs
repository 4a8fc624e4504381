//! 互動頁面共用的輸入與輸出小工具

use super::{EditError, EditSession};
use crate::config::Config;
use crate::config::save::{add_recent_path, save_settings};
use crate::engine::{FfmpegEngine, Transcoder};
use crate::media::probe_media;
use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, warn};
use rust_i18n::t;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

/// 詢問影片路徑，空白輸入回傳 `None`
///
/// `offer_recent` 為真時以最近一次使用的路徑作為預設值。
pub(crate) fn prompt_video_path(
    config: &Config,
    prompt: &str,
    offer_recent: bool,
) -> Result<Option<PathBuf>> {
    let mut input = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);
    if let Some(recent) = config.settings.recent_paths.first().filter(|_| offer_recent) {
        input = input.default(recent.clone());
    }

    let path: String = input.interact_text()?;
    let path = path.trim().trim_matches('"').to_string();
    Ok((!path.is_empty()).then(|| PathBuf::from(path)))
}

/// 詢問是否在同一頁面再執行一次，ESC 視為否
pub(crate) fn ask_again(prompt: &str) -> Result<bool> {
    let again = Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact_opt()?;
    Ok(again.unwrap_or(false))
}

pub(crate) fn prompt_seconds(prompt: &str, default: f64) -> Result<f64> {
    let value = Input::<f64>::new()
        .with_prompt(prompt)
        .default(default)
        .validate_with(|v: &f64| -> Result<(), String> {
            if v.is_finite() && *v >= 0.0 {
                Ok(())
            } else {
                Err(t!("common.invalid_seconds").to_string())
            }
        })
        .interact_text()?;
    Ok(value)
}

/// 取得影片長度並顯示解析度，失敗時只提示，不中斷流程
pub(crate) fn probe_duration(config: &Config, path: &Path) -> Option<f64> {
    match probe_media(&config.settings.engine.ffprobe_path, path) {
        Ok(info) => {
            println!(
                "{}",
                style(t!(
                    "common.duration",
                    seconds = format!("{:.2}", info.duration_seconds)
                ))
                .dim()
            );
            if let Some((width, height)) = info.resolution() {
                let line = match info.frame_rate {
                    Some(fps) => t!(
                        "common.resolution_fps",
                        width = width,
                        height = height,
                        fps = format!("{fps:.2}")
                    ),
                    None => t!("common.resolution", width = width, height = height),
                };
                println!("{}", style(line).dim());
            }
            Some(info.duration_seconds)
        }
        Err(e) => {
            warn!("無法取得影片長度: {e:#}");
            println!("{}", style(t!("common.duration_unknown")).yellow());
            None
        }
    }
}

/// 引擎執行期間顯示 spinner
pub(crate) fn with_spinner<T>(message: String, work: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = work();

    spinner.finish_and_clear();
    result
}

pub(crate) fn engine_factory(
    config: &Config,
    shutdown_signal: &Arc<AtomicBool>,
) -> impl Fn() -> FfmpegEngine + Send + Sync + 'static {
    let ffmpeg_path = config.settings.engine.ffmpeg_path.clone();
    let shutdown_signal = Arc::clone(shutdown_signal);
    move || FfmpegEngine::new(&ffmpeg_path, Arc::clone(&shutdown_signal))
}

/// 儲存成品並記住這次使用的來源路徑
pub(crate) fn deliver<E: Transcoder>(
    session: &EditSession<E>,
    config: &mut Config,
    sources: &[&Path],
) -> Result<()> {
    let output_dir = config.settings.output_dir();
    match session.save_output(&output_dir) {
        Ok(Some(path)) => println!(
            "{} {}",
            style(t!("common.saved_to")).green(),
            style(path.display()).bold()
        ),
        Ok(None) => {}
        Err(e) => report_error(&e),
    }

    for source in sources {
        add_recent_path(&mut config.settings, &source.to_string_lossy());
    }
    if let Err(e) = save_settings(&config.settings) {
        warn!("無法儲存設定: {e:#}");
    }
    Ok(())
}

pub(crate) fn report_error(e: &EditError) {
    if e.is_validation() {
        warn!("輸入驗證失敗: {e}");
    } else {
        error!("處理失敗: {e}");
    }
    println!("{} {}", style(t!("common.error")).red().bold(), e);
}
