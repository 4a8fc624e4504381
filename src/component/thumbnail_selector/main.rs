use super::selector::ThumbnailSelector;
use crate::component::custom_player::{FfplayBackend, PlaybackBackend};
use crate::component::prompt::{
    ask_again, deliver, engine_factory, probe_duration, prompt_seconds, prompt_video_path,
    report_error, with_spinner,
};
use crate::config::Config;
use crate::engine::{FfmpegEngine, LazyEngine, format_seconds};
use anyhow::Result;
use console::{Term, style};
use dialoguer::Confirm;
use log::warn;
use rust_i18n::t;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct ThumbnailPage {
    shutdown_signal: Arc<AtomicBool>,
}

impl ThumbnailPage {
    pub const fn new(shutdown_signal: Arc<AtomicBool>) -> Self {
        Self { shutdown_signal }
    }

    /// 同一支影片可反覆擷取，引擎只初始化一次
    pub fn run(&self, config: &mut Config) -> Result<()> {
        println!("{}", style(t!("thumbnail.title")).cyan().bold());

        let Some(path) = prompt_video_path(config, &t!("thumbnail.prompt_path"), true)? else {
            return Ok(());
        };

        let mut selector = ThumbnailSelector::new(
            config.video_types.clone(),
            LazyEngine::new(engine_factory(config, &self.shutdown_signal)),
        );
        if let Err(e) = selector.select_file(&path) {
            report_error(&e);
            return Ok(());
        }
        if let Some(duration) = probe_duration(config, &path) {
            selector.set_duration(duration);
        }

        let mut suggested = 0.0;
        while !self.shutdown_signal.load(Ordering::SeqCst) {
            if Confirm::new()
                .with_prompt(t!("thumbnail.prompt_scrub"))
                .default(false)
                .interact()?
            {
                suggested = Self::scrub(config, &path)?;
            }

            Self::capture_once(config, &mut selector, &path, suggested)?;
            suggested = selector.selected_time();

            if !ask_again(&t!("thumbnail.again"))? {
                break;
            }
        }

        Ok(())
    }

    fn capture_once(
        config: &mut Config,
        selector: &mut ThumbnailSelector<FfmpegEngine>,
        path: &Path,
        suggested: f64,
    ) -> Result<()> {
        loop {
            let seconds = prompt_seconds(&t!("thumbnail.prompt_time"), suggested)?;
            match selector.select_time(seconds) {
                Ok(()) => break,
                Err(e) => report_error(&e),
            }
        }

        let message = t!(
            "thumbnail.processing",
            time = format_seconds(selector.selected_time())
        )
        .to_string();
        match with_spinner(message, || selector.capture()) {
            Ok(artifact) => {
                println!(
                    "{} {} ({} KB)",
                    style("✓").green(),
                    artifact.file_name(),
                    artifact.size / 1024
                );
                deliver(selector.session(), config, &[path])?;
            }
            Err(e) => report_error(&e),
        }
        Ok(())
    }

    /// 以播放器瀏覽影片，按 Enter 時的播放位置作為建議時間點
    fn scrub(config: &Config, path: &Path) -> Result<f64> {
        let mut backend = FfplayBackend::new(&config.settings.player.ffplay_path);
        let opened = backend
            .open(path)
            .and_then(|()| backend.set_playing(true));
        if let Err(e) = opened {
            warn!("無法啟動預覽播放: {e}");
            println!("{} {}", style(t!("common.error")).red().bold(), e);
            return Ok(0.0);
        }

        println!("{}", style(t!("thumbnail.scrub_hint")).dim());
        Term::stdout().read_line()?;
        let position = backend.position();
        backend.stop();

        println!(
            "{}",
            style(t!("thumbnail.scrub_position", time = format_seconds(position))).green()
        );
        Ok(position)
    }
}
