use super::trimmer::{DEFAULT_TRIM_RANGE, Trimmer};
use crate::component::prompt::{
    ask_again, deliver, engine_factory, probe_duration, prompt_seconds, prompt_video_path,
    report_error, with_spinner,
};
use crate::config::Config;
use crate::engine::{LazyEngine, format_seconds};
use anyhow::Result;
use console::style;
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct TrimPage {
    shutdown_signal: Arc<AtomicBool>,
}

impl TrimPage {
    pub const fn new(shutdown_signal: Arc<AtomicBool>) -> Self {
        Self { shutdown_signal }
    }

    /// 同一支影片可反覆修剪不同區段，預設值沿用上一次的範圍
    pub fn run(&self, config: &mut Config) -> Result<()> {
        println!("{}", style(t!("trim.title")).cyan().bold());

        let Some(path) = prompt_video_path(config, &t!("trim.prompt_path"), true)? else {
            return Ok(());
        };

        let mut trimmer = Trimmer::new(
            config.video_types.clone(),
            LazyEngine::new(engine_factory(config, &self.shutdown_signal)),
            config.settings.engine.encode_options(),
        );
        if let Err(e) = trimmer.select_file(&path) {
            report_error(&e);
            return Ok(());
        }
        if let Some(duration) = probe_duration(config, &path) {
            trimmer.set_duration(duration);
        }

        let (mut default_start, mut default_end) = DEFAULT_TRIM_RANGE;
        if let Some(duration) = trimmer.duration() {
            default_end = default_end.min(duration);
        }

        while !self.shutdown_signal.load(Ordering::SeqCst) {
            let range = loop {
                let start = prompt_seconds(&t!("trim.prompt_start"), default_start)?;
                let end = prompt_seconds(&t!("trim.prompt_end"), default_end)?;
                match trimmer.select_range(start, end) {
                    Ok(range) => break range,
                    Err(e) => report_error(&e),
                }
            };
            default_start = range.start();
            default_end = range.end();

            let message = t!(
                "trim.processing",
                start = format_seconds(range.start()),
                end = format_seconds(range.end())
            )
            .to_string();
            match with_spinner(message, || trimmer.trim()) {
                Ok(artifact) => {
                    println!(
                        "{} {} ({:.2} MB)",
                        style("✓").green(),
                        artifact.file_name(),
                        artifact.size as f64 / 1024.0 / 1024.0
                    );
                    deliver(trimmer.session(), config, &[path.as_path()])?;
                }
                Err(e) => report_error(&e),
            }

            if !ask_again(&t!("trim.again"))? {
                break;
            }
        }

        Ok(())
    }
}
