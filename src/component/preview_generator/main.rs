use super::generator::PreviewGenerator;
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

pub struct PreviewPage {
    shutdown_signal: Arc<AtomicBool>,
}

impl PreviewPage {
    pub const fn new(shutdown_signal: Arc<AtomicBool>) -> Self {
        Self { shutdown_signal }
    }

    pub fn run(&self, config: &mut Config) -> Result<()> {
        println!("{}", style(t!("preview.title")).cyan().bold());

        let Some(path) = prompt_video_path(config, &t!("preview.prompt_path"), true)? else {
            return Ok(());
        };

        let mut generator = PreviewGenerator::new(
            config.video_types.clone(),
            LazyEngine::new(engine_factory(config, &self.shutdown_signal)),
        );
        if let Err(e) = generator.select_file(&path) {
            report_error(&e);
            return Ok(());
        }
        if let Some(duration) = probe_duration(config, &path) {
            generator.set_duration(duration);
        }

        while !self.shutdown_signal.load(Ordering::SeqCst) {
            loop {
                let start = prompt_seconds(&t!("preview.prompt_start"), generator.start())?;
                match generator.select_start(start) {
                    Ok(()) => break,
                    Err(e) => report_error(&e),
                }
            }

            let message =
                t!("preview.processing", start = format_seconds(generator.start())).to_string();
            match with_spinner(message, || generator.generate()) {
                Ok(artifact) => {
                    println!(
                        "{} {} ({} KB)",
                        style("✓").green(),
                        artifact.file_name(),
                        artifact.size / 1024
                    );
                    deliver(generator.session(), config, &[path.as_path()])?;
                }
                Err(e) => report_error(&e),
            }

            if !ask_again(&t!("preview.again"))? {
                break;
            }
        }

        Ok(())
    }
}
