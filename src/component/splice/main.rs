use super::splicer::Splicer;
use crate::component::prompt::{
    deliver, engine_factory, prompt_video_path, report_error, with_spinner,
};
use crate::config::Config;
use crate::engine::{FfmpegEngine, LazyEngine, Transcoder};
use anyhow::Result;
use console::style;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use rust_i18n::t;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct SplicePage {
    shutdown_signal: Arc<AtomicBool>,
}

impl SplicePage {
    pub const fn new(shutdown_signal: Arc<AtomicBool>) -> Self {
        Self { shutdown_signal }
    }

    /// 佇列可反覆增刪並多次合併，直到使用者返回
    pub fn run(&self, config: &mut Config) -> Result<()> {
        println!("{}", style(t!("splice.title")).cyan().bold());
        println!("{}", style(t!("splice.hint")).dim());

        let mut splicer = Splicer::new(
            config.video_types.clone(),
            LazyEngine::new(engine_factory(config, &self.shutdown_signal)),
            config.settings.engine.encode_options(),
        );

        while !self.shutdown_signal.load(Ordering::SeqCst) {
            let options = vec![
                t!("splice.opt_add"),
                t!("splice.opt_remove"),
                t!("splice.opt_merge"),
                t!("splice.back"),
            ];
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(t!("splice.prompt"))
                .items(&options)
                .default(if splicer.videos().len() < 2 { 0 } else { 2 })
                .interact_opt()?;

            match selection {
                Some(0) => Self::add_videos(config, &mut splicer)?,
                Some(1) => Self::remove_video(&mut splicer)?,
                Some(2) => Self::merge(config, &splicer)?,
                Some(3) | None => break,
                _ => unreachable!(),
            }
        }

        Ok(())
    }

    /// 逐一加入影片，空白輸入結束
    fn add_videos(config: &Config, splicer: &mut Splicer<FfmpegEngine>) -> Result<()> {
        // 已有影片後不再提供預設路徑
        while let Some(path) = prompt_video_path(
            config,
            &t!("splice.prompt_path"),
            splicer.videos().is_empty(),
        )? {
            match splicer.add_files(&[path]) {
                Ok(_) => Self::print_queue(splicer),
                Err(e) => report_error(&e),
            }
        }
        Ok(())
    }

    fn remove_video(splicer: &mut Splicer<FfmpegEngine>) -> Result<()> {
        if splicer.videos().is_empty() {
            println!("{}", style(t!("splice.queue_empty")).yellow());
            return Ok(());
        }

        let items: Vec<&str> = splicer
            .videos()
            .iter()
            .map(|v| v.file_name.as_str())
            .collect();
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("splice.prompt_remove"))
            .items(&items)
            .default(items.len() - 1)
            .interact_opt()?;

        if let Some(index) = selection {
            splicer.remove(index);
            Self::print_queue(splicer);
        }
        Ok(())
    }

    fn merge(config: &mut Config, splicer: &Splicer<FfmpegEngine>) -> Result<()> {
        let result = with_spinner(t!("splice.processing").to_string(), || splicer.merge());
        match result {
            Ok(artifact) => {
                println!(
                    "{} {} ({:.2} MB)",
                    style("✓").green(),
                    artifact.file_name(),
                    artifact.size as f64 / 1024.0 / 1024.0
                );
                let sources: Vec<&Path> =
                    splicer.videos().iter().map(|v| v.path.as_path()).collect();
                deliver(splicer.session(), config, &sources)?;
            }
            Err(e) => report_error(&e),
        }
        Ok(())
    }

    fn print_queue<E: Transcoder>(splicer: &Splicer<E>) {
        println!("{}", style(t!("splice.queue", count = splicer.videos().len())).green());
        for (index, video) in splicer.videos().iter().enumerate() {
            println!(
                "  {}. {} ({:.2} MB)",
                index + 1,
                video.file_name,
                video.size as f64 / 1024.0 / 1024.0
            );
        }
    }
}
