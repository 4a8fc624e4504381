use crate::component::{PlayerPage, PreviewPage, SplicePage, ThumbnailPage, TrimPage};
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use log::error;
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

fn report(term: &Term, result: Result<()>) -> Result<()> {
    if let Err(e) = result {
        error!("頁面執行失敗: {e:#}");
        eprintln!("{} {}", style(t!("common.error")).red().bold(), e);
    }
    pause(term)
}

pub fn run_player(term: &Term, shutdown_signal: &Arc<AtomicBool>, config: &mut Config) -> Result<()> {
    term.clear_screen()?;
    let page = PlayerPage::new(Arc::clone(shutdown_signal));
    report(term, page.run(config))
}

pub fn run_splice(term: &Term, shutdown_signal: &Arc<AtomicBool>, config: &mut Config) -> Result<()> {
    term.clear_screen()?;
    let page = SplicePage::new(Arc::clone(shutdown_signal));
    report(term, page.run(config))
}

pub fn run_thumbnail_selector(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    term.clear_screen()?;
    let page = ThumbnailPage::new(Arc::clone(shutdown_signal));
    report(term, page.run(config))
}

pub fn run_trim(term: &Term, shutdown_signal: &Arc<AtomicBool>, config: &mut Config) -> Result<()> {
    term.clear_screen()?;
    let page = TrimPage::new(Arc::clone(shutdown_signal));
    report(term, page.run(config))
}

pub fn run_preview_generator(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    term.clear_screen()?;
    let page = PreviewPage::new(Arc::clone(shutdown_signal));
    report(term, page.run(config))
}
