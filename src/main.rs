use anyhow::Result;
use console::{Term, style};
use log::{info, warn};
use rust_i18n::t;
use std::sync::atomic::Ordering;
use video_workbench::config::Config;
use video_workbench::init;
use video_workbench::menu::show_main_menu;
use video_workbench::signal::setup_shutdown_signal;

rust_i18n::i18n!("locales", fallback = "en-US");

fn main() -> Result<()> {
    init::init();
    let term = Term::stdout();
    let shutdown_signal = setup_shutdown_signal();

    // Load config and set locale
    let mut config = Config::new()?;
    rust_i18n::set_locale(config.settings.language.as_str());

    loop {
        // 工作執行中的 Ctrl-C 由引擎消化；閒置時收到則結束程式
        if shutdown_signal.load(Ordering::SeqCst) {
            info!("收到中斷信號，程式結束");
            break;
        }

        match show_main_menu(&term, &shutdown_signal, &mut config) {
            Ok(true) => {}
            Ok(false) => {
                term.clear_screen()?;
                println!("\n{}", style(t!("main_menu.goodbye")).green().bold());
                info!("程式正常結束");
                break;
            }
            Err(e) => {
                warn!("程式錯誤: {e}");
                eprintln!("{} {}", style(t!("main_menu.error_prefix")).red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}
