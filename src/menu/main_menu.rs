use crate::config::save::save_settings;
use crate::config::{Config, Language};
use crate::menu::handlers::{
    run_player, run_preview_generator, run_splice, run_thumbnail_selector, run_trim,
};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

/// libx264 可用的 preset，由快到慢
const PRESETS: [&str; 9] = [
    "ultrafast",
    "superfast",
    "veryfast",
    "faster",
    "fast",
    "medium",
    "slow",
    "slower",
    "veryslow",
];

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_player"),
        t!("main_menu.opt_splice"),
        t!("main_menu.opt_thumbnail"),
        t!("main_menu.opt_trim"),
        t!("main_menu.opt_preview"),
        t!("main_menu.opt_settings"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => run_player(term, shutdown_signal, config)?,
        Some(1) => run_splice(term, shutdown_signal, config)?,
        Some(2) => run_thumbnail_selector(term, shutdown_signal, config)?,
        Some(3) => run_trim(term, shutdown_signal, config)?,
        Some(4) => run_preview_generator(term, shutdown_signal, config)?,
        Some(5) => show_settings_menu(term, config)?,
        Some(6) | None => return Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
    Ok(true)
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style(t!("settings.title")).cyan().bold());
        println!("{}", style(t!("common.esc_hint")).dim());

        let options = vec![
            t!("settings.opt_language"),
            t!("settings.opt_output_dir"),
            t!("settings.opt_encode"),
            t!("settings.back"),
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("settings.prompt"))
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => show_language_menu(term, config)?,
            Some(1) => show_output_dir_menu(term, config)?,
            Some(2) => show_encode_menu(term, config)?,
            Some(3) | None => break,
            _ => unreachable!(),
        }
    }

    Ok(())
}

fn saved(value: impl std::fmt::Display) {
    println!("\n{} {}", style(t!("settings.saved")).green(), value);
    std::thread::sleep(Duration::from_secs(1));
}

/// 語言設定選單
fn show_language_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let languages = [Language::EnUs, Language::ZhTw];
    let items: Vec<String> = languages.iter().map(ToString::to_string).collect();
    let default_index = languages
        .iter()
        .position(|&l| l == config.settings.language)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    // ESC pressed - return without saving
    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_lang = languages[selection];
    if selected_lang != config.settings.language {
        config.settings.language = selected_lang;
        rust_i18n::set_locale(selected_lang.as_str());
        save_settings(&config.settings)?;
        saved(selected_lang);
    }

    Ok(())
}

/// 輸出資料夾設定
fn show_output_dir_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.output_dir.title")).cyan().bold());
    println!(
        "\n{} {}\n",
        style(t!("settings.output_dir.current")).dim(),
        config.settings.output_directory
    );

    let directory: String = Input::new()
        .with_prompt(t!("settings.output_dir.prompt"))
        .default(config.settings.output_directory.clone())
        .interact_text_on(term)?;
    let directory = directory.trim().trim_matches('"').to_string();

    if !directory.is_empty() && directory != config.settings.output_directory {
        config.settings.output_directory = directory;
        save_settings(&config.settings)?;
        saved(&config.settings.output_directory);
    }

    Ok(())
}

/// 合併與剪輯共用的 libx264 編碼設定
fn show_encode_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("settings.encode.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());
    println!(
        "\n{} preset={} crf={}\n",
        style(t!("settings.encode.current")).dim(),
        config.settings.engine.preset,
        config.settings.engine.crf
    );

    let default_index = PRESETS
        .iter()
        .position(|&p| p == config.settings.engine.preset)
        .unwrap_or(4);

    let Some(selection) = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("settings.encode.prompt_preset"))
        .items(&PRESETS)
        .default(default_index)
        .interact_on_opt(term)?
    else {
        return Ok(());
    };

    let crf: u8 = Input::new()
        .with_prompt(t!("settings.encode.prompt_crf"))
        .default(config.settings.engine.crf)
        .validate_with(|v: &u8| -> Result<(), String> {
            if *v <= 51 {
                Ok(())
            } else {
                Err(t!("settings.encode.invalid_crf").to_string())
            }
        })
        .interact_text_on(term)?;

    let preset = PRESETS[selection].to_string();
    if preset != config.settings.engine.preset || crf != config.settings.engine.crf {
        config.settings.engine.preset = preset;
        config.settings.engine.crf = crf;
        save_settings(&config.settings)?;
        saved(format!(
            "preset={} crf={}",
            config.settings.engine.preset, config.settings.engine.crf
        ));
    }

    Ok(())
}
