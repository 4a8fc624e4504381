use super::{
    FfplayBackend, FullscreenOutcome, OverlayVisibility, Player, PlayerError, SPEED_OPTIONS,
};
use crate::component::prompt::{probe_duration, prompt_video_path};
use crate::config::Config;
use crate::config::save::{add_recent_path, save_settings};
use crate::engine::format_seconds;
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use log::warn;
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

pub struct PlayerPage {
    shutdown_signal: Arc<AtomicBool>,
}

impl PlayerPage {
    pub const fn new(shutdown_signal: Arc<AtomicBool>) -> Self {
        Self { shutdown_signal }
    }

    pub fn run(&self, config: &mut Config) -> Result<()> {
        println!("{}", style(t!("player.title")).cyan().bold());

        let Some(path) = prompt_video_path(config, &t!("player.prompt_path"), true)? else {
            return Ok(());
        };

        let mut player = Player::new(
            config.video_types.clone(),
            FfplayBackend::new(&config.settings.player.ffplay_path),
        );
        if let Err(e) = player.open_file(&path) {
            Self::report(&e);
            return Ok(());
        }
        if let Some(duration) = probe_duration(config, &path) {
            player.on_duration(duration);
        }

        add_recent_path(&mut config.settings, &path.to_string_lossy());
        if let Err(e) = save_settings(&config.settings) {
            warn!("無法儲存設定: {e:#}");
        }

        let result = self.control_loop(&mut player);
        player.teardown();
        result
    }

    fn control_loop(&self, player: &mut Player<FfplayBackend>) -> Result<()> {
        player.pointer_moved(Instant::now());

        loop {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                break;
            }

            // 控制列隱藏時只顯示選單，不顯示狀態列
            if player.tick(Instant::now()) == OverlayVisibility::Visible {
                player.refresh_position();
                Self::print_status(player);
            }

            let play_label = if player.state().playing {
                t!("player.opt_pause")
            } else {
                t!("player.opt_play")
            };
            let fullscreen_label = if player.state().fullscreen {
                t!("player.opt_exit_fullscreen")
            } else {
                t!("player.opt_fullscreen")
            };
            let options = vec![
                play_label,
                t!("player.opt_volume"),
                t!("player.opt_speed"),
                fullscreen_label,
                t!("player.back"),
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(t!("player.prompt"))
                .items(&options)
                .default(0)
                .interact_opt()?;

            // 返回不受控制列狀態影響
            let Some(selection) = selection.filter(|&index| index != 4) else {
                break;
            };
            if !player.interact(Instant::now()) {
                println!("{}", style(t!("player.controls_revealed")).dim());
                continue;
            }

            let outcome = match selection {
                0 => player.toggle_play().map(|_| ()),
                1 => Self::prompt_volume(player)?,
                2 => Self::prompt_speed(player)?,
                3 => {
                    Self::print_fullscreen(player.toggle_fullscreen());
                    Ok(())
                }
                _ => unreachable!(),
            };
            player.pointer_moved(Instant::now());
            if let Err(e) = outcome {
                Self::report(&e);
            }
        }

        Ok(())
    }

    fn prompt_volume(player: &mut Player<FfplayBackend>) -> Result<Result<(), PlayerError>> {
        let percent = Input::<u32>::new()
            .with_prompt(t!("player.prompt_volume"))
            .default((player.state().volume * 100.0).round() as u32)
            .interact_text()?;
        Ok(player.set_volume(f64::from(percent) / 100.0))
    }

    fn prompt_speed(player: &mut Player<FfplayBackend>) -> Result<Result<(), PlayerError>> {
        let items: Vec<String> = SPEED_OPTIONS.iter().map(|s| format!("{s}x")).collect();
        let current = SPEED_OPTIONS
            .iter()
            .position(|s| (s - player.state().speed).abs() < f64::EPSILON)
            .unwrap_or(2);

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("player.prompt_speed"))
            .items(&items)
            .default(current)
            .interact_opt()?;

        Ok(match selection {
            Some(index) => player.set_speed(SPEED_OPTIONS[index]),
            None => Ok(()),
        })
    }

    fn print_status(player: &Player<FfplayBackend>) {
        let state = player.state();
        let duration = state
            .duration
            .map_or_else(|| "--".to_string(), format_seconds);
        let status = if state.playing {
            t!("player.status_playing")
        } else {
            t!("player.status_paused")
        };

        println!(
            "\n{} {} / {}s  {} {}%  {} {}x",
            style(status).green(),
            format_seconds(state.position),
            duration,
            style(t!("player.volume")).dim(),
            (state.volume * 100.0).round(),
            style(t!("player.speed")).dim(),
            state.speed
        );
        if let Some(source) = player.source() {
            println!("{}", style(&source.file_name).dim());
        }
    }

    fn print_fullscreen(outcome: FullscreenOutcome) {
        let message = match outcome {
            FullscreenOutcome::Entered(_) => t!("player.fullscreen_entered"),
            FullscreenOutcome::Exited(_) => t!("player.fullscreen_exited"),
            FullscreenOutcome::Unsupported => t!("player.fullscreen_unsupported"),
            FullscreenOutcome::Denied => t!("player.fullscreen_denied"),
        };
        println!("{}", style(message).yellow());
    }

    fn report(e: &PlayerError) {
        warn!("播放器錯誤: {e}");
        println!("{} {}", style(t!("common.error")).red().bold(), e);
    }
}
