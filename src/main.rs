use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;

mod backend;
mod config;
mod draw;
mod export;
mod input;
mod notification;
mod transparency;
mod ui;
mod util;

use config::Config;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("DRAWOVER_GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "drawover")]
#[command(version = VERSION, about = "Transparent drawing overlay for Wayland compositors")]
struct Cli {
    /// Initial window opacity (0.01 - 1.0), overrides the config file
    #[arg(long, value_name = "OPACITY", value_parser = parse_opacity)]
    opacity: Option<f64>,

    /// Directory for quick saves and PDFs, overrides the config file
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

fn parse_opacity(value: &str) -> Result<f64, String> {
    let opacity: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.01..=1.0).contains(&opacity) {
        Ok(opacity)
    } else {
        Err(format!("{opacity} is outside the 0.01 - 1.0 range"))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if std::env::var("WAYLAND_DISPLAY").is_err() {
        log::error!("WAYLAND_DISPLAY not set - this application requires Wayland.");
        log::error!("Please run on a Wayland compositor with wlr-layer-shell (Hyprland, Sway, etc.).");
        return Err(anyhow!("Wayland environment required"));
    }

    let mut config = Config::load().unwrap_or_else(|err| {
        log::warn!("Failed to load config: {:#}. Using defaults.", err);
        Config::default()
    });

    if let Some(opacity) = cli.opacity {
        config.transparency.initial_opacity = opacity;
    }
    if let Some(dir) = cli.output_dir {
        config.export.directory = dir.to_string_lossy().into_owned();
    }
    config.validate_and_clamp();

    config
        .keybindings
        .build_action_map()
        .map_err(|err| anyhow!("Invalid keybindings in config: {err}"))?;

    log::info!("Starting drawing overlay...");
    log::info!("  - Draw: drag with the left mouse button");
    log::info!("  - Colors: palette keys, S/D turn the eraser on/off, C clears");
    log::info!("  - Opacity: [ and ] (or the slider), 0 resets, A toggles");
    log::info!("  - Help: F1, minimize: Esc, exit: Alt+F4");

    backend::run_wayland(config)?;

    log::info!("Drawing overlay closed.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_argument_is_range_checked() {
        assert_eq!(parse_opacity("0.5"), Ok(0.5));
        assert_eq!(parse_opacity("1"), Ok(1.0));
        assert!(parse_opacity("0").is_err());
        assert!(parse_opacity("1.5").is_err());
        assert!(parse_opacity("half").is_err());
    }

    #[test]
    fn cli_accepts_overrides() {
        let cli = Cli::try_parse_from(["drawover", "--opacity", "0.3", "--output-dir", "/tmp/x"])
            .unwrap();
        assert_eq!(cli.opacity, Some(0.3));
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/x")));
    }
}
