use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use polytension_config::Config;
use polytension_core::SeedLocation;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod frame_clock;

use app::App;

/// Animated, seed-reproducible triangle tessellations in the terminal.
#[derive(Debug, Parser)]
#[command(name = "polytension", version, about, long_about = None)]
struct Cli {
    /// Location whose `s` query parameter carries the seed
    #[arg(short, long, env = "POLYTENSION_URL")]
    url: Option<String>,

    /// Seed to start from, written into the location
    #[arg(short, long)]
    seed: Option<String>,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Configuration file path
    #[arg(short, long, env = "POLYTENSION_CONFIG")]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Hide the status line
    #[arg(long)]
    no_status: bool,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(Config::default_path);
    let (mut config, config_error) = match config_path.as_deref() {
        Some(path) => match Config::load_or_default(path) {
            Ok(config) => (config, None),
            Err(err) => (Config::default(), Some(err)),
        },
        None => (Config::default(), None),
    };
    apply_overrides(&mut config, &cli);

    if cli.write_config {
        let path = config_path.ok_or_else(|| {
            color_eyre::eyre::eyre!("no config directory found; pass --config")
        })?;
        config.save_to(&path)?;
        println!("{}", path.display());
        return Ok(());
    }

    init_tracing(&config)?;
    if let Some(err) = config_error {
        tracing::warn!(%err, "ignoring unreadable config file");
    }

    let url = cli.url.as_deref().unwrap_or(&config.base_url);
    let mut location = SeedLocation::parse(url)?;
    if let Some(seed) = cli.seed.as_deref() {
        location.set_seed(seed);
    }

    let terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;
    let result = App::new(location, &config).run(terminal);
    let mouse = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    mouse?;

    let location = result?;
    println!("{location}");
    Ok(())
}

/// Command line flags take precedence over the config file.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(fps) = cli.fps {
        config.fps = fps;
    }
    if let Some(log_file) = &cli.log_file {
        config.log_file = Some(log_file.clone());
    }
    if cli.no_status {
        config.show_status = false;
    }
}

/// Log to a file when one is configured; the terminal belongs to the UI.
fn init_tracing(config: &Config) -> color_eyre::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["polytension", "--fps", "30", "--no-status"]);
        let mut config = Config::default();
        apply_overrides(&mut config, &cli);
        assert_eq!(config.fps, 30);
        assert!(!config.show_status);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_cli_seed_and_url() {
        let cli = Cli::parse_from([
            "polytension",
            "--url",
            "https://example.com/?a=1",
            "--seed",
            "test",
        ]);
        assert_eq!(cli.url.as_deref(), Some("https://example.com/?a=1"));
        assert_eq!(cli.seed.as_deref(), Some("test"));
    }
}
