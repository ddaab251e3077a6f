// Startup configuration: command line over saved settings over defaults
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::player::PlayerConfig;
use crate::settings::AppSettings;

#[derive(Debug, Parser)]
#[command(name = "tutorial-library-player", version, about)]
pub struct Args {
    /// Catalog JSON file to browse (defaults to the bundled tutorials)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Source for the "Watch intro" single-video player
    #[arg(long)]
    pub video: Option<String>,

    /// Start playback as soon as a video opens
    #[arg(long)]
    pub autoplay: bool,

    /// Idle time in milliseconds before controls hide during playback
    #[arg(long, value_name = "MS")]
    pub auto_hide_ms: Option<u64>,
}

/// Layer the player config: flags win, then saved settings, then defaults
pub fn player_config(args: &Args, settings: Option<&AppSettings>) -> PlayerConfig {
    let defaults = PlayerConfig::default();

    let auto_hide_delay = args
        .auto_hide_ms
        .map(Duration::from_millis)
        .or_else(|| settings.and_then(AppSettings::auto_hide_delay))
        .unwrap_or(defaults.auto_hide_delay);

    let autoplay = args.autoplay || settings.and_then(AppSettings::autoplay).unwrap_or(defaults.autoplay);

    PlayerConfig {
        auto_hide_delay,
        autoplay,
    }
}

/// Persist preferences changed from the UI so the next launch starts with them
pub fn save_player_config(settings: &AppSettings, config: &PlayerConfig) -> rusqlite::Result<()> {
    settings.set_auto_hide_delay(config.auto_hide_delay)?;
    settings.set_autoplay(config.autoplay)
}
