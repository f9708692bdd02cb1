use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tracing::{debug, warn};

use crate::{cli::Cli, engine::StormConfig};

/// Stored configuration with CLI overrides on top. The returned path is where
/// the configuration lives, if disk access is enabled.
pub fn load_storm_config(cli: &Cli, enable_disk: bool) -> (StormConfig, Option<PathBuf>) {
    let mut config = StormConfig::default();
    let path = if enable_disk { settings_path() } else { None };

    if let Some(path) = &path {
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<StormConfig>(&content) {
                Ok(saved) if saved.validate().is_ok() => config = saved,
                Ok(_) => warn!(path = %path.display(), "stored storm config is invalid, using defaults"),
                Err(err) => warn!(path = %path.display(), error = %err, "stored storm config unreadable"),
            },
            Err(err) => debug!(path = %path.display(), error = %err, "no stored storm config"),
        }
    }

    apply_cli_overrides(&mut config, cli);
    (config, path)
}

pub fn apply_cli_overrides(config: &mut StormConfig, cli: &Cli) {
    if let Some(fps) = cli.fps {
        config.fps = fps;
    }
    if let Some(decay) = cli.decay {
        config.decay = decay;
    }
    if let Some(chance) = cli.bolt_chance {
        config.bolt_chance = chance;
    }
    if let Some(speed) = cli.bolt_speed {
        config.bolt_speed = speed;
    }
    if let Some(max_bolts) = cli.max_bolts {
        config.max_active_bolts = max_bolts;
    }
    if let Some(radius) = cli.flash_radius {
        config.flash_max_radius = radius;
    }
}

pub fn save_storm_config(path: &Path, config: &StormConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating config directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(config).context("serializing storm config failed")?;
    fs::write(path, payload).context("writing storm config failed")
}

fn settings_path() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os("TERMINAL_LIGHTNING_CONFIG_DIR") {
        return Some(PathBuf::from(base).join("storm.json"));
    }

    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("terminal-lightning")
            .join("storm.json"),
    )
}
