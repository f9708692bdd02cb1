#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::engine::FLASH_RADIUS_LIMIT;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum PaletteArg {
    /// Grey ramp, white at full intensity
    #[default]
    Mono,
    /// Blue-white storm tint
    Electric,
    /// Character ramp for terminals without colour
    Ascii,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "terminal-lightning",
    version,
    about = "Animated lightning storm for the terminal"
)]
pub struct Cli {
    /// Logical frames per second (1..120)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=120))]
    pub fps: Option<u32>,

    /// Host refresh rate the scheduler is polled at (10..240)
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u16).range(10..=240))]
    pub host_hz: u16,

    /// Fade multiplier applied every frame
    #[arg(long)]
    pub decay: Option<f32>,

    /// Chance per frame of a new bolt
    #[arg(long)]
    pub bolt_chance: Option<f64>,

    /// Rows a bolt falls per frame
    #[arg(long)]
    pub bolt_speed: Option<u32>,

    /// Maximum bolts in flight
    #[arg(long)]
    pub max_bolts: Option<usize>,

    /// Maximum flash radius in pixels (1..2048)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(FLASH_RADIUS_LIMIT)))]
    pub flash_radius: Option<u32>,

    /// Seed for a reproducible storm
    #[arg(long)]
    pub seed: Option<u64>,

    /// Colour palette
    #[arg(long, value_enum, default_value_t = PaletteArg::Mono)]
    pub palette: PaletteArg,

    /// Disable the thunder bell
    #[arg(long)]
    pub no_thunder: bool,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Ignore the stored storm configuration
    #[arg(long)]
    pub no_config: bool,

    /// Persist the effective configuration before starting
    #[arg(long, conflicts_with = "no_config")]
    pub save_config: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(decay) = self.decay
            && !(0.0..=1.0).contains(&decay)
        {
            anyhow::bail!("--decay must be between 0 and 1");
        }
        if let Some(chance) = self.bolt_chance
            && !(0.0..=1.0).contains(&chance)
        {
            anyhow::bail!("--bolt-chance must be between 0 and 1");
        }
        if self.bolt_speed == Some(0) {
            anyhow::bail!("--bolt-speed must be at least 1");
        }
        Ok(())
    }
}
