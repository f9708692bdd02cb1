use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{StormError, StormResult};

/// Largest sideways jump a kink may take.
pub const MAX_KINK_LIMIT: u32 = 1024;
/// Largest flash radius; keeps a single stamp bounded.
pub const FLASH_RADIUS_LIMIT: u32 = 2048;

/// Tuning constants for a storm. Fixed once an engine is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StormConfig {
    /// Multiplier applied to every buffer cell once per logical frame.
    pub decay: f32,
    /// Chance per frame that a new bolt is spawned.
    pub bolt_chance: f64,
    /// Path steps a bolt takes per frame.
    pub bolt_speed: u32,
    pub max_active_bolts: usize,
    /// Inclusive lower bound of a segment length.
    pub seg_min_len: u32,
    /// Exclusive upper bound of a segment length.
    pub seg_max_len: u32,
    pub max_kink: u32,
    pub kink_chance: f64,
    /// Radius added to a flash each frame.
    pub flash_growth: u32,
    pub flash_max_radius: u32,
    /// Logical frames per second.
    pub fps: u32,
}

impl Default for StormConfig {
    fn default() -> Self {
        Self {
            decay: 0.82,
            bolt_chance: 0.05,
            bolt_speed: 25,
            max_active_bolts: 10,
            seg_min_len: 10,
            seg_max_len: 30,
            max_kink: 2,
            kink_chance: 0.10,
            flash_growth: 5,
            flash_max_radius: 100,
            fps: 30,
        }
    }
}

impl StormConfig {
    pub fn validate(&self) -> StormResult<()> {
        if !(0.0..=1.0).contains(&self.decay) {
            return Err(StormError::InvalidDecay(self.decay));
        }
        check_probability("bolt_chance", self.bolt_chance)?;
        check_probability("kink_chance", self.kink_chance)?;
        if self.seg_min_len == 0 {
            return Err(StormError::ZeroParameter("seg_min_len"));
        }
        if self.seg_min_len >= self.seg_max_len {
            return Err(StormError::InvalidSegmentRange {
                min: self.seg_min_len,
                max: self.seg_max_len,
            });
        }
        if self.bolt_speed == 0 {
            return Err(StormError::ZeroParameter("bolt_speed"));
        }
        check_limit("max_kink", self.max_kink, MAX_KINK_LIMIT)?;
        if self.flash_growth == 0 {
            return Err(StormError::ZeroParameter("flash_growth"));
        }
        check_limit("flash_max_radius", self.flash_max_radius, FLASH_RADIUS_LIMIT)?;
        check_limit("flash_growth", self.flash_growth, self.flash_max_radius)?;
        if self.fps == 0 {
            return Err(StormError::ZeroParameter("fps"));
        }
        Ok(())
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }
}

fn check_probability(name: &'static str, value: f64) -> StormResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(StormError::InvalidProbability { name, value })
    }
}

fn check_limit(name: &'static str, value: u32, max: u32) -> StormResult<()> {
    if value <= max {
        Ok(())
    } else {
        Err(StormError::AboveLimit { name, value, max })
    }
}
