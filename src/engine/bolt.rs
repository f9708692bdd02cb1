use super::{RandomSource, StormConfig, buffer::IntensityBuffer};

/// Horizontal drift applied on every step of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drift {
    Left,
    Straight,
    Right,
}

impl Drift {
    const ALL: [Drift; 3] = [Drift::Left, Drift::Straight, Drift::Right];

    pub fn random(rng: &mut impl RandomSource) -> Self {
        Self::ALL[rng.below(3) as usize]
    }

    #[must_use]
    pub fn offset(self) -> i64 {
        match self {
            Drift::Left => -1,
            Drift::Straight => 0,
            Drift::Right => 1,
        }
    }
}

/// Overrides for a new bolt. Unset fields are drawn from the random source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoltSeed {
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub seg_len: Option<u32>,
    pub drift: Option<Drift>,
}

impl BoltSeed {
    #[must_use]
    pub fn at(x: i64) -> Self {
        Self {
            x: Some(x),
            ..Self::default()
        }
    }
}

/// One falling strand of lightning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bolt {
    pub x: i64,
    pub y: i64,
    pub seg_len: u32,
    pub drift: Drift,
}

impl Bolt {
    pub fn spawn(
        seed: BoltSeed,
        width: usize,
        config: &StormConfig,
        rng: &mut impl RandomSource,
    ) -> Self {
        let x = seed
            .x
            .unwrap_or_else(|| i64::from(rng.below(width_u32(width))));
        let y = seed.y.unwrap_or(0);
        let seg_len = seed
            .seg_len
            .unwrap_or_else(|| segment_length(config, rng));
        let drift = seed.drift.unwrap_or_else(|| Drift::random(rng));
        Self {
            x,
            y,
            seg_len,
            drift,
        }
    }

    /// One path step: optional kink, drift, clamp, segment bookkeeping, then down one row.
    pub fn step(&mut self, width: usize, config: &StormConfig, rng: &mut impl RandomSource) {
        if rng.chance(config.kink_chance) {
            self.x += rng.symmetric(config.max_kink);
        }
        let max_x = width_u32(width).saturating_sub(1);
        self.x = (self.x + self.drift.offset()).clamp(0, i64::from(max_x));

        self.seg_len = self.seg_len.saturating_sub(1);
        if self.seg_len == 0 {
            self.seg_len = segment_length(config, rng);
            self.drift = Drift::random(rng);
        }
        self.y += 1;
    }

    /// Runs up to `bolt_speed` steps, lighting the cell under the bolt before each one.
    /// Returns true once the bolt has left the bottom edge.
    pub fn advance_frame(
        &mut self,
        buffer: &mut IntensityBuffer,
        config: &StormConfig,
        rng: &mut impl RandomSource,
    ) -> bool {
        for _ in 0..config.bolt_speed {
            if self.finished(buffer.height()) {
                break;
            }
            buffer.set_full(self.x, self.y);
            self.step(buffer.width(), config, rng);
        }
        self.finished(buffer.height())
    }

    #[must_use]
    pub fn finished(&self, height: usize) -> bool {
        self.y >= i64::try_from(height).unwrap_or(i64::MAX)
    }
}

fn segment_length(config: &StormConfig, rng: &mut impl RandomSource) -> u32 {
    let span = config.seg_max_len.saturating_sub(config.seg_min_len);
    config.seg_min_len + rng.below(span)
}

fn width_u32(width: usize) -> u32 {
    u32::try_from(width).unwrap_or(u32::MAX)
}
