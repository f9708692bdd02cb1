use rand::{Rng, rngs::StdRng};

/// Source of uniform draws for bolt paths and spawn checks.
///
/// Only [`RandomSource::next_unit`] is required; the helpers derive from it so
/// a scripted sequence of unit draws fully determines a storm.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }

    /// Uniform integer in `[0, n)`. Returns 0 when `n` is 0.
    fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        let scaled = (self.next_unit() * f64::from(n)).floor() as u32;
        scaled.min(n - 1)
    }

    /// Uniform integer in `[-magnitude, magnitude]`. Magnitudes too wide for a
    /// single `below` draw are folded into the largest bucket count.
    fn symmetric(&mut self, magnitude: u32) -> i64 {
        let magnitude = i64::from(magnitude);
        let buckets = magnitude
            .checked_mul(2)
            .and_then(|span| span.checked_add(1))
            .and_then(|span| u32::try_from(span).ok())
            .unwrap_or(u32::MAX);
        i64::from(self.below(buckets)) - magnitude
    }
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn below(&mut self, n: u32) -> u32 {
        if n == 0 { 0 } else { self.random_range(0..n) }
    }
}

/// Replays a fixed sequence of unit draws, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Values are clamped into `[0, 1)`. An empty script always yields 0.
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        let draws = draws
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { draws, cursor: 0 }
    }

    /// A script that fails every chance check below 1 and always picks the last bucket.
    pub fn never() -> Self {
        Self::new([1.0 - f64::EPSILON])
    }

    #[must_use]
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}
