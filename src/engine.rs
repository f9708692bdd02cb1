//! Lightning storm simulation: a decaying intensity buffer fed by falling
//! bolts and user-triggered flashes, advanced one logical frame at a time.

mod bolt;
mod boundary;
mod buffer;
mod config;
mod flash;
mod random;
mod scheduler;

use std::fmt;

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, trace};

pub use bolt::{Bolt, BoltSeed, Drift};
pub use boundary::{EventLog, RenderSink, StormEvent, StormObserver};
pub use buffer::{FrameView, IntensityBuffer, intensity_to_luma};
pub use config::{FLASH_RADIUS_LIMIT, MAX_KINK_LIMIT, StormConfig};
pub use flash::{Flash, stamp_disc};
pub use random::{RandomSource, ScriptedRandom};
pub use scheduler::{FrameOutcome, FrameScheduler};

use crate::error::StormResult;

/// Owns the buffer and every live bolt and flash.
pub struct StormEngine<R: RandomSource = StdRng> {
    config: StormConfig,
    buffer: IntensityBuffer,
    bolts: Vec<Bolt>,
    flashes: Vec<Flash>,
    rng: R,
    observer: Option<Box<dyn StormObserver>>,
    frames: u64,
}

impl StormEngine<StdRng> {
    /// Engine with a reproducible random stream.
    pub fn seeded(width: usize, height: usize, config: StormConfig, seed: u64) -> StormResult<Self> {
        Self::new(width, height, config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(width: usize, height: usize, config: StormConfig) -> StormResult<Self> {
        Self::new(width, height, config, StdRng::from_os_rng())
    }
}

impl<R: RandomSource> StormEngine<R> {
    pub fn new(width: usize, height: usize, config: StormConfig, rng: R) -> StormResult<Self> {
        config.validate()?;
        let buffer = IntensityBuffer::new(width, height, config.decay)?;
        Ok(Self {
            config,
            buffer,
            bolts: Vec::new(),
            flashes: Vec::new(),
            rng,
            observer: None,
            frames: 0,
        })
    }

    #[must_use]
    pub fn with_observer(mut self, observer: impl StormObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Advances one logical frame. The order of the phases is load-bearing:
    /// fresh light must never be decayed in the frame it was written.
    pub fn tick(&mut self) {
        self.buffer.decay();
        self.maybe_spawn_bolt();
        self.advance_bolts();
        self.advance_flashes();
        self.frames = self.frames.wrapping_add(1);
        trace!(
            frame = self.frames,
            bolts = self.bolts.len(),
            flashes = self.flashes.len(),
            "storm tick"
        );
    }

    /// Queues a flash centred on a buffer coordinate. It grows from the next tick on.
    pub fn spawn_flash(&mut self, x: i64, y: i64) {
        self.flashes
            .push(Flash::new(x, y, self.config.flash_max_radius));
        debug!(x, y, "flash created");
        self.emit(StormEvent::FlashCreated { x, y });
    }

    /// Adds a bolt outside the stochastic spawn path. Returns false at the bolt cap.
    pub fn spawn_bolt(&mut self, seed: BoltSeed) -> bool {
        if self.bolts.len() >= self.config.max_active_bolts {
            return false;
        }
        let bolt = Bolt::spawn(seed, self.buffer.width(), &self.config, &mut self.rng);
        let x = bolt.x;
        self.bolts.push(bolt);
        debug!(x, active = self.bolts.len(), "bolt spawned");
        self.emit(StormEvent::BoltSpawned { x });
        true
    }

    /// Recreates the buffer at the new size. In-flight bolts and flashes are
    /// dropped since their coordinates no longer mean anything. A zero-area
    /// size is rejected and leaves the engine untouched.
    pub fn handle_resize(&mut self, width: usize, height: usize) -> StormResult<()> {
        self.buffer.resize(width, height)?;
        let dropped = self.bolts.len() + self.flashes.len();
        self.bolts.clear();
        self.flashes.clear();
        debug!(width, height, dropped, "storm surface resized");
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> FrameView<'_> {
        self.buffer.snapshot()
    }

    #[must_use]
    pub fn buffer(&self) -> &IntensityBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    #[must_use]
    pub fn flashes(&self) -> &[Flash] {
        &self.flashes
    }

    #[must_use]
    pub fn config(&self) -> &StormConfig {
        &self.config
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.buffer.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.buffer.height()
    }

    fn maybe_spawn_bolt(&mut self) {
        if self.bolts.len() < self.config.max_active_bolts
            && self.rng.chance(self.config.bolt_chance)
        {
            self.spawn_bolt(BoltSeed::default());
        }
    }

    fn advance_bolts(&mut self) {
        let Self {
            bolts,
            buffer,
            config,
            rng,
            ..
        } = self;
        bolts.retain_mut(|bolt| !bolt.advance_frame(buffer, config, rng));
    }

    fn advance_flashes(&mut self) {
        self.flashes.retain(|flash| flash.active);
        for flash in &mut self.flashes {
            flash.update(&mut self.buffer, self.config.flash_growth);
        }
        self.flashes.retain(|flash| flash.active);
    }

    fn emit(&mut self, event: StormEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.notify(&event);
        }
    }
}

impl<R: RandomSource> fmt::Debug for StormEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StormEngine")
            .field("width", &self.buffer.width())
            .field("height", &self.buffer.height())
            .field("bolts", &self.bolts.len())
            .field("flashes", &self.flashes.len())
            .field("frames", &self.frames)
            .field("observed", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}
