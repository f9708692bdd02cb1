use std::time::Duration;

use tracing::warn;

use super::{RandomSource, RenderSink, StormEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not enough time has passed since the last logical frame.
    Deferred,
    /// One tick ran. `presented` is false when the sink failed.
    Ticked { presented: bool },
}

impl FrameOutcome {
    #[must_use]
    pub fn ticked(self) -> bool {
        matches!(self, FrameOutcome::Ticked { .. })
    }
}

/// Throttles engine ticks to a fixed logical rate, whatever rate the host
/// calls in at.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    interval: Duration,
    last_frame: Duration,
    ticks: u64,
    sink_failures: u64,
}

impl FrameScheduler {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_frame: Duration::ZERO,
            ticks: 0,
            sink_failures: 0,
        }
    }

    #[must_use]
    pub fn with_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / f64::from(fps.max(1))))
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures
    }

    /// Claims a logical frame at `now` if one is due. The last-frame mark moves
    /// to `now` itself, so lateness is not caught up.
    pub fn claim_frame(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_frame) < self.interval {
            return false;
        }
        self.last_frame = now;
        self.ticks += 1;
        true
    }

    /// Runs at most one tick and hands the result to `sink`. Sink errors are
    /// logged and never stop the storm.
    pub fn advance<R, S>(
        &mut self,
        now: Duration,
        engine: &mut StormEngine<R>,
        sink: &mut S,
    ) -> FrameOutcome
    where
        R: RandomSource,
        S: RenderSink + ?Sized,
    {
        if !self.claim_frame(now) {
            return FrameOutcome::Deferred;
        }
        engine.tick();
        match sink.present(engine.snapshot()) {
            Ok(()) => FrameOutcome::Ticked { presented: true },
            Err(err) => {
                self.sink_failures += 1;
                warn!(error = %err, failures = self.sink_failures, "render sink failed");
                FrameOutcome::Ticked { presented: false }
            }
        }
    }
}
