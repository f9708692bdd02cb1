use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
    time::{Duration, Instant},
};

use tracing::{debug, warn};

use crate::engine::{StormEvent, StormObserver};

const BELL: &[u8] = b"\x07";
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(1200);

/// Terminal-bell thunder. Automatic bolts stay silent until the user has
/// triggered a flash; a cue still "playing" (inside the cooldown) is not restarted.
#[derive(Clone)]
pub struct ThunderCue {
    inner: Rc<RefCell<CueState>>,
}

struct CueState {
    out: Box<dyn Write>,
    cooldown: Duration,
    armed: bool,
    last_rung: Option<Instant>,
    rung: u64,
}

impl ThunderCue {
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(io::stdout()), DEFAULT_COOLDOWN)
    }

    pub fn with_writer(out: Box<dyn Write>, cooldown: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CueState {
                out,
                cooldown,
                armed: false,
                last_rung: None,
                rung: 0,
            })),
        }
    }

    /// Marks that the user has interacted, which allows bolt thunder.
    pub fn arm(&self) {
        self.inner.borrow_mut().armed = true;
    }

    #[must_use]
    pub fn armed(&self) -> bool {
        self.inner.borrow().armed
    }

    #[must_use]
    pub fn rung(&self) -> u64 {
        self.inner.borrow().rung
    }

    fn ring(&self) {
        let mut state = self.inner.borrow_mut();
        let now = Instant::now();
        if let Some(last) = state.last_rung
            && now.duration_since(last) < state.cooldown
        {
            return;
        }
        match write_bell(state.out.as_mut()) {
            Ok(()) => {
                state.last_rung = Some(now);
                state.rung += 1;
                debug!(count = state.rung, "thunder");
            }
            Err(err) => warn!(error = %err, "thunder cue failed"),
        }
    }
}

impl std::fmt::Debug for ThunderCue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("ThunderCue")
            .field("armed", &state.armed)
            .field("cooldown", &state.cooldown)
            .field("rung", &state.rung)
            .finish_non_exhaustive()
    }
}

fn write_bell(out: &mut dyn Write) -> io::Result<()> {
    out.write_all(BELL)?;
    out.flush()
}

impl StormObserver for ThunderCue {
    fn notify(&mut self, event: &StormEvent) {
        match event {
            StormEvent::BoltSpawned { .. } => {
                if self.armed() {
                    self.ring();
                }
            }
            StormEvent::FlashCreated { .. } => {
                self.arm();
                self.ring();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn bolts_are_silent_until_armed() {
        let buf = SharedBuf::default();
        let mut cue = ThunderCue::with_writer(Box::new(buf.clone()), Duration::ZERO);
        cue.notify(&StormEvent::BoltSpawned { x: 3 });
        assert_eq!(cue.rung(), 0);
        assert!(buf.0.borrow().is_empty());

        cue.notify(&StormEvent::FlashCreated { x: 1, y: 1 });
        cue.notify(&StormEvent::BoltSpawned { x: 3 });
        assert!(cue.armed());
        assert_eq!(cue.rung(), 2);
        assert_eq!(buf.0.borrow().as_slice(), b"\x07\x07");
    }

    #[test]
    fn cooldown_suppresses_overlapping_cues() {
        let buf = SharedBuf::default();
        let mut cue = ThunderCue::with_writer(Box::new(buf.clone()), Duration::from_secs(60));
        cue.notify(&StormEvent::FlashCreated { x: 1, y: 1 });
        cue.notify(&StormEvent::FlashCreated { x: 2, y: 2 });
        cue.notify(&StormEvent::BoltSpawned { x: 3 });
        assert_eq!(cue.rung(), 1);
    }

    #[test]
    fn write_failure_is_swallowed() {
        let mut cue = ThunderCue::with_writer(Box::new(BrokenPipe), Duration::ZERO);
        cue.notify(&StormEvent::FlashCreated { x: 1, y: 1 });
        assert_eq!(cue.rung(), 0);
        assert!(cue.armed());
    }
}
