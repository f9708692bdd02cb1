use std::{cell::RefCell, rc::Rc};

use super::buffer::FrameView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StormEvent {
    BoltSpawned { x: i64 },
    FlashCreated { x: i64, y: i64 },
}

/// Notified when the engine creates bolts or flashes. Sound cues hang off this.
pub trait StormObserver {
    fn notify(&mut self, event: &StormEvent);
}

/// Consumes a finished frame. Errors are reported back to the scheduler, which
/// logs them and keeps ticking.
pub trait RenderSink {
    fn present(&mut self, frame: FrameView<'_>) -> anyhow::Result<()>;
}

/// Shared, cloneable record of every event an engine emitted.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<StormEvent>>>);

impl EventLog {
    #[must_use]
    pub fn events(&self) -> Vec<StormEvent> {
        self.0.borrow().clone()
    }

    #[must_use]
    pub fn bolts_spawned(&self) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|e| matches!(e, StormEvent::BoltSpawned { .. }))
            .count()
    }
}

impl StormObserver for EventLog {
    fn notify(&mut self, event: &StormEvent) {
        self.0.borrow_mut().push(*event);
    }
}
