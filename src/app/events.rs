use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::time::{MissedTickBehavior, interval};

#[derive(Debug)]
pub enum AppEvent {
    /// Host refresh callback; the scheduler decides whether a logical frame runs.
    HostFrame,
    Input(Event),
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

pub fn start_host_ticker(tx: tokio::sync::mpsc::Sender<AppEvent>, hz: u16) {
    let hz = hz.max(10);
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs_f64(1.0 / f64::from(hz)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::HostFrame).await.is_err() {
                break;
            }
        }
    });
}
