mod input;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEventKind};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::{
    app::{events::AppEvent, thunder::ThunderCue},
    cli::Cli,
    engine::{BoltSeed, FrameOutcome, FrameScheduler, RenderSink, StormConfig, StormEngine},
    ui::{cell_to_surface, surface_size},
};

use input::{KeyAction, key_action};

#[derive(Debug)]
pub struct AppState {
    pub running: bool,
    pub engine: StormEngine,
    pub scheduler: FrameScheduler,
    pub thunder: Option<ThunderCue>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(cli: &Cli, config: StormConfig, cols: u16, rows: u16) -> Result<Self> {
        let thunder = (!cli.no_thunder).then(ThunderCue::stdout);
        Self::with_thunder(cli, config, cols, rows, thunder)
    }

    pub fn with_thunder(
        cli: &Cli,
        config: StormConfig,
        cols: u16,
        rows: u16,
        thunder: Option<ThunderCue>,
    ) -> Result<Self> {
        let (width, height) = surface_size(cols, rows);
        let engine = match cli.seed {
            Some(seed) => StormEngine::seeded(width, height, config, seed),
            None => StormEngine::from_entropy(width, height, config),
        }
        .context("building storm engine failed")?;
        let engine = match &thunder {
            Some(cue) => engine.with_observer(cue.clone()),
            None => engine,
        };
        info!(width, height, fps = config.fps, seed = ?cli.seed, "storm ready");

        Ok(Self {
            running: true,
            engine,
            scheduler: FrameScheduler::new(config.frame_interval()),
            thunder,
            started_at: Instant::now(),
        })
    }

    pub async fn handle_event<S>(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        sink: &mut S,
    ) -> Result<()>
    where
        S: RenderSink + ?Sized,
    {
        match event {
            AppEvent::HostFrame => {
                let now = self.started_at.elapsed();
                self.host_frame(now, sink);
            }
            AppEvent::Input(event) => self.handle_input(event, tx).await?,
            AppEvent::Quit => {
                self.running = false;
            }
        }

        Ok(())
    }

    /// One host callback at `now` since startup.
    pub fn host_frame<S>(&mut self, now: Duration, sink: &mut S) -> FrameOutcome
    where
        S: RenderSink + ?Sized,
    {
        self.scheduler.advance(now, &mut self.engine, sink)
    }

    async fn handle_input(&mut self, event: Event, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key_action(key) {
                Some(KeyAction::Quit) => {
                    tx.send(AppEvent::Quit).await?;
                }
                Some(KeyAction::CentreFlash) => {
                    let x = (self.engine.width() / 2) as i64;
                    let y = (self.engine.height() / 2) as i64;
                    self.engine.spawn_flash(x, y);
                }
                Some(KeyAction::ForceBolt) => {
                    self.engine.spawn_bolt(BoltSeed::default());
                }
                None => {}
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let (x, y) = cell_to_surface(mouse.column, mouse.row);
                self.engine.spawn_flash(x, y);
            }
            Event::Resize(cols, rows) => {
                let (width, height) = surface_size(cols, rows);
                if let Err(err) = self.engine.handle_resize(width, height) {
                    warn!(error = %err, "ignoring resize");
                }
            }
            _ => {}
        }

        Ok(())
    }
}
