pub mod app;
pub mod cli;
pub mod engine;
pub mod error;
pub mod logging;
pub mod ui;

use std::io::{self, Stdout};

use anyhow::Result;
use app::events::{AppEvent, spawn_input_task, start_host_ticker};
use app::settings::{load_storm_config, save_storm_config};
use app::state::AppState;
use cli::Cli;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use engine::StormConfig;
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::info;
use ui::TerminalSink;

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    let _log_guard = logging::init(cli.log_file.as_deref())?;

    let (config, config_path) = load_storm_config(&cli, !cli.no_config);
    config.validate()?;
    if cli.save_config
        && let Some(path) = &config_path
    {
        save_storm_config(path, &config)?;
        info!(path = %path.display(), "storm config saved");
    }

    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, &cli, config).await;
    restore_terminal(&mut terminal)?;
    info!("storm stopped");
    result
}

async fn run_inner(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    cli: &Cli,
    config: StormConfig,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let size = terminal.size()?;
    let mut app = AppState::new(cli, config, size.width, size.height)?;

    start_host_ticker(tx.clone(), cli.host_hz);

    while app.running {
        let mut sink = TerminalSink::new(terminal, cli.palette);
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), &tx, &mut sink).await?;
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx, &mut sink).await?;
                }
            }
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
        existing(panic);
    }));
}
