#![allow(dead_code)]

use ratatui::{Terminal, backend::TestBackend};
use terminal_lightning::{
    cli::PaletteArg,
    engine::{BoltSeed, Drift, RandomSource, ScriptedRandom, StormConfig, StormEngine},
    ui,
};

/// No automatic bolts and no fading, so a frame shows exactly what was written.
pub fn still_config() -> StormConfig {
    StormConfig {
        decay: 1.0,
        bolt_chance: 0.0,
        ..StormConfig::default()
    }
}

pub fn scripted_engine(
    width: usize,
    height: usize,
    config: StormConfig,
) -> StormEngine<ScriptedRandom> {
    StormEngine::new(width, height, config, ScriptedRandom::never()).expect("engine")
}

pub fn straight_bolt(x: i64) -> BoltSeed {
    BoltSeed {
        x: Some(x),
        y: Some(0),
        seg_len: Some(1_000),
        drift: Some(Drift::Straight),
    }
}

pub fn render_to_string<R: RandomSource>(
    engine: &StormEngine<R>,
    width: u16,
    height: u16,
    palette: PaletteArg,
) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| ui::render(frame, engine.snapshot(), palette))
        .expect("draw");

    let buffer = terminal.backend().buffer().clone();
    let mut lines = Vec::new();
    for y in 0..height {
        let mut line = String::new();
        for x in 0..width {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}
