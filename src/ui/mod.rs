pub mod canvas;

use anyhow::anyhow;
use ratatui::{Frame, Terminal, backend::Backend};

use crate::{
    cli::PaletteArg,
    engine::{FrameView, RenderSink},
};

pub use canvas::StormCanvas;

pub fn render(frame: &mut Frame, view: FrameView<'_>, palette: PaletteArg) {
    let area = frame.area();
    frame.render_widget(StormCanvas::new(view, palette), area);
}

/// Buffer-space size for a terminal of `cols` x `rows` cells.
#[must_use]
pub fn surface_size(cols: u16, rows: u16) -> (usize, usize) {
    (usize::from(cols.max(1)), usize::from(rows.max(1)) * 2)
}

/// Buffer-space point under a terminal cell.
#[must_use]
pub fn cell_to_surface(col: u16, row: u16) -> (i64, i64) {
    (i64::from(col), i64::from(row) * 2)
}

/// Render sink drawing each presented frame to a ratatui terminal.
pub struct TerminalSink<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    palette: PaletteArg,
}

impl<'a, B: Backend> TerminalSink<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, palette: PaletteArg) -> Self {
        Self { terminal, palette }
    }
}

impl<B: Backend> RenderSink for TerminalSink<'_, B> {
    fn present(&mut self, view: FrameView<'_>) -> anyhow::Result<()> {
        let palette = self.palette;
        self.terminal
            .draw(|frame| render(frame, view, palette))
            .map(|_| ())
            .map_err(|err| anyhow!("terminal draw failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_doubles_rows() {
        assert_eq!(surface_size(80, 24), (80, 48));
        assert_eq!(surface_size(0, 0), (1, 2));
    }

    #[test]
    fn clicks_map_to_upper_pixel() {
        assert_eq!(cell_to_surface(10, 3), (10, 6));
    }
}
