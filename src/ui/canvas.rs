use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::{cli::PaletteArg, engine::FrameView};

const UPPER_HALF: &str = "▀";
const ASCII_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Draws an intensity grid with two buffer rows per terminal row.
#[derive(Debug, Clone, Copy)]
pub struct StormCanvas<'a> {
    view: FrameView<'a>,
    palette: PaletteArg,
}

impl<'a> StormCanvas<'a> {
    #[must_use]
    pub fn new(view: FrameView<'a>, palette: PaletteArg) -> Self {
        Self { view, palette }
    }
}

impl Widget for StormCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            let top = usize::from(row) * 2;
            for col in 0..area.width {
                let x = usize::from(col);
                let upper = self.view.luma(x, top);
                let lower = self.view.luma(x, top + 1);
                let cell = &mut buf[(area.x + col, area.y + row)];
                match self.palette {
                    PaletteArg::Mono => {
                        cell.set_symbol(UPPER_HALF)
                            .set_fg(grey(upper))
                            .set_bg(grey(lower));
                    }
                    PaletteArg::Electric => {
                        cell.set_symbol(UPPER_HALF)
                            .set_fg(electric(upper))
                            .set_bg(electric(lower));
                    }
                    PaletteArg::Ascii => {
                        cell.set_char(ascii_glyph(upper.max(lower)));
                    }
                }
            }
        }
    }
}

#[must_use]
pub fn grey(luma: u8) -> Color {
    Color::Rgb(luma, luma, luma)
}

/// Dark indigo at rest, blue-white at full intensity.
#[must_use]
pub fn electric(luma: u8) -> Color {
    let t = u16::from(luma);
    let r = (t * 3 / 4) as u8;
    let g = (8 + t * 7 / 8).min(255) as u8;
    let b = (24 + t).min(255) as u8;
    Color::Rgb(r, g, b)
}

#[must_use]
pub fn ascii_glyph(luma: u8) -> char {
    let last = ASCII_RAMP.len() - 1;
    ASCII_RAMP[usize::from(luma) * last / 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_ramp_spans_dark_to_full() {
        assert_eq!(ascii_glyph(0), ' ');
        assert_eq!(ascii_glyph(255), '@');
        assert_eq!(ascii_glyph(209), '#');
    }

    #[test]
    fn grey_is_monotonic() {
        assert_eq!(grey(0), Color::Rgb(0, 0, 0));
        assert_eq!(grey(255), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn electric_brightens_every_channel() {
        let Color::Rgb(r0, g0, b0) = electric(0) else {
            panic!("expected rgb");
        };
        let Color::Rgb(r1, g1, b1) = electric(255) else {
            panic!("expected rgb");
        };
        assert!(r1 > r0 && g1 > g0 && b1 > b0);
        assert_eq!(b1, 255);
    }
}
