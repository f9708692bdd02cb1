use crate::error::{StormError, StormResult};

/// Row-major grid of light intensities in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityBuffer {
    width: usize,
    height: usize,
    decay: f32,
    cells: Vec<f32>,
}

impl IntensityBuffer {
    pub fn new(width: usize, height: usize, decay: f32) -> StormResult<Self> {
        check_area(width, height)?;
        Ok(Self {
            width,
            height,
            decay: decay.clamp(0.0, 1.0),
            cells: vec![0.0; width * height],
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Fades every cell by the decay factor. Must run before the frame's new light is written.
    pub fn decay(&mut self) {
        let factor = self.decay;
        for cell in &mut self.cells {
            *cell *= factor;
        }
    }

    /// Lights a cell fully. Coordinates outside the grid are ignored.
    pub fn set_full(&mut self, x: i64, y: i64) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = 1.0;
        }
    }

    #[must_use]
    pub fn get(&self, x: i64, y: i64) -> Option<f32> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Reallocates to the new size with every cell dark.
    pub fn resize(&mut self, width: usize, height: usize) -> StormResult<()> {
        check_area(width, height)?;
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width * height, 0.0);
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> FrameView<'_> {
        FrameView {
            width: self.width,
            height: self.height,
            cells: &self.cells,
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

fn check_area(width: usize, height: usize) -> StormResult<()> {
    if width == 0 || height == 0 {
        Err(StormError::EmptySurface { width, height })
    } else {
        Ok(())
    }
}

/// Read-only view of a buffer handed to render sinks.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    width: usize,
    height: usize,
    cells: &'a [f32],
}

impl<'a> FrameView<'a> {
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn cells(&self) -> &'a [f32] {
        self.cells
    }

    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    /// Display brightness of a cell; 0 outside the grid.
    #[must_use]
    pub fn luma(&self, x: usize, y: usize) -> u8 {
        self.get(x, y).map_or(0, intensity_to_luma)
    }

    #[must_use]
    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|v| **v > 0.0).count()
    }
}

#[must_use]
pub fn intensity_to_luma(value: f32) -> u8 {
    (value * 255.0).floor().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_area() {
        assert_eq!(
            IntensityBuffer::new(0, 10, 0.82),
            Err(StormError::EmptySurface {
                width: 0,
                height: 10
            })
        );
        assert!(IntensityBuffer::new(10, 0, 0.82).is_err());
    }

    #[test]
    fn set_full_lights_in_bounds_cell() {
        let mut buffer = IntensityBuffer::new(4, 3, 0.82).unwrap();
        buffer.set_full(3, 2);
        assert_eq!(buffer.get(3, 2), Some(1.0));
        assert_eq!(buffer.snapshot().lit_cells(), 1);
    }

    #[test]
    fn set_full_ignores_out_of_bounds() {
        let mut buffer = IntensityBuffer::new(4, 3, 0.82).unwrap();
        let before = buffer.clone();
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3), (i64::MAX, i64::MIN)] {
            buffer.set_full(x, y);
        }
        assert_eq!(buffer, before);
    }

    #[test]
    fn decay_scales_every_cell() {
        let mut buffer = IntensityBuffer::new(3, 3, 0.82).unwrap();
        buffer.set_full(1, 1);
        buffer.decay();
        assert!((buffer.get(1, 1).unwrap() - 0.82).abs() < 1e-6);
        buffer.decay();
        assert!((buffer.get(1, 1).unwrap() - 0.82 * 0.82).abs() < 1e-6);
        assert_eq!(buffer.get(0, 0), Some(0.0));
    }

    #[test]
    fn resize_resets_cells() {
        let mut buffer = IntensityBuffer::new(3, 3, 0.82).unwrap();
        buffer.set_full(0, 0);
        buffer.resize(5, 2).unwrap();
        assert_eq!(buffer.width(), 5);
        assert_eq!(buffer.height(), 2);
        assert_eq!(buffer.snapshot().cells().len(), 10);
        assert_eq!(buffer.snapshot().lit_cells(), 0);
    }

    #[test]
    fn resize_to_zero_keeps_previous_grid() {
        let mut buffer = IntensityBuffer::new(3, 3, 0.82).unwrap();
        buffer.set_full(2, 2);
        assert!(buffer.resize(0, 0).is_err());
        assert_eq!(buffer.get(2, 2), Some(1.0));
    }

    #[test]
    fn luma_maps_full_intensity_to_white() {
        assert_eq!(intensity_to_luma(1.0), 255);
        assert_eq!(intensity_to_luma(0.0), 0);
        assert_eq!(intensity_to_luma(0.5), 127);
        assert_eq!(intensity_to_luma(2.0), 255);
    }
}
