use super::buffer::IntensityBuffer;

/// Expanding disc of full intensity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub x: i64,
    pub y: i64,
    pub radius: u32,
    pub max_radius: u32,
    pub active: bool,
}

impl Flash {
    #[must_use]
    pub fn new(x: i64, y: i64, max_radius: u32) -> Self {
        Self {
            x,
            y,
            radius: 0,
            max_radius,
            active: true,
        }
    }

    /// Grows by `growth` and stamps the full disc. Past `max_radius` the flash
    /// goes inactive without stamping.
    pub fn update(&mut self, buffer: &mut IntensityBuffer, growth: u32) {
        if !self.active {
            return;
        }
        self.radius = self.radius.saturating_add(growth);
        if self.radius > self.max_radius {
            self.active = false;
            return;
        }
        stamp_disc(buffer, self.x, self.y, self.radius);
    }
}

/// Sets every in-bounds cell with `dx² + dy² <= r²` around the centre.
/// Both loops are clipped to the surface, so the cost is bounded by its area.
pub fn stamp_disc(buffer: &mut IntensityBuffer, cx: i64, cy: i64, radius: u32) {
    let r = i64::from(radius);
    let r2 = i128::from(r) * i128::from(r);
    let (dy_lo, dy_hi) = clip_offsets(cy, r, buffer.height());
    let (dx_lo, dx_hi) = clip_offsets(cx, r, buffer.width());
    for dy in dy_lo..=dy_hi {
        let dy2 = i128::from(dy) * i128::from(dy);
        for dx in dx_lo..=dx_hi {
            if i128::from(dx) * i128::from(dx) + dy2 <= r2 {
                buffer.set_full(cx + dx, cy + dy);
            }
        }
    }
}

/// Offsets in `[-r, r]` that keep `centre + offset` inside `[0, len)`.
/// Returns an empty range when the two do not overlap.
fn clip_offsets(centre: i64, r: i64, len: usize) -> (i64, i64) {
    let last = i64::try_from(len).unwrap_or(i64::MAX).saturating_sub(1);
    let lo = (-r).max(centre.saturating_neg());
    let hi = r.min(last.saturating_sub(centre));
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_stamps_radius_five_disc() {
        let mut buffer = IntensityBuffer::new(10, 10, 1.0).unwrap();
        let mut flash = Flash::new(5, 5, 100);
        flash.update(&mut buffer, 5);
        assert!(flash.active);
        assert_eq!(flash.radius, 5);
        for y in 0..10_i64 {
            for x in 0..10_i64 {
                let inside = (x - 5).pow(2) + (y - 5).pow(2) <= 25;
                let expected = if inside { 1.0 } else { 0.0 };
                assert_eq!(buffer.get(x, y), Some(expected), "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn stays_lit_for_exactly_twenty_updates() {
        let mut buffer = IntensityBuffer::new(4, 4, 1.0).unwrap();
        let mut flash = Flash::new(1, 1, 100);
        let mut stamped = 0;
        while flash.active {
            flash.update(&mut buffer, 5);
            if flash.active {
                stamped += 1;
            }
        }
        assert_eq!(stamped, 20);
        assert_eq!(flash.radius, 105);
    }

    #[test]
    fn inactive_flash_does_not_stamp() {
        let mut buffer = IntensityBuffer::new(4, 4, 1.0).unwrap();
        let mut flash = Flash::new(1, 1, 4);
        flash.update(&mut buffer, 5);
        assert!(!flash.active);
        assert_eq!(buffer.snapshot().lit_cells(), 0);
    }

    #[test]
    fn off_surface_centre_is_clipped() {
        let mut buffer = IntensityBuffer::new(6, 6, 1.0).unwrap();
        stamp_disc(&mut buffer, -2, -2, 3);
        // (0, 0) is at offset (2, 2): 8 <= 9; (1, 0) is at (3, 2): 13 > 9
        assert_eq!(buffer.get(0, 0), Some(1.0));
        assert_eq!(buffer.get(1, 0), Some(0.0));
        assert_eq!(buffer.snapshot().lit_cells(), 1);
    }

    #[test]
    fn huge_radius_covers_surface_without_overflow() {
        let mut buffer = IntensityBuffer::new(7, 5, 1.0).unwrap();
        stamp_disc(&mut buffer, 6, 0, u32::MAX);
        assert_eq!(buffer.snapshot().lit_cells(), 35);
    }

    #[test]
    fn edge_disc_only_visits_surface_columns() {
        let mut buffer = IntensityBuffer::new(4, 4, 1.0).unwrap();
        stamp_disc(&mut buffer, 3, 1, 1);
        // (4, 1) is off-surface; (2, 1), (3, 0), (3, 1), (3, 2) remain
        assert_eq!(buffer.snapshot().lit_cells(), 4);
        assert_eq!(clip_offsets(3, 1, 4), (-1, 0));
        assert_eq!(clip_offsets(-10, 3, 4), (10, 3));
    }

    #[test]
    fn radius_zero_disc_is_single_cell() {
        let mut buffer = IntensityBuffer::new(5, 5, 1.0).unwrap();
        stamp_disc(&mut buffer, 2, 2, 0);
        assert_eq!(buffer.snapshot().lit_cells(), 1);
        assert_eq!(buffer.get(2, 2), Some(1.0));
    }
}
