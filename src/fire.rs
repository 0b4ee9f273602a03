//! Classic Doom fire
//!
//! Every frame each cell's intensity is copied one row up, minus a random 0/1
//! decay, and shifted sideways by a random jitter plus the wind. The grid is
//! updated in place, so cells written earlier in a pass are visible to later
//! columns of the same pass. The output depends on that aliasing, so the
//! pass must stay single-buffered.

use crate::control::FireTuning;
use crate::display::PixelBuffer;
use crate::intensity::IntensityBuffer;
use crate::palette::Palette;
use crate::util::Rng;

/// Upper bound of the wind power setting
pub const MAX_WIND_POWER: u32 = 6;

/// Sign applied to the wind power.
///
/// A positive offset moves the destination towards lower indices, so the
/// default direction drifts the flames to the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindDirection {
    #[default]
    Leftward,
    Rightward,
}

impl WindDirection {
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            WindDirection::Leftward => 1,
            WindDirection::Rightward => -1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            WindDirection::Leftward => WindDirection::Rightward,
            WindDirection::Rightward => WindDirection::Leftward,
        }
    }
}

/// Fire simulation state: intensity grid, active palette and the RNG driving decay
pub struct DoomFire {
    intensity: IntensityBuffer,
    palette: Palette,
    rng: Rng,
}

impl DoomFire {
    pub fn new(width: usize, height: usize, palette: Palette, rng: Rng) -> Self {
        Self {
            intensity: IntensityBuffer::new(width, height),
            palette,
            rng,
        }
    }

    /// Advance the simulation by one pass over the whole grid
    pub fn update(&mut self, tuning: &FireTuning) {
        spread_fire(
            &mut self.intensity,
            &mut self.rng,
            tuning.wind_offset(),
            tuning.lateral,
        );
    }

    /// Map the intensity grid through the palette into `buffer`
    pub fn render(&self, buffer: &mut PixelBuffer) {
        buffer.apply_palette(&self.intensity, &self.palette);
    }

    /// Reseed the bottom row, which feeds the whole flame
    pub fn seed_source_row(&mut self, value: u8) {
        let row = self.intensity.source_row();
        self.intensity.set_row(row, value);
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    /// Swap in a rebuilt palette. The grid is left alone; out-of-range
    /// indices are clamped at render time.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn intensity(&self) -> &IntensityBuffer {
        &self.intensity
    }

    pub fn intensity_mut(&mut self) -> &mut IntensityBuffer {
        &mut self.intensity
    }

    pub fn rng(&self) -> &Rng {
        &self.rng
    }

    pub fn name(&self) -> &str {
        "Doom Fire"
    }
}

/// Run the propagation rule over every source cell.
///
/// Columns are the outer loop and rows `1..height` the inner one; this order
/// is observable through the in-place writes.
pub fn spread_fire(buffer: &mut IntensityBuffer, rng: &mut Rng, wind_offset: i32, lateral: u32) {
    let width = buffer.width();
    let height = buffer.height();
    let jitter_span = lateral.max(1).saturating_mul(4);
    let cells = buffer.cells_mut();

    for x in 0..width {
        for y in 1..height {
            spread_cell(cells, width, y * width + x, rng, wind_offset as isize, jitter_span);
        }
    }
}

#[inline]
fn spread_cell(
    cells: &mut [u8],
    width: usize,
    src: usize,
    rng: &mut Rng,
    wind_offset: isize,
    jitter_span: u32,
) {
    let decay = (rng.next_u32() & 1) as u8;
    let jitter = (rng.next_u32() % jitter_span) as isize;

    let mut dx = jitter + wind_offset;
    if dx == 0 {
        dx = 1;
    }

    // Floor clamp, not a wrap: strong wind pins the write to the start of the row above
    let dst = (src as isize - dx + 1).max(width as isize) as usize;
    // Only narrow grids with strong negative wind can run past the end
    let target = (dst - width).min(cells.len() - 1);

    let current = cells[src];
    cells[target] = if current > 1 {
        current - decay
    } else {
        cells[0]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(width: usize, height: usize, value: u8) -> IntensityBuffer {
        let mut buffer = IntensityBuffer::new(width, height);
        buffer.set_row(height - 1, value);
        buffer
    }

    #[test]
    fn test_single_pass_known_output() {
        let mut buffer = seeded(4, 4, 2);
        let mut rng = Rng::default();
        spread_fire(&mut buffer, &mut rng, 0, 1);
        assert_eq!(
            buffer.cells(),
            &[0, 0, 2, 0, 0, 0, 0, 0, 2, 0, 1, 1, 2, 2, 2, 2]
        );
    }

    #[test]
    fn test_pass_is_deterministic() {
        let mut buffer = seeded(48, 32, 36);
        let mut rng = Rng::new([7, 11, 13, 17]);
        for _ in 0..10 {
            spread_fire(&mut buffer, &mut rng, 2, 1);
        }

        let (mut a, mut rng_a) = (buffer.clone(), rng.clone());
        let (mut b, mut rng_b) = (buffer, rng);
        spread_fire(&mut a, &mut rng_a, 2, 1);
        spread_fire(&mut b, &mut rng_b, 2, 1);
        assert_eq!(a, b);
        assert_eq!(rng_a, rng_b);
    }

    #[test]
    fn test_source_row_survives_leftward_wind() {
        let mut buffer = seeded(64, 40, 30);
        let mut rng = Rng::default();
        for power in 0..=MAX_WIND_POWER as i32 {
            spread_fire(&mut buffer, &mut rng, power, 1);
        }
        assert!(buffer.row(39).iter().all(|&c| c == 30));
    }

    #[test]
    fn test_rightward_wind_spills_across_row_edge() {
        // Destinations are linear indices, so a push past the last column
        // lands at the start of the source's own row
        let (w, h) = (64, 4);
        let mut buffer = IntensityBuffer::new(w, h);
        buffer.cells_mut()[(h - 1) * w + 60] = 30;
        spread_fire(&mut buffer, &mut Rng::default(), -6, 1);
        assert_eq!(buffer.get(3, h - 1), Some(30));
        assert_eq!(buffer.total_intensity(), 60);
    }

    #[test]
    fn test_fire_dies_without_fuel() {
        let (w, h) = (32, 24);
        let mut buffer = seeded(w, h, 36);
        let mut rng = Rng::default();
        for _ in 0..40 {
            spread_fire(&mut buffer, &mut rng, 0, 1);
        }

        buffer.set_row(h - 1, 0);
        let mut checkpoints = vec![buffer.total_intensity()];
        for tick in 1..=200 {
            spread_fire(&mut buffer, &mut rng, 0, 1);
            if tick % 50 == 0 {
                checkpoints.push(buffer.total_intensity());
            }
        }

        assert_eq!(checkpoints, vec![22087, 8192, 2220, 1226, 736]);
        assert!(checkpoints.windows(2).all(|pair| pair[1] <= pair[0]));
        // Embers settle on the "ash" value held by the first cell
        assert!(buffer.cells().iter().all(|&c| c <= 1));
    }

    #[test]
    fn test_wind_drifts_flames() {
        let (w, h) = (64, 8);
        for (offset, expected) in [(6, 12..=15), (-6, 24..=27)] {
            let mut buffer = IntensityBuffer::new(w, h);
            buffer.cells_mut()[(h - 1) * w + 20] = 30;
            spread_fire(&mut buffer, &mut Rng::default(), offset, 1);

            let lit: Vec<usize> = buffer
                .row(h - 2)
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c > 0)
                .map(|(x, _)| x)
                .collect();
            assert!(!lit.is_empty(), "offset {} left no flame", offset);
            assert!(
                lit.iter().all(|x| expected.contains(x)),
                "offset {} lit columns {:?}",
                offset,
                lit
            );
        }
    }

    #[test]
    fn test_narrow_grid_strong_wind_stays_in_bounds() {
        // Unclamped, both writes would land at index 6 of a 4-cell grid
        let mut buffer = IntensityBuffer::new(2, 2);
        buffer.cells_mut()[2] = 9;
        spread_fire(&mut buffer, &mut Rng::default(), -(MAX_WIND_POWER as i32), 1);
        assert_eq!(buffer.cells(), &[0, 0, 9, 8]);

        let mut buffer = seeded(2, 3, 5);
        spread_fire(&mut buffer, &mut Rng::default(), -(MAX_WIND_POWER as i32), 1);
        assert_eq!(buffer.cells(), &[0, 0, 0, 0, 5, 0]);

        for lateral in [1, 3, 50] {
            for offset in [-(MAX_WIND_POWER as i32), MAX_WIND_POWER as i32] {
                let mut buffer = seeded(2, 3, 5);
                let mut rng = Rng::default();
                for _ in 0..20 {
                    spread_fire(&mut buffer, &mut rng, offset, lateral);
                }
                assert!(buffer.cells().iter().all(|&c| c <= 5));
            }
        }
    }

    #[test]
    fn test_degenerate_grids() {
        let mut rng = Rng::default();
        let mut single_row = seeded(5, 1, 9);
        spread_fire(&mut single_row, &mut rng, 0, 1);
        assert_eq!(single_row.cells(), &[9; 5]);
        // No cells were visited, so the RNG is untouched
        assert_eq!(rng, Rng::default());

        let mut column = seeded(1, 6, 9);
        spread_fire(&mut column, &mut rng, 3, 1);
        assert_eq!(column.get(0, 5), Some(9));
    }

    #[test]
    fn test_wind_direction_flip() {
        assert_eq!(WindDirection::default().sign(), 1);
        assert_eq!(WindDirection::Leftward.flipped(), WindDirection::Rightward);
        assert_eq!(WindDirection::Rightward.flipped().sign(), 1);
    }
}
