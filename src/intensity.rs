//! Grid of palette indices driving the fire

/// Width x height grid of intensity indices, row-major.
///
/// Values are not range-checked here. Anything past the end of the palette is
/// clamped when the grid is composited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityBuffer {
    cells: Vec<u8>,
    width: usize,
    height: usize,
}

impl IntensityBuffer {
    /// Allocate a grid with every cell at intensity 0
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![0; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row index of the source (bottom) row
    #[inline]
    pub fn source_row(&self) -> usize {
        self.height.saturating_sub(1)
    }

    /// Write `value` to every cell in row `y`. Rows outside the grid are ignored.
    pub fn set_row(&mut self, y: usize, value: u8) {
        if y >= self.height {
            return;
        }
        let start = y * self.width;
        self.cells[start..start + self.width].fill(value);
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Read a single cell (None outside the grid)
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Sum of every cell
    pub fn total_intensity(&self) -> u64 {
        self.cells.iter().map(|&c| c as u64).sum()
    }
}
