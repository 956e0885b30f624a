//! Grid state: the living/dead matrix and the parallel age matrix.

use rand::Rng;

use crate::error::GridError;

/// A cell coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// X coordinate (column).
    pub x: usize,
    /// Y coordinate (row).
    pub y: usize,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// A fixed-size toroidal grid of cells with per-cell ages.
///
/// Cells are stored column-major (`index = x * height + y`), matching the
/// `[width][height]` shape of structured snapshots. The age of a dead cell is
/// always zero; the age of a live cell counts the generations it has been
/// alive for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    ages: Vec<u32>,
}

impl GridState {
    /// Create a grid with every cell dead.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] if width or height is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        let size = width * height;
        Ok(Self {
            width,
            height,
            cells: vec![false; size],
            ages: vec![0; size],
        })
    }

    /// Create a grid where each cell is independently alive with probability 0.5.
    ///
    /// Ages start at zero, the same as a freshly loaded snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] if width or height is zero.
    pub fn random<R: Rng>(
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height)?;
        for cell in &mut grid.cells {
            *cell = rng.random_bool(0.5);
        }
        Ok(grid)
    }

    /// Build a grid from column-major cell states. Ages start at zero.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] if width or height is zero, or
    /// [`GridError::CellCount`] if `cells` does not hold `width * height` entries.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        if cells.len() != width * height {
            return Err(GridError::CellCount {
                expected: width * height,
                actual: cells.len(),
            });
        }
        let size = cells.len();
        Ok(Self {
            width,
            height,
            cells,
            ages: vec![0; size],
        })
    }

    /// Width of the grid in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height of the grid in cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Check if a coordinate is within the grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    #[inline]
    const fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    fn coord_to_index(&self, coord: Coord) -> Option<usize> {
        self.in_bounds(coord).then(|| self.index(coord.x, coord.y))
    }

    /// Whether the cell at `coord` is alive, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<bool> {
        self.coord_to_index(coord).map(|idx| self.cells[idx])
    }

    /// Whether the cell at `coord` is alive. Out-of-bounds reads are dead.
    #[must_use]
    #[inline]
    pub fn is_alive(&self, coord: Coord) -> bool {
        self.get(coord).unwrap_or(false)
    }

    /// Age of the cell at `coord`, or `None` if out of bounds.
    #[must_use]
    pub fn age(&self, coord: Coord) -> Option<u32> {
        self.coord_to_index(coord).map(|idx| self.ages[idx])
    }

    /// Set the alive state of a cell without touching its age.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn set(&mut self, coord: Coord, alive: bool) -> bool {
        if let Some(idx) = self.coord_to_index(coord) {
            self.cells[idx] = alive;
            true
        } else {
            false
        }
    }

    /// Set the age of a cell. Returns `false` if out of bounds.
    pub(crate) fn set_age(&mut self, coord: Coord, age: u32) -> bool {
        if let Some(idx) = self.coord_to_index(coord) {
            self.ages[idx] = age;
            true
        } else {
            false
        }
    }

    /// Whether the cell at a possibly negative or overflowing position is
    /// alive, wrapping both axes around the torus.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn is_alive_wrapped(&self, x: isize, y: isize) -> bool {
        let x = x.rem_euclid(self.width as isize) as usize;
        let y = y.rem_euclid(self.height as isize) as usize;
        self.cells[self.index(x, y)]
    }

    /// Sum of the eight toroidally wrapped neighbors of `(x, y)`, in `[0, 8]`.
    ///
    /// `x` and `y` must be in bounds.
    #[must_use]
    #[inline]
    pub fn neighbor_sum(&self, x: usize, y: usize) -> u8 {
        let (w, h) = (self.width, self.height);
        let cols = [(x + w - 1) % w, x, (x + 1) % w];
        let rows = [(y + h - 1) % h, y, (y + 1) % h];

        let mut sum = 0u8;
        for (i, &nx) in cols.iter().enumerate() {
            for (j, &ny) in rows.iter().enumerate() {
                if (i, j) != (1, 1) {
                    sum += u8::from(self.cells[self.index(nx, ny)]);
                }
            }
        }
        sum
    }

    /// Count of alive cells.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Highest age among live cells (0 for an empty grid).
    #[must_use]
    pub fn max_age(&self) -> u32 {
        self.ages.iter().copied().max().unwrap_or(0)
    }

    /// Mean age of live cells, or 0.0 when nothing is alive.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_age(&self) -> f64 {
        let population = self.population();
        if population == 0 {
            return 0.0;
        }
        let total: u64 = self.ages.iter().map(|&a| u64::from(a)).sum();
        total as f64 / population as f64
    }

    /// Kill every cell and reset all ages.
    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.ages.fill(0);
    }

    /// Raw column-major cell states.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Raw column-major ages.
    #[must_use]
    #[inline]
    pub fn ages(&self) -> &[u32] {
        &self.ages
    }

    /// Mutable access to both buffers, for whole-grid writes by the engine.
    pub(crate) fn buffers_mut(&mut self) -> (&mut [bool], &mut [u32]) {
        (&mut self.cells, &mut self.ages)
    }

    /// Whether `other` has the same cell states, ignoring ages.
    #[must_use]
    pub fn same_cells(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }

    /// Iterate over all coordinates with their alive state and age.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, bool, u32)> + '_ {
        let height = self.height;
        self.cells
            .iter()
            .zip(&self.ages)
            .enumerate()
            .map(move |(idx, (&alive, &age))| (Coord::new(idx / height, idx % height), alive, age))
    }

    /// Iterate over the coordinates of live cells.
    pub fn live_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.iter()
            .filter_map(|(coord, alive, _)| alive.then_some(coord))
    }
}
