//! Grid state: the current size and the text of every cell.
//!
//! ## Size bounds
//!
//! - **Size field** (`set_size`): accepts 1..=10.
//! - **Step controls** (`decrease_size` / `increase_size`): only move within 2..=10,
//!   so a 1×1 grid can be grown but never reached by stepping down.
//!
//! Every size change discards all cell text. Nothing is carried over.

use rand::Rng;

use crate::cell_input::{coerce_cell, filter_cell_input};
use crate::matrix::{Matrix, MAX_SIZE};

/// Smallest size the size field accepts.
pub const MIN_SIZE: usize = 1;
/// Smallest size the step controls will move to.
pub const MIN_STEP_SIZE: usize = 2;
/// Randomize fills cells from `-RANDOM_MAGNITUDE..=RANDOM_MAGNITUDE`.
pub const RANDOM_MAGNITUDE: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    size: usize,
    /// Row-major cell text, `size * size` entries
    cells: Vec<String>,
}

impl GridState {
    /// Create an empty grid. Returns None if `size` is outside 1..=10.
    pub fn new(size: usize) -> Option<Self> {
        if !Self::accepts_size(size) {
            return None;
        }
        Some(Self { size, cells: vec![String::new(); size * size] })
    }

    /// Whether the size field would accept `size`.
    pub fn accepts_size(size: usize) -> bool {
        (MIN_SIZE..=MAX_SIZE).contains(&size)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Rebuild the grid at `size` with empty cells.
    /// Out-of-range sizes are ignored; returns whether the grid was rebuilt.
    pub fn set_size(&mut self, size: usize) -> bool {
        if !Self::accepts_size(size) {
            log::debug!("ignoring grid size {}", size);
            return false;
        }
        log::debug!("creating a {}x{} grid", size, size);
        self.size = size;
        self.cells = vec![String::new(); size * size];
        true
    }

    pub fn decrease_size(&mut self) -> bool {
        if self.size > MIN_STEP_SIZE {
            self.set_size(self.size - 1)
        } else {
            false
        }
    }

    pub fn increase_size(&mut self) -> bool {
        if self.size < MAX_SIZE {
            self.set_size(self.size + 1)
        } else {
            false
        }
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.size && col < self.size {
            Some(row * self.size + col)
        } else {
            None
        }
    }

    /// Text of a cell ("" for out-of-range coordinates).
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.index(row, col)
            .map(|i| self.cells[i].as_str())
            .unwrap_or("")
    }

    /// Replace a cell's text, passing it through the input filter.
    /// Returns the stored text, or None for out-of-range coordinates.
    pub fn input(&mut self, row: usize, col: usize, raw: &str) -> Option<&str> {
        let i = self.index(row, col)?;
        self.cells[i] = filter_cell_input(raw);
        Some(self.cells[i].as_str())
    }

    /// Numeric value of a cell as the evaluator will see it.
    pub fn value(&self, row: usize, col: usize) -> i64 {
        coerce_cell(self.cell(row, col))
    }

    /// Clear every cell.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Fill every cell with an independent uniform value in [-10, 10].
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            let v = rng.gen_range(-RANDOM_MAGNITUDE..=RANDOM_MAGNITUDE);
            *cell = v.to_string();
        }
    }

    /// Read the grid as a matrix, coercing each cell.
    pub fn matrix(&self) -> Matrix {
        let data = self.cells.iter().map(|c| coerce_cell(c)).collect();
        Matrix::from_flat(self.size, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_rejects_out_of_range() {
        assert!(GridState::new(0).is_none());
        assert!(GridState::new(11).is_none());
        assert_eq!(GridState::new(1).unwrap().size(), 1);
        assert_eq!(GridState::new(10).unwrap().size(), 10);
    }

    #[test]
    fn resize_discards_values() {
        let mut g = GridState::new(2).unwrap();
        g.input(0, 0, "5");
        g.input(1, 1, "-3");
        assert!(g.set_size(3));
        assert_eq!(g.size(), 3);
        assert_eq!(g.matrix(), Matrix::zeros(3));

        // Same size still rebuilds
        g.input(0, 0, "7");
        assert!(g.set_size(3));
        assert_eq!(g.cell(0, 0), "");
    }

    #[test]
    fn set_size_out_of_range_is_noop() {
        let mut g = GridState::new(3).unwrap();
        g.input(0, 0, "4");
        assert!(!g.set_size(0));
        assert!(!g.set_size(11));
        assert_eq!(g.size(), 3);
        assert_eq!(g.cell(0, 0), "4");
    }

    #[test]
    fn step_controls_clamp_to_two_through_ten() {
        let mut g = GridState::new(2).unwrap();
        assert!(!g.decrease_size());
        assert_eq!(g.size(), 2);

        let mut g = GridState::new(10).unwrap();
        assert!(!g.increase_size());
        assert_eq!(g.size(), 10);
        assert!(g.decrease_size());
        assert_eq!(g.size(), 9);

        // Size 1 is only reachable through the field; stepping up leaves it
        let mut g = GridState::new(1).unwrap();
        assert!(!g.decrease_size());
        assert!(g.increase_size());
        assert_eq!(g.size(), 2);
    }

    #[test]
    fn input_is_filtered() {
        let mut g = GridState::new(2).unwrap();
        assert_eq!(g.input(0, 1, "a-1-2-3"), Some("-12"));
        assert_eq!(g.value(0, 1), -12);
        assert_eq!(g.input(5, 5, "1"), None);
    }

    #[test]
    fn reset_clears_to_zero() {
        let mut g = GridState::new(3).unwrap();
        g.randomize(&mut StdRng::seed_from_u64(7));
        g.reset();
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(g.cell(r, c), "");
            }
        }
        assert_eq!(g.matrix(), Matrix::zeros(3));
    }

    #[test]
    fn randomize_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut g = GridState::new(10).unwrap();
        for _ in 0..20 {
            g.randomize(&mut rng);
            for row in g.matrix().rows() {
                for &v in row {
                    assert!((-10..=10).contains(&v), "out of range: {}", v);
                }
            }
        }
    }

    #[test]
    fn two_by_two_example() {
        let mut g = GridState::new(2).unwrap();
        g.input(0, 0, "1");
        g.input(0, 1, "2");
        g.input(1, 0, "3");
        g.input(1, 1, "4");
        assert_eq!(g.matrix().determinant(), -2);
    }
}
