//! Grid controller: owns the grid state, the random source and the last result.
//!
//! UI layers translate their events into `Action`s and feed them to
//! `GridController::apply`. Nothing here knows about terminals or keys.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grid::GridState;
use crate::matrix::Matrix;

/// Everything a user can do to the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Size field committed (ignored unless 1..=10)
    SetSize(usize),
    DecreaseSize,
    IncreaseSize,
    /// Full new text for a cell, before filtering
    Input { row: usize, col: usize, text: String },
    Reset,
    Randomize,
    /// Compute the determinant of the current grid
    Evaluate,
}

/// Result line shown after an evaluation.
pub fn format_result(det: i128) -> String {
    format!("Determinant: {}", det)
}

pub struct GridController<R: Rng = StdRng> {
    grid: GridState,
    rng: R,
    last_result: Option<i128>,
}

impl GridController<StdRng> {
    /// Controller with an entropy-seeded RNG, or a fixed seed for reproducible randomize.
    pub fn new(size: usize, seed: Option<u64>) -> Option<Self> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(size, rng)
    }
}

impl<R: Rng> GridController<R> {
    pub fn with_rng(size: usize, rng: R) -> Option<Self> {
        Some(Self { grid: GridState::new(size)?, rng, last_result: None })
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Determinant from the most recent `Evaluate`, if any.
    /// Kept across resizes and edits until the next evaluation.
    pub fn last_result(&self) -> Option<i128> {
        self.last_result
    }

    pub fn result_text(&self) -> Option<String> {
        self.last_result.map(format_result)
    }

    /// Apply an action. Returns false when it had no effect
    /// (out-of-range size, clamped step, cell outside the grid).
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::SetSize(n) => self.grid.set_size(n),
            Action::DecreaseSize => self.grid.decrease_size(),
            Action::IncreaseSize => self.grid.increase_size(),
            Action::Input { row, col, text } => self.grid.input(row, col, &text).is_some(),
            Action::Reset => {
                log::info!("reset {}x{} grid", self.grid.size(), self.grid.size());
                self.grid.reset();
                true
            }
            Action::Randomize => {
                log::info!("randomize {}x{} grid", self.grid.size(), self.grid.size());
                self.grid.randomize(&mut self.rng);
                true
            }
            Action::Evaluate => {
                let det = self.evaluate();
                log::debug!("evaluated determinant {}", det);
                self.last_result = Some(det);
                true
            }
        }
    }

    /// Current grid as a matrix.
    pub fn matrix(&self) -> Matrix {
        self.grid.matrix()
    }

    fn evaluate(&self) -> i128 {
        self.grid.matrix().determinant()
    }
}
