//! Square integer matrices and their determinant.
//!
//! `Matrix` is always square with at least one row and every entry within
//! `MAX_ENTRY`; the constructors reject anything else, so `determinant`
//! never has to validate its input.

/// Largest size the grid (and the headless evaluator) accepts.
/// Cofactor expansion is O(n!), so this bound is what keeps evaluation fast.
pub const MAX_SIZE: usize = 10;

/// Largest entry magnitude, the most a filtered cell can hold.
/// With `MAX_SIZE` this bounds |det| by 10^5 * 99^10 < 10^26, inside `i128`.
pub const MAX_ENTRY: i64 = 99;

/// Error type for matrix construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// No rows at all
    Empty,
    /// A row whose length differs from the number of rows
    NotSquare { row: usize, expected: usize, found: usize },
    /// More rows than `MAX_SIZE`
    TooLarge(usize),
    /// An entry whose magnitude exceeds `MAX_ENTRY`
    EntryOutOfRange { row: usize, col: usize, value: i64 },
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::Empty => write!(f, "matrix has no rows"),
            MatrixError::NotSquare { row, expected, found } => write!(
                f,
                "row {} has {} values, expected {} (matrix must be square)",
                row + 1,
                found,
                expected
            ),
            MatrixError::TooLarge(n) => {
                write!(f, "matrix size {} exceeds the maximum of {}", n, MAX_SIZE)
            }
            MatrixError::EntryOutOfRange { row, col, value } => write!(
                f,
                "row {}, column {}: value {} is outside -{}..{}",
                row + 1,
                col + 1,
                value,
                MAX_ENTRY,
                MAX_ENTRY
            ),
        }
    }
}

impl std::error::Error for MatrixError {}

/// Row-major n×n matrix of integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    size: usize,
    data: Vec<i64>,
}

impl Matrix {
    /// Build from nested rows. Rejects empty, non-square and out-of-range input.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, MatrixError> {
        let size = rows.len();
        if size == 0 {
            return Err(MatrixError::Empty);
        }
        let mut data = Vec::with_capacity(size * size);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(MatrixError::NotSquare { row: r, expected: size, found: row.len() });
            }
            let out_of_range = row
                .iter()
                .enumerate()
                .find(|(_, v)| v.unsigned_abs() > MAX_ENTRY.unsigned_abs());
            if let Some((c, &value)) = out_of_range {
                return Err(MatrixError::EntryOutOfRange { row: r, col: c, value });
            }
            data.extend(row);
        }
        Ok(Self { size, data })
    }

    /// Build from a flat row-major buffer of `size * size` values.
    pub(crate) fn from_flat(size: usize, data: Vec<i64>) -> Self {
        debug_assert!(size > 0 && data.len() == size * size);
        debug_assert!(data.iter().all(|v| v.unsigned_abs() <= MAX_ENTRY.unsigned_abs()));
        Self { size, data }
    }

    /// All-zero matrix. A size of 0 is bumped to 1.
    pub fn zeros(size: usize) -> Self {
        let size = size.max(1);
        Self::from_flat(size, vec![0; size * size])
    }

    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size);
        for i in 0..m.size {
            m.data[i * m.size + i] = 1;
        }
        m
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Iterate rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[i64]> {
        self.data.chunks(self.size)
    }

    /// Values as nested vectors (for display and serialization).
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b || a >= self.size || b >= self.size {
            return;
        }
        for c in 0..self.size {
            self.data.swap(a * self.size + c, b * self.size + c);
        }
    }

    pub fn transpose(&self) -> Self {
        let n = self.size;
        let mut data = Vec::with_capacity(n * n);
        for c in 0..n {
            for r in 0..n {
                data.push(self.data[r * n + c]);
            }
        }
        Self::from_flat(n, data)
    }

    /// The (n-1)×(n-1) submatrix left after deleting `row` and `col`.
    /// Returns None for a 1×1 matrix or out-of-range indices.
    pub fn minor(&self, row: usize, col: usize) -> Option<Self> {
        let n = self.size;
        if n < 2 || row >= n || col >= n {
            return None;
        }
        let mut data = Vec::with_capacity((n - 1) * (n - 1));
        for (r, values) in self.rows().enumerate() {
            if r == row {
                continue;
            }
            data.extend(
                values
                    .iter()
                    .enumerate()
                    .filter(|&(c, _)| c != col)
                    .map(|(_, &v)| v),
            );
        }
        Some(Self::from_flat(n - 1, data))
    }

    pub fn determinant(&self) -> i128 {
        determinant(self)
    }
}

/// Determinant by cofactor expansion along the first row.
///
/// The 1×1 and 2×2 cases are closed-form; larger matrices recurse on the
/// minors of row 0 with alternating signs. Accumulates in `i128`: entries
/// are capped at `MAX_ENTRY` and n at `MAX_SIZE`, so it cannot overflow.
pub fn determinant(m: &Matrix) -> i128 {
    let n = m.size;
    let at = |r: usize, c: usize| m.data[r * n + c] as i128;

    match n {
        1 => at(0, 0),
        2 => at(0, 0) * at(1, 1) - at(0, 1) * at(1, 0),
        _ => {
            let mut det = 0i128;
            for col in 0..n {
                let entry = at(0, col);
                if entry == 0 {
                    continue;
                }
                let Some(minor) = m.minor(0, col) else { continue };
                let sign = if col % 2 == 0 { 1 } else { -1 };
                det += entry * determinant(&minor) * sign;
            }
            det
        }
    }
}
