//! CSV in and out for matrices.
//!
//! Fields are coerced the same way grid cells are: anything that does not
//! parse as an integer reads as 0. Values must fit a cell (at most
//! `MAX_ENTRY` in magnitude). Shape is strict: the rows must form a square
//! of at most `MAX_SIZE`.

use detgrid_engine::cell_input::coerce_cell;
use detgrid_engine::matrix::{Matrix, MatrixError, MAX_SIZE};

/// Error type for reading a matrix from text.
#[derive(Debug)]
pub enum MatrixIoError {
    /// The CSV reader rejected the input, or a value does not fit a cell
    Parse(String),
    /// Parsed rows do not form a usable matrix
    Shape(MatrixError),
}

impl std::fmt::Display for MatrixIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixIoError::Parse(msg) => write!(f, "CSV parse error: {}", msg),
            MatrixIoError::Shape(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MatrixIoError {}

impl From<MatrixError> for MatrixIoError {
    fn from(e: MatrixError) -> Self {
        match e {
            MatrixError::EntryOutOfRange { .. } => MatrixIoError::Parse(e.to_string()),
            _ => MatrixIoError::Shape(e),
        }
    }
}

/// Parse delimited text into a square matrix.
///
/// Blank lines are skipped. Rows may not be ragged.
pub fn parse_csv(content: &str, delimiter: u8) -> Result<Matrix, MatrixIoError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rows: Vec<Vec<i64>> = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| MatrixIoError::Parse(format!("line {}: {}", row_idx + 1, e)))?;
        rows.push(record.iter().map(coerce_cell).collect());
    }

    if rows.len() > MAX_SIZE {
        return Err(MatrixError::TooLarge(rows.len()).into());
    }
    Ok(Matrix::from_rows(rows)?)
}

/// Render a matrix as delimited text, one row per line.
pub fn write_csv(matrix: &Matrix, delimiter: u8) -> Result<String, String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    for row in matrix.rows() {
        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(|e| e.to_string())?;
    }

    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}
