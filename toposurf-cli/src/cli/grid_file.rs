//! Plain-text scalar grid reader.
//!
//! One grid row per line. Values are separated by commas, whitespace or both.
//! Blank lines and lines starting with `#` are skipped.

use std::io::{self, BufRead};

use thiserror::Error;
use toposurf_core::{GridError, ScalarGrid};

/// Errors raised while reading a text grid.
#[derive(Debug, Error)]
pub enum GridFileError {
    /// Reading from the underlying source failed.
    #[error("failed to read grid input: {source}")]
    Read {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A token could not be parsed as a number.
    #[error("line {line}: `{token}` is not a number")]
    InvalidValue {
        /// One-based line number in the input.
        line: usize,
        /// Offending token.
        token: String,
    },
    /// The parsed rows do not form a valid grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl GridFileError {
    /// Stable machine-readable code for logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "GRID_FILE_READ",
            Self::InvalidValue { .. } => "GRID_FILE_INVALID_VALUE",
            Self::Grid(error) => error.code().as_str(),
        }
    }
}

/// Reads a grid from `reader`.
///
/// # Errors
/// Returns [`GridFileError`] when reading fails, a token is not numeric, or
/// the rows are empty, ragged or hold non-finite values.
///
/// # Examples
/// ```
/// use toposurf_cli::cli::read_grid;
///
/// let grid = read_grid("# heights\n1, 2, 3\n\n4 5 6\n".as_bytes())?;
/// assert_eq!((grid.rows(), grid.cols()), (2, 3));
/// # Ok::<(), toposurf_cli::cli::GridFileError>(())
/// ```
pub fn read_grid(reader: impl BufRead) -> Result<ScalarGrid, GridFileError> {
    let mut rows = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| GridFileError::Read { source })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        rows.push(parse_row(trimmed, index + 1)?);
    }
    Ok(ScalarGrid::from_rows(rows)?)
}

fn parse_row(line: &str, line_number: usize) -> Result<Vec<f64>, GridFileError> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| GridFileError::InvalidValue {
                    line: line_number,
                    token: token.to_owned(),
                })
        })
        .collect()
}
