//! Rectangular seed patterns made of alive/dead markers

use crate::error::{LifeError, Result};
use std::fmt;
use std::str::FromStr;

const ALIVE: char = '#';
const DEAD: char = '-';
const DEAD_ALT: char = '.';

/// A finite rectangular grid of alive/dead markers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    rows: Vec<Vec<bool>>,
}

impl Pattern {
    /// Create a pattern from a 2D boolean array. All rows must have the same length.
    pub fn from_cells(rows: Vec<Vec<bool>>) -> Result<Self> {
        if let Some(first) = rows.first() {
            let width = first.len();
            for (i, row) in rows.iter().enumerate() {
                if row.len() != width {
                    return Err(LifeError::InvalidPattern(format!(
                        "row {} has length {}, expected {}",
                        i,
                        row.len(),
                        width
                    )));
                }
            }
        }
        Ok(Self { rows })
    }

    /// Parse rows of `#` (alive) and `-` or `.` (dead)
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let mut cells = Vec::with_capacity(rows.len());

        for (row_idx, line) in rows.iter().enumerate() {
            let mut row = Vec::with_capacity(line.as_ref().len());
            for (col_idx, ch) in line.as_ref().chars().enumerate() {
                match ch {
                    ALIVE => row.push(true),
                    DEAD | DEAD_ALT => row.push(false),
                    _ => {
                        return Err(LifeError::InvalidPattern(format!(
                            "invalid character '{}' at row {}, column {}",
                            ch, row_idx, col_idx
                        )))
                    }
                }
            }
            cells.push(row);
        }

        Self::from_cells(cells)
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// True when the pattern has no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.width() == 0
    }

    pub fn get(&self, dx: usize, dy: usize) -> bool {
        self.rows.get(dy).and_then(|row| row.get(dx)).copied().unwrap_or(false)
    }

    /// `(dx, dy)` of every alive marker, row-major
    pub fn live_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &alive)| alive)
                .map(move |(dx, _)| (dx, dy))
        })
    }

    pub fn living_count(&self) -> usize {
        self.live_offsets().count()
    }
}

impl FromStr for Pattern {
    type Err = LifeError;

    /// Newline-separated rows; blank lines are skipped
    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Self::parse(&lines)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for &alive in row {
                write!(f, "{}", if alive { ALIVE } else { DEAD })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
