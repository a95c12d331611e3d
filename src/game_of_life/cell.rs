//! Cell coordinates on the unbounded plane

use serde::{Deserialize, Serialize};
use std::fmt;

/// Offsets of the Moore neighborhood, row by row, center excluded
pub const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A single grid coordinate. Used directly as a set key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Checked translation, `None` when either axis leaves the `i64` range
    pub fn checked_offset(self, dx: i64, dy: i64) -> Option<Cell> {
        Some(Cell::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// Translate by a neighborhood offset.
    ///
    /// Panics if the result leaves the `i64` range.
    pub fn offset(self, dx: i64, dy: i64) -> Cell {
        match self.checked_offset(dx, dy) {
            Some(cell) => cell,
            None => panic!(
                "cell ({}, {}) offset by ({}, {}) overflows i64",
                self.x, self.y, dx, dy
            ),
        }
    }

    /// The 8 Moore neighbors of this cell
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        MOORE_OFFSETS.iter().map(move |&(dx, dy)| self.offset(dx, dy))
    }
}

impl From<(i64, i64)> for Cell {
    fn from((x, y): (i64, i64)) -> Self {
        Cell::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive rectangle covering a set of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Cell,
    pub max: Cell,
}

impl BoundingBox {
    /// Smallest box containing every cell, `None` for an empty input
    pub fn enclosing<'a, I>(cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        let mut iter = cells.into_iter();
        let first = *iter.next()?;
        let mut bbox = BoundingBox { min: first, max: first };
        for cell in iter {
            bbox.min.x = bbox.min.x.min(cell.x);
            bbox.min.y = bbox.min.y.min(cell.y);
            bbox.max.x = bbox.max.x.max(cell.x);
            bbox.max.y = bbox.max.y.max(cell.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> u64 {
        self.max.x.abs_diff(self.min.x).saturating_add(1)
    }

    pub fn height(&self) -> u64 {
        self.max.y.abs_diff(self.min.y).saturating_add(1)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.min.x..=self.max.x).contains(&cell.x) && (self.min.y..=self.max.y).contains(&cell.y)
    }

    /// Keep the top-left corner and cut the box down to at most
    /// `max_width` x `max_height` cells. Both limits must be positive.
    pub fn clipped(&self, max_width: u64, max_height: u64) -> BoundingBox {
        let clip = |min: i64, max: i64, limit: u64| {
            let span = i64::try_from(limit.saturating_sub(1)).unwrap_or(i64::MAX);
            max.min(min.saturating_add(span))
        };
        BoundingBox {
            min: self.min,
            max: Cell::new(
                clip(self.min.x, self.max.x, max_width),
                clip(self.min.y, self.max.y, max_height),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_neighbors_exclude_center() {
        let center = Cell::new(-3, 7);
        let neighbors: HashSet<Cell> = center.neighbors().collect();

        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&center));
        for n in &neighbors {
            assert!(n.x.abs_diff(center.x) <= 1 && n.y.abs_diff(center.y) <= 1);
        }
    }

    #[test]
    fn test_checked_offset_at_extremes() {
        assert_eq!(Cell::new(i64::MAX, 0).checked_offset(1, 0), None);
        assert_eq!(Cell::new(0, i64::MIN).checked_offset(0, -1), None);
        assert_eq!(Cell::new(i64::MAX, 0).checked_offset(-1, 0), Some(Cell::new(i64::MAX - 1, 0)));
    }

    #[test]
    #[should_panic(expected = "overflows i64")]
    fn test_offset_panics_on_overflow() {
        Cell::new(i64::MAX, 0).offset(1, 1);
    }

    #[test]
    fn test_bounding_box() {
        let cells = [Cell::new(-2, 5), Cell::new(3, -1), Cell::new(0, 0)];
        let bbox = BoundingBox::enclosing(&cells).unwrap();

        assert_eq!(bbox.min, Cell::new(-2, -1));
        assert_eq!(bbox.max, Cell::new(3, 5));
        assert_eq!(bbox.width(), 6);
        assert_eq!(bbox.height(), 7);
        assert!(bbox.contains(Cell::new(0, 0)));
        assert!(!bbox.contains(Cell::new(4, 0)));
        assert!(BoundingBox::enclosing(&Vec::<Cell>::new()).is_none());
    }

    #[test]
    fn test_clipped() {
        let wide = BoundingBox {
            min: Cell::new(-3, 2),
            max: Cell::new(5_000_000, 4),
        };
        let clipped = wide.clipped(10, 10);

        assert_eq!(clipped.min, Cell::new(-3, 2));
        assert_eq!(clipped.max, Cell::new(6, 4));
        assert_eq!(clipped.width(), 10);
        assert_eq!(clipped.height(), 3);

        let full = BoundingBox {
            min: Cell::new(i64::MIN, i64::MIN),
            max: Cell::new(i64::MAX, i64::MAX),
        };
        assert_eq!(full.clipped(4, 2).max, Cell::new(i64::MIN + 3, i64::MIN + 1));
    }
}
