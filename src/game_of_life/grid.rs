//! Sparse live-cell grid on the unbounded integer plane

use super::cell::{BoundingBox, Cell};
use super::pattern::Pattern;
use super::rules::LifeRules;
use crate::error::{LifeError, Result};
use itertools::Itertools;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// The set of live cells of one generation
pub type CellSet = HashSet<Cell>;

/// Immutable shared view of one generation. Cloning is cheap and a held
/// snapshot is never affected by later `advance` or `seed` calls.
pub type Snapshot = Arc<CellSet>;

/// Largest width or height drawn by the `Display` impl; the live region is
/// clipped from its top-left corner beyond this
pub const DISPLAY_EXTENT: u64 = 64;

/// Game of Life on an unbounded plane, storing live cells only
#[derive(Debug, Clone, Default)]
pub struct LifeGrid {
    live: Snapshot,
    generation: u64,
    dirty: bool,
}

impl LifeGrid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid whose live set is exactly `cells`
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let live: CellSet = cells.into_iter().collect();
        Self {
            dirty: !live.is_empty(),
            live: Arc::new(live),
            generation: 0,
        }
    }

    pub fn is_alive(&self, x: i64, y: i64) -> bool {
        self.live.contains(&Cell::new(x, y))
    }

    /// Count live cells among the 8 Moore neighbors of `(x, y)` in `snapshot`.
    /// The cell itself is never counted.
    pub fn neighbor_count(snapshot: &CellSet, x: i64, y: i64) -> u8 {
        Cell::new(x, y)
            .neighbors()
            .filter(|neighbor| snapshot.contains(neighbor))
            .count() as u8
    }

    /// Advance exactly one generation.
    ///
    /// Every neighbor count is taken against the previous generation; the
    /// next generation is built in a fresh set and published with a single
    /// swap once complete. Only live cells and their Moore neighbors can
    /// change state, so nothing else is visited.
    pub fn advance(&mut self) {
        let previous = Arc::clone(&self.live);
        let next = Self::next_generation(&previous);

        debug!(
            generation = self.generation + 1,
            population = next.len(),
            born = next.difference(&previous).count(),
            died = previous.difference(&next).count(),
            "advanced"
        );

        self.live = Arc::new(next);
        self.generation += 1;
        self.dirty = true;
    }

    /// Advance `generations` times
    pub fn advance_by(&mut self, generations: u64) {
        for _ in 0..generations {
            self.advance();
        }
    }

    /// Compute the successor of `previous` without touching any grid state
    pub fn next_generation(previous: &CellSet) -> CellSet {
        let mut next = CellSet::with_capacity(previous.len());
        let mut candidates = CellSet::new();

        for &cell in previous {
            if LifeRules::survives(Self::neighbor_count(previous, cell.x, cell.y)) {
                next.insert(cell);
            }
            candidates.extend(cell.neighbors().filter(|n| !previous.contains(n)));
        }

        for cell in candidates {
            if LifeRules::is_born(Self::neighbor_count(previous, cell.x, cell.y)) {
                next.insert(cell);
            }
        }

        next
    }

    /// Insert the alive markers of `pattern` centered on `(origin_x, origin_y)`.
    ///
    /// Pattern cell `(dx, dy)` lands on
    /// `(origin_x + dx - width / 2, origin_y + dy - height / 2)`. Dead markers
    /// never clear an existing cell. Nothing is inserted if any target
    /// coordinate would overflow. Returns the number of newly alive cells.
    pub fn seed(&mut self, origin_x: i64, origin_y: i64, pattern: &Pattern) -> Result<usize> {
        if pattern.is_empty() {
            return Ok(0);
        }

        let overflow = || LifeError::CoordinateOverflow { x: origin_x, y: origin_y };
        let left = origin_x
            .checked_sub((pattern.width() / 2) as i64)
            .ok_or_else(overflow)?;
        let top = origin_y
            .checked_sub((pattern.height() / 2) as i64)
            .ok_or_else(overflow)?;

        let cells = pattern
            .live_offsets()
            .map(|(dx, dy)| Cell::new(left, top).checked_offset(dx as i64, dy as i64))
            .collect::<Option<Vec<Cell>>>()
            .ok_or_else(overflow)?;

        let live = Arc::make_mut(&mut self.live);
        let inserted = cells.into_iter().filter(|&cell| live.insert(cell)).count();
        if inserted > 0 {
            self.dirty = true;
        }

        debug!(origin_x, origin_y, inserted, "seeded pattern");
        Ok(inserted)
    }

    /// Clear every cell and restart the generation count
    pub fn reset(&mut self) {
        self.live = Snapshot::default();
        self.generation = 0;
        self.dirty = true;
    }

    /// Shared handle on the current generation
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.live)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.live.iter().copied()
    }

    /// Live cells ordered by row then column
    pub fn sorted_cells(&self) -> Vec<Cell> {
        self.live.iter().copied().sorted_by_key(|c| (c.y, c.x)).collect()
    }

    pub fn population(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::enclosing(self.live.iter())
    }

    /// Number of completed advances since construction or the last reset
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the live set changed since the renderer last took the flag
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl PartialEq for LifeGrid {
    /// Grids are equal when their live sets are equal
    fn eq(&self, other: &Self) -> bool {
        self.live == other.live
    }
}

impl Eq for LifeGrid {}

impl fmt::Display for LifeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(bbox) = self.bounding_box() else {
            return Ok(());
        };
        let bbox = bbox.clipped(DISPLAY_EXTENT, DISPLAY_EXTENT);
        for y in bbox.min.y..=bbox.max.y {
            for x in bbox.min.x..=bbox.max.x {
                let symbol = if self.is_alive(x, y) { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
