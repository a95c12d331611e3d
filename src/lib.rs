//! Sparse Game of Life
//!
//! Conway's Game of Life on an unbounded integer plane. Only live cells are
//! stored; each generation is computed from an immutable snapshot of the
//! previous one and published in a single swap.

pub mod config;
pub mod driver;
pub mod error;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use error::LifeError;
pub use game_of_life::{Cell, LifeGrid, Pattern};

use anyhow::{Context, Result};
use game_of_life::{library, load_pattern_from_file};
use tracing::info;

/// Build a grid holding every configured seed
pub fn seed_grid(settings: &Settings) -> Result<LifeGrid> {
    let mut grid = LifeGrid::new();

    for seed in &settings.seeds {
        let [x, y] = seed.origin;
        let pattern = match (&seed.pattern, &seed.file) {
            (Some(name), _) => {
                library::get(name).ok_or_else(|| LifeError::UnknownPattern(name.clone()))?
            }
            (None, Some(file)) => load_pattern_from_file(file)
                .with_context(|| format!("Failed to load pattern from {}", file.display()))?,
            (None, None) => anyhow::bail!("Seed at ({}, {}) has no pattern", x, y),
        };

        let inserted = grid
            .seed(x, y, &pattern)
            .with_context(|| format!("Failed to seed pattern at ({}, {})", x, y))?;
        info!(
            pattern = seed.pattern.as_deref().unwrap_or("<file>"),
            x, y, inserted, "seeded"
        );
    }

    Ok(grid)
}
