//! Game of Life core functionality

pub mod cell;
pub mod grid;
pub mod io;
pub mod library;
pub mod pattern;
pub mod rules;

pub use cell::{BoundingBox, Cell};
pub use grid::{CellSet, LifeGrid, Snapshot};
pub use io::{load_pattern_from_file, save_pattern_to_file, save_snapshot};
pub use pattern::Pattern;
pub use rules::LifeRules;
