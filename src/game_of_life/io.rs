//! File I/O for seed patterns and live-set snapshots

use super::cell::Cell;
use super::grid::CellSet;
use super::pattern::Pattern;
use crate::config::OutputFormat;
use crate::error::Result;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Load a pattern from a text file.
/// Format: each non-blank line is a row, '#' for alive cells and '-' or '.' for dead ones
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<Pattern> {
    let content = std::fs::read_to_string(path)?;
    content.parse()
}

/// Save a pattern to a text file
pub fn save_pattern_to_file<P: AsRef<Path>>(pattern: &Pattern, path: P) -> Result<()> {
    write_creating_parent(path.as_ref(), &pattern.to_string())
}

/// Serialized form of one generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub generation: u64,
    pub population: usize,
    pub cells: Vec<Cell>,
}

impl SnapshotRecord {
    /// Cells ordered by row then column so output is stable across runs
    pub fn new(generation: u64, snapshot: &CellSet) -> Self {
        Self {
            generation,
            population: snapshot.len(),
            cells: snapshot.iter().copied().sorted_by_key(|c| (c.y, c.x)).collect(),
        }
    }
}

/// Text form: a header comment, then `x y` per live cell
pub fn snapshot_to_string(record: &SnapshotRecord) -> String {
    let mut result = format!(
        "# generation {} population {}\n",
        record.generation, record.population
    );
    for cell in &record.cells {
        result.push_str(&format!("{} {}\n", cell.x, cell.y));
    }
    result
}

/// Write the live set of one generation for external inspection
pub fn save_snapshot<P: AsRef<Path>>(
    snapshot: &CellSet,
    generation: u64,
    path: P,
    format: OutputFormat,
) -> Result<()> {
    let record = SnapshotRecord::new(generation, snapshot);
    let content = match format {
        OutputFormat::Text => snapshot_to_string(&record),
        OutputFormat::Json => serde_json::to_string_pretty(&record)?,
    };
    write_creating_parent(path.as_ref(), &content)
}

fn write_creating_parent(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;
    use tempfile::tempdir;

    fn cells(coords: &[(i64, i64)]) -> CellSet {
        coords.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn test_pattern_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/beehive.txt");

        let original = Pattern::parse(&["-##-", "#--#", "-##-"]).unwrap();
        save_pattern_to_file(&original, &file_path).unwrap();

        let loaded = load_pattern_from_file(&file_path).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_invalid_pattern_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("bad.txt");
        std::fs::write(&file_path, "#-#\n#?#\n").unwrap();

        assert!(matches!(
            load_pattern_from_file(&file_path),
            Err(LifeError::InvalidPattern(_))
        ));
        assert!(matches!(
            load_pattern_from_file(temp_dir.path().join("missing.txt")),
            Err(LifeError::Io(_))
        ));
    }

    #[test]
    fn test_snapshot_text() {
        let record = SnapshotRecord::new(7, &cells(&[(1, 0), (-2, 3), (0, 0)]));
        assert_eq!(
            snapshot_to_string(&record),
            "# generation 7 population 3\n0 0\n1 0\n-2 3\n"
        );
    }

    #[test]
    fn test_save_snapshot_json() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("out/gen.json");
        let live = cells(&[(0, -1), (0, 0), (0, 1)]);

        save_snapshot(&live, 1, &file_path, OutputFormat::Json).unwrap();

        let content = std::fs::read_to_string(&file_path).unwrap();
        let record: SnapshotRecord = serde_json::from_str(&content).unwrap();
        assert_eq!(record.generation, 1);
        assert_eq!(record.population, 3);
        assert_eq!(record.cells[0], Cell::new(0, -1));
    }
}
