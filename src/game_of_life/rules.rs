//! Conway's B3/S23 rule table

/// Game of Life rules engine
pub struct LifeRules;

impl LifeRules {
    /// Maximum neighbor count in the Moore neighborhood
    pub const MAX_NEIGHBORS: u8 = 8;

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        if current_state {
            Self::survives(neighbor_count)
        } else {
            Self::is_born(neighbor_count)
        }
    }

    /// A live cell survives with 2 or 3 neighbors and dies of under- or overpopulation otherwise
    pub fn survives(neighbor_count: u8) -> bool {
        matches!(neighbor_count, 2 | 3)
    }

    /// A dead cell with exactly 3 neighbors becomes alive
    pub fn is_born(neighbor_count: u8) -> bool {
        neighbor_count == 3
    }

    /// Get neighbor counts that would result in birth (dead -> alive)
    pub fn birth_neighbor_counts() -> Vec<u8> {
        (0..=Self::MAX_NEIGHBORS).filter(|&n| Self::is_born(n)).collect()
    }

    /// Get neighbor counts that would result in survival (alive -> alive)
    pub fn survival_neighbor_counts() -> Vec<u8> {
        (0..=Self::MAX_NEIGHBORS).filter(|&n| Self::survives(n)).collect()
    }

    /// Check if a neighbor count is valid (0-8)
    pub fn is_valid_neighbor_count(count: u8) -> bool {
        count <= Self::MAX_NEIGHBORS
    }
}
