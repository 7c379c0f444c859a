use crate::types::{Color, STATION_COUNT};

/// Which ejectors fire this tick: one boolean per station and column.
///
/// The map is derived fresh every tick from the due schedule commands and is
/// a set, not a count. Two commands due in the same tick for the same station
/// and column collapse into a single flag; the resulting under-count of
/// near-simultaneous arrivals is an accepted approximation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationMap {
    columns: usize,
    // STATION_COUNT rows of `columns` flags, row-major like the grid.
    flags: Vec<bool>,
}

impl ActivationMap {
    /// Creates an all-inactive map for a belt with the given column count.
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            flags: vec![false; STATION_COUNT * columns],
        }
    }

    /// Number of columns covered by the map.
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub(crate) fn mark(&mut self, color: Color, column: usize) {
        debug_assert!(column < self.columns);
        self.flags[color.station() * self.columns + column] = true;
    }

    /// Returns `true` when the given color's ejector fires in this column.
    pub fn is_active(&self, color: Color, column: usize) -> bool {
        debug_assert!(column < self.columns);
        self.flags[color.station() * self.columns + column]
    }

    /// Returns one station's flags as a slice, indexed by column.
    pub fn station_row(&self, station: usize) -> &[bool] {
        debug_assert!(station < STATION_COUNT);
        &self.flags[station * self.columns..(station + 1) * self.columns]
    }

    /// Counts the activations set this tick.
    pub fn active_count(&self) -> usize {
        self.flags.iter().filter(|&&flag| flag).count()
    }

    /// Copies the map into a nested station-by-column matrix for snapshots.
    pub fn to_matrix(&self) -> Vec<Vec<bool>> {
        self.flags
            .chunks(self.columns)
            .map(|row| row.to_vec())
            .collect()
    }
}
