use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::sorting::{ActivationMap, BucketLedger, EjectorSchedule, Grid};
use crate::types::{Item, MIN_ROWS, STATION_COUNT};

/// Belt dimensions, 10 rows by 5 columns unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeltConfig {
    pub rows: usize,
    pub columns: usize,
}

impl BeltConfig {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }
}

impl Default for BeltConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 5,
        }
    }
}

/// Rejected belt dimensions. Construction is the only fallible operation;
/// every tick on a constructed belt is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("belt must have at least one column")]
    NoColumns,
    #[error("belt needs at least {min} rows to host every ejector station, got {rows}")]
    TooFewRows { rows: usize, min: usize },
}

/// An immutable per-tick view of the belt for drivers and renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeltSnapshot {
    /// Ticks advanced since construction.
    pub tick: u64,
    /// Row-major rows-by-columns copy of the belt surface.
    pub grid: Vec<Vec<Item>>,
    /// Station-by-column ejector flags for the tick just advanced.
    pub activations: Vec<Vec<bool>>,
    /// Cumulative bucket counts, indexed by station.
    pub buckets: [u64; STATION_COUNT],
    /// Beads that ran off the far end of the belt unintercepted.
    pub exited: u64,
}

/**
 * The discrete-time engine for a color-sorting conveyor belt.
 *
 * Beads enter at row 0, ride down one row per tick, and pass three fixed
 * ejector stations on the way. When a bead enters, a countdown command is
 * scheduled for its color's station; the tick the countdown comes due the
 * station fires for that column and intercepts the arriving bead into its
 * bucket. A bead whose station does not fire passes through unharmed and is
 * eventually lost off the far end of the belt.
 *
 * The engine owns all of its state exclusively and performs no I/O, waiting,
 * or timing; an external driver decides when ticks happen and renders from
 * [`ConveyorBelt::snapshot`].
 */
#[derive(Debug, Clone)]
pub struct ConveyorBelt {
    grid: Grid,
    schedule: EjectorSchedule,
    buckets: BucketLedger,
    // Activation map of the most recent tick, kept for snapshots.
    activations: ActivationMap,
    tick: u64,
    exited: u64,
}

impl ConveyorBelt {
    /// Creates an empty belt, or fails when the dimensions cannot host the
    /// three ejector stations.
    pub fn new(config: BeltConfig) -> Result<Self, ConfigError> {
        if config.columns == 0 {
            return Err(ConfigError::NoColumns);
        }
        if config.rows < MIN_ROWS {
            return Err(ConfigError::TooFewRows {
                rows: config.rows,
                min: MIN_ROWS,
            });
        }

        Ok(Self {
            grid: Grid::new(config.rows, config.columns),
            schedule: EjectorSchedule::new(),
            buckets: BucketLedger::new(),
            activations: ActivationMap::new(config.columns),
            tick: 0,
            exited: 0,
        })
    }

    /// Advances one tick, sampling the entry row from the supplied random
    /// source. Identical seeds produce identical belt histories.
    pub fn advance(&mut self, rng: &mut impl Rng) {
        let entry: Vec<Item> = (0..self.grid.columns())
            .map(|_| Item::sample(rng))
            .collect();
        self.advance_with_entry_row(&entry);
    }

    /// Advances one tick with a caller-supplied entry row. This is the
    /// deterministic seam for replay drivers and tests; `entry` must span
    /// every column.
    pub fn advance_with_entry_row(&mut self, entry: &[Item]) {
        assert_eq!(
            entry.len(),
            self.grid.columns(),
            "entry row must cover every belt column"
        );

        // Commands due this tick become activations, the rest count down.
        self.activations = self.schedule.tick(self.grid.columns());

        // Every bead entering at row 0 schedules its own ejection; the travel
        // distance to a color's station equals that station's row.
        for (column, item) in entry.iter().enumerate() {
            if let Some(color) = item.color() {
                self.schedule
                    .schedule(color, column, color.ejector_row() as u32);
            }
        }

        // Whatever sits on the last row is pushed off the belt by the shift.
        let last_row = self.grid.rows() - 1;
        let leaving = self
            .grid
            .row(last_row)
            .iter()
            .filter(|item| !item.is_empty())
            .count();
        self.exited += leaving as u64;

        // Shift every row down by one, bottom first. A bead arriving at its
        // color's ejector row while that station fires in its column is
        // intercepted into the bucket; otherwise it rides on unchanged.
        for row in (1..=last_row).rev() {
            for column in 0..self.grid.columns() {
                let arriving = self.grid.get(row - 1, column);
                if let Item::Bead(color) = arriving
                    && row == color.ejector_row()
                    && self.activations.is_active(color, column)
                {
                    self.buckets.credit(color);
                    self.grid.set(row, column, Item::Empty);
                    debug!("ejected {:?} bead at row {} column {}", color, row, column);
                } else {
                    self.grid.set(row, column, arriving);
                }
            }
        }

        self.grid.replace_row(0, entry);
        self.tick += 1;
        trace!(
            "tick {}: {} beads on belt, {} pending commands",
            self.tick,
            self.grid.bead_count(),
            self.schedule.len()
        );
    }

    /// Copies the current state into an owned snapshot for the driver.
    pub fn snapshot(&self) -> BeltSnapshot {
        BeltSnapshot {
            tick: self.tick,
            grid: self.grid.to_matrix(),
            activations: self.activations.to_matrix(),
            buckets: self.buckets.counts(),
            exited: self.exited,
        }
    }

    /// The belt surface.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The commands still counting down.
    pub fn schedule(&self) -> &EjectorSchedule {
        &self.schedule
    }

    /// The cumulative bucket ledger.
    pub fn buckets(&self) -> &BucketLedger {
        &self.buckets
    }

    /// The activation map of the most recent tick.
    pub fn activations(&self) -> &ActivationMap {
        &self.activations
    }

    /// Ticks advanced since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Beads lost off the far end of the belt, cumulatively.
    pub fn exited_count(&self) -> u64 {
        self.exited
    }

    #[cfg(debug_assertions)]
    /// Verifies the internal invariants of the belt, panicking in debug
    /// builds when something is inconsistent.
    pub fn sanity_check(&self) {
        debug_assert!(self.grid.rows() >= MIN_ROWS);
        debug_assert!(self.grid.columns() >= 1);
        debug_assert_eq!(self.activations.columns(), self.grid.columns());

        for command in self.schedule.pending() {
            debug_assert!(command.remaining_steps >= 1);
            debug_assert!(command.remaining_steps as usize <= command.color.ejector_row());
            debug_assert!(command.column < self.grid.columns());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn empty_row(columns: usize) -> Vec<Item> {
        vec![Item::Empty; columns]
    }

    fn single_bead_row(columns: usize, column: usize, color: Color) -> Vec<Item> {
        let mut row = empty_row(columns);
        row[column] = Item::Bead(color);
        row
    }

    #[test]
    fn construction_rejects_bad_dimensions() {
        assert_eq!(
            ConveyorBelt::new(BeltConfig::new(10, 0)).unwrap_err(),
            ConfigError::NoColumns
        );
        assert_eq!(
            ConveyorBelt::new(BeltConfig::new(9, 5)).unwrap_err(),
            ConfigError::TooFewRows { rows: 9, min: 10 }
        );
        assert!(ConveyorBelt::new(BeltConfig::new(10, 1)).is_ok());
    }

    #[test]
    fn default_config_is_ten_by_five() {
        let belt = ConveyorBelt::new(BeltConfig::default()).unwrap();

        assert_eq!(belt.grid().rows(), 10);
        assert_eq!(belt.grid().columns(), 5);
        assert_eq!(belt.tick_count(), 0);
        assert_eq!(belt.buckets().total(), 0);
        belt.sanity_check();
    }

    #[test]
    fn empty_entries_keep_the_belt_empty() {
        let mut belt = ConveyorBelt::new(BeltConfig::default()).unwrap();

        for _ in 0..20 {
            belt.advance_with_entry_row(&empty_row(5));
            belt.sanity_check();
        }

        assert_eq!(belt.grid().bead_count(), 0);
        assert_eq!(belt.buckets().total(), 0);
        assert_eq!(belt.exited_count(), 0);
        assert_eq!(belt.tick_count(), 20);
    }

    #[test]
    fn red_bead_is_intercepted_at_its_station() {
        // Start: 10x5 belt, one red bead entering column 2 at tick 0.
        let mut belt = ConveyorBelt::new(BeltConfig::default()).unwrap();
        belt.advance_with_entry_row(&single_bead_row(5, 2, Color::Red));

        // Ticks 1-6: the bead rides down, no station fires.
        for tick in 1..=6 {
            belt.advance_with_entry_row(&empty_row(5));
            belt.sanity_check();
            assert_eq!(belt.activations().active_count(), 0, "tick {}", tick);
            assert_eq!(belt.grid().get(tick, 2), Item::Bead(Color::Red));
        }

        // Tick 7: the red station fires in column 2 and takes the bead.
        belt.advance_with_entry_row(&empty_row(5));
        assert!(belt.activations().is_active(Color::Red, 2));
        assert_eq!(belt.activations().active_count(), 1);
        assert_eq!(belt.grid().get(7, 2), Item::Empty);
        assert_eq!(belt.buckets().count(Color::Red), 1);
        assert_eq!(belt.buckets().total(), 1);
        assert_eq!(belt.grid().bead_count(), 0);
        assert!(belt.schedule().is_empty());
    }

    #[test]
    fn each_color_lands_in_its_own_bucket() {
        let mut belt = ConveyorBelt::new(BeltConfig::default()).unwrap();
        let mut entry = empty_row(5);
        entry[0] = Item::Bead(Color::Red);
        entry[2] = Item::Bead(Color::Green);
        entry[4] = Item::Bead(Color::Blue);
        belt.advance_with_entry_row(&entry);

        // Blue travels farthest; after its station fires everything is sorted.
        for _ in 0..Color::Blue.ejector_row() {
            belt.advance_with_entry_row(&empty_row(5));
            belt.sanity_check();
        }

        assert_eq!(belt.buckets().counts(), [1, 1, 1]);
        assert_eq!(belt.grid().bead_count(), 0);
        assert_eq!(belt.exited_count(), 0);
    }

    #[test]
    fn unscheduled_bead_passes_through_and_exits() {
        // Start: a red bead whose command is dropped before it comes due, so
        // its station stays dark and the bead must ride off the belt.
        let mut belt = ConveyorBelt::new(BeltConfig::default()).unwrap();
        belt.advance_with_entry_row(&single_bead_row(5, 1, Color::Red));
        belt.schedule = EjectorSchedule::new();

        for tick in 1..=9 {
            belt.advance_with_entry_row(&empty_row(5));
            assert_eq!(belt.activations().active_count(), 0);
            assert_eq!(belt.grid().get(tick, 1), Item::Bead(Color::Red));
        }

        // One more tick pushes the bead off row 9 into the void.
        belt.advance_with_entry_row(&empty_row(5));
        assert_eq!(belt.grid().bead_count(), 0);
        assert_eq!(belt.buckets().total(), 0);
        assert_eq!(belt.exited_count(), 1);
    }

    #[test]
    fn snapshot_reflects_the_current_tick() {
        let mut belt = ConveyorBelt::new(BeltConfig::default()).unwrap();
        belt.advance_with_entry_row(&single_bead_row(5, 3, Color::Blue));

        let snapshot = belt.snapshot();
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.grid.len(), 10);
        assert!(snapshot.grid.iter().all(|row| row.len() == 5));
        assert_eq!(snapshot.grid[0][3], Item::Bead(Color::Blue));
        assert_eq!(snapshot.activations.len(), STATION_COUNT);
        assert!(snapshot.activations.iter().flatten().all(|&flag| !flag));
        assert_eq!(snapshot.buckets, [0, 0, 0]);
        assert_eq!(snapshot.exited, 0);

        // Snapshots are detached copies; advancing the belt leaves them be.
        let frozen = snapshot.clone();
        belt.advance_with_entry_row(&empty_row(5));
        assert_eq!(snapshot, frozen);
        assert_ne!(belt.snapshot(), frozen);
    }

    #[test]
    fn config_error_messages_name_the_limit() {
        let error = ConveyorBelt::new(BeltConfig::new(3, 5)).unwrap_err();
        assert_eq!(
            error.to_string(),
            "belt needs at least 10 rows to host every ejector station, got 3"
        );
    }
}
