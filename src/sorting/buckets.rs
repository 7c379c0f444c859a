use crate::types::{Color, STATION_COUNT};

/// Cumulative ejected-bead counts, one bucket per color.
///
/// The ledger is append-only: counts only ever grow, and only the tick engine
/// credits it, at the moment a bead is intercepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketLedger {
    counts: [u64; STATION_COUNT],
}

impl BucketLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds exactly one bead to the given color's bucket.
    pub fn credit(&mut self, color: Color) {
        self.counts[color.station()] += 1;
    }

    /// Returns the given color's bucket count.
    pub fn count(&self, color: Color) -> u64 {
        self.counts[color.station()]
    }

    /// Returns every bucket count, indexed by station.
    pub fn counts(&self) -> [u64; STATION_COUNT] {
        self.counts
    }

    /// Total beads ejected across all buckets.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}
