//! Core sorting primitives and data structures for the conveyor belt.

pub mod activation;
pub mod belt;
pub mod buckets;
pub mod grid;
pub mod schedule;

// Re-export the main types for easier access
pub use activation::ActivationMap;
pub use belt::{BeltConfig, BeltSnapshot, ConfigError, ConveyorBelt};
pub use buckets::BucketLedger;
pub use grid::Grid;
pub use schedule::{EjectorCommand, EjectorSchedule};

#[cfg(test)]
mod tests;
