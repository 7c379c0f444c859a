//! Library for modeling a color-sorting conveyor belt.
//!
//! A [`sorting::ConveyorBelt`] carries colored beads down a fixed grid, one
//! row per tick, past three ejector stations that kick matching colors into
//! collection buckets. The library is the discrete-time engine only: callers
//! drive ticks at whatever cadence they like and render from per-tick
//! snapshots.

pub mod sorting;
pub mod types;
