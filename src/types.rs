//! Shared primitive types used across the conveyor library.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of ejector stations on the belt, one per sortable color.
pub const STATION_COUNT: usize = 3;

/*
 * The fixed grid row of each ejector station, indexed by station. Beads enter
 * at row 0, so a color's travel distance in ticks equals its ejector row.
 */
pub const EJECTOR_ROWS: [usize; STATION_COUNT] = [7, 8, 9];

/// Smallest belt that can host every ejector station.
pub const MIN_ROWS: usize = EJECTOR_ROWS[STATION_COUNT - 1] + 1;

/// The three sortable bead colors. Each color maps to exactly one ejector
/// station and one collection bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    /// Every color, in station order.
    pub const ALL: [Color; STATION_COUNT] = [Color::Red, Color::Green, Color::Blue];

    /// Index of this color's ejector station and bucket.
    pub fn station(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Blue => 2,
        }
    }

    /// The grid row where this color's ejector sits.
    pub fn ejector_row(self) -> usize {
        EJECTOR_ROWS[self.station()]
    }
}

/// The payload of one belt cell: a colored bead, or nothing.
///
/// Items are immutable values; the belt replaces cells wholesale and never
/// mutates an item in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    Empty,
    Bead(Color),
}

impl Item {
    /// Returns the bead color, or `None` for an empty cell.
    pub fn color(self) -> Option<Color> {
        match self {
            Item::Empty => None,
            Item::Bead(color) => Some(color),
        }
    }

    /// Returns `true` when the cell holds no bead.
    pub fn is_empty(self) -> bool {
        self == Item::Empty
    }

    /// Draws one entry-row item, each of {Red, Green, Blue, Empty} equally
    /// likely.
    pub fn sample(rng: &mut impl Rng) -> Item {
        match rng.gen_range(0..4u8) {
            0 => Item::Bead(Color::Red),
            1 => Item::Bead(Color::Green),
            2 => Item::Bead(Color::Blue),
            _ => Item::Empty,
        }
    }
}
