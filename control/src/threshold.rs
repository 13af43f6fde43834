//! Voltage bands of the footswitch.
//!
//! Measured with the switch powered from the 3.3 V output, after shifting
//! samples down to 8 bits:
//!
//! ```text
//! 240-243: Bank B
//! 211-214: Bank A
//! 171-175: Position 0
//! 142-146: Position 1
//! 97-99:   Position 2
//! 60-63:   Position 3
//! ```
//!
//! Changing the footswitch hardware means changing the table, not the
//! algorithm.

/// Tolerance applied below each lower bound.
pub const EPSILON: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bank {
    #[default]
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    Bank(Bank),
    Position(u8),
}

/// Lower bounds of all bands. Must be ordered from the highest to the lowest.
pub const THRESHOLDS: [(u8, Band); 6] = [
    (240, Band::Bank(Bank::B)),
    (210, Band::Bank(Bank::A)),
    (171, Band::Position(0)),
    (142, Band::Position(1)),
    (97, Band::Position(2)),
    (60, Band::Position(3)),
];

/// Find the highest band the level falls into.
///
/// Returns `None` when the level is below all of them, i.e. the switch is
/// released or in the middle of a transition.
#[must_use]
pub fn match_band(level: u8) -> Option<Band> {
    THRESHOLDS
        .iter()
        .find(|(bound, _)| level > bound - EPSILON)
        .map(|(_, band)| *band)
}
