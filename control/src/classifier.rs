//! Detection of the selected channel from a captured waveform.
//!
//! The switch connects the input to one of several fixed voltage dividers.
//! Contact bounce and coupled noise only ever pull the line up towards the
//! idle level, so the minimum over the whole capture is the settled value
//! of the pressed switch.

use crate::log;
use crate::threshold::{match_band, Band, Bank};

/// Combined selection of bank and switch position, in range 0 to 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(u8);

impl Channel {
    fn new(bank: Bank, position: u8) -> Self {
        let offset = match bank {
            Bank::A => 0,
            Bank::B => 4,
        };
        Self(position + offset)
    }

    #[must_use]
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Extremes of a single capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Levels {
    pub min: u8,
    pub max: u8,
}

impl Levels {
    #[must_use]
    pub fn measure(samples: &[u8]) -> Option<Self> {
        let (first, rest) = samples.split_first()?;
        let levels = rest.iter().fold(
            Self {
                min: *first,
                max: *first,
            },
            |levels, sample| Self {
                min: levels.min.min(*sample),
                max: levels.max.max(*sample),
            },
        );
        Some(levels)
    }
}

/// Holds the selection over time.
///
/// Bank selection is sticky and it does not by itself cause a change. The
/// bank selector and the channel switch share the same line and settle at
/// different times, reporting the bank alone would send spurious commands
/// while the foot is still on its way to a position. The combined channel
/// gets recalculated on the next position match.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Classifier {
    bank: Bank,
    position: Option<u8>,
    channel: Option<Channel>,
    levels: Option<Levels>,
}

impl Classifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the selection with a captured buffer.
    ///
    /// Returns true only if a switch position was recognized and it resulted
    /// in a different channel than before.
    pub fn classify(&mut self, samples: &[u8]) -> bool {
        let Some(levels) = Levels::measure(samples) else {
            return false;
        };
        self.levels = Some(levels);
        log::trace!("Levels min={:?} max={:?}", levels.min, levels.max);

        match match_band(levels.min) {
            Some(Band::Bank(bank)) => {
                self.bank = bank;
                false
            }
            Some(Band::Position(position)) => {
                let channel_before = self.channel;
                self.position = Some(position);
                self.channel = Some(Channel::new(self.bank, position));
                let changed = self.channel != channel_before;
                if changed {
                    log::info!(
                        "Selected channel={:?} position={:?} bank={:?}",
                        self.channel,
                        position,
                        self.bank
                    );
                }
                changed
            }
            None => false,
        }
    }

    /// Classify and return the new channel if it changed.
    pub fn detect(&mut self, samples: &[u8]) -> Option<Channel> {
        if self.classify(samples) {
            self.channel
        } else {
            None
        }
    }

    #[must_use]
    pub fn bank(&self) -> Bank {
        self.bank
    }

    #[must_use]
    pub fn position(&self) -> Option<u8> {
        self.position
    }

    #[must_use]
    pub fn channel(&self) -> Option<Channel> {
        self.channel
    }

    /// Extremes of the last classified buffer.
    #[must_use]
    pub fn levels(&self) -> Option<Levels> {
        self.levels
    }
}
