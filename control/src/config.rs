//! Configuration of the free-running capture.
//!
//! The number of samples and the time it should take to collect them are
//! all that is needed to tune the sampler. The divider is derived from these
//! once and never changes afterwards.

/// Clock feeding the sampler, in Hz.
pub const REFERENCE_CLOCK_HZ: u32 = 48_000_000;

/// Doing 1000 samples in a 100 ms interval seems to be ok.
pub const BUFFER_LEN: usize = 1000;
pub const INTERVAL_MS: u32 = 100;

/// The footswitch ring is wired to the third analog input (GPIO 28).
pub const INPUT: u8 = 2;

/// Number of analog inputs exposed on pins. The fifth one is the
/// temperature sensor.
const INPUTS: u8 = 4;

// Added on top of the doubled interval before a capture is considered stuck.
const TIMEOUT_MARGIN_MS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The analog input index does not map to a pin.
    InvalidInput(u8),
    /// The buffer must hold at least a single sample.
    EmptyBuffer,
    /// The interval is too long for the given number of samples.
    DivisorOutOfRange,
}

/// Sampler clock divider in 16.8 fixed point.
///
/// One sample is taken every `divider + 1` cycles of the reference clock.
/// Each conversion takes 96 cycles, so a divider of 0 means sampling as
/// fast as possible, and anything between 0 and 96 is equivalent to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockDivider {
    pub integer: u16,
    /// In 1/256ths.
    pub fraction: u8,
}

impl ClockDivider {
    #[must_use]
    pub fn as_f32(self) -> f32 {
        f32::from(self.integer) + f32::from(self.fraction) / 256.0
    }

    #[must_use]
    pub fn is_full_speed(self) -> bool {
        self.integer == 0 && self.fraction == 0
    }
}

/// Immutable description of the capture, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CaptureConfig {
    input: u8,
    buffer_len: usize,
    interval_ms: u32,
    divider: ClockDivider,
}

impl CaptureConfig {
    /// # Errors
    ///
    /// Fails when the input does not exist, the buffer is empty, or when the
    /// interval cannot be stretched over the buffer with the 16 bit divider.
    pub fn new(input: u8, buffer_len: usize, interval_ms: u32) -> Result<Self, ConfigError> {
        if input >= INPUTS {
            return Err(ConfigError::InvalidInput(input));
        }
        if buffer_len == 0 {
            return Err(ConfigError::EmptyBuffer);
        }
        let divider = calculate_divider(buffer_len, interval_ms)?;
        Ok(Self {
            input,
            buffer_len,
            interval_ms,
            divider,
        })
    }

    #[must_use]
    pub fn input(&self) -> u8 {
        self.input
    }

    #[must_use]
    pub fn buffer_len(&self) -> usize {
        self.buffer_len
    }

    #[must_use]
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    #[must_use]
    pub fn divider(&self) -> ClockDivider {
        self.divider
    }

    /// How long to wait for a capture before giving up on the hardware.
    #[must_use]
    pub fn timeout_ms(&self) -> u32 {
        self.interval_ms
            .saturating_mul(2)
            .saturating_add(TIMEOUT_MARGIN_MS)
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            input: INPUT,
            buffer_len: BUFFER_LEN,
            interval_ms: INTERVAL_MS,
            divider: ClockDivider {
                integer: 4800,
                fraction: 0,
            },
        }
    }
}

// divider = (clock * interval) / (1000 * samples), kept in 1/256ths.
fn calculate_divider(buffer_len: usize, interval_ms: u32) -> Result<ClockDivider, ConfigError> {
    let numerator = u64::from(REFERENCE_CLOCK_HZ)
        .checked_mul(u64::from(interval_ms))
        .and_then(|product| product.checked_mul(256))
        .ok_or(ConfigError::DivisorOutOfRange)?;
    let denominator = u64::try_from(buffer_len)
        .ok()
        .and_then(|samples| samples.checked_mul(1000))
        .ok_or(ConfigError::DivisorOutOfRange)?;
    let fixed = numerator / denominator;

    let integer = u16::try_from(fixed >> 8).map_err(|_| ConfigError::DivisorOutOfRange)?;
    let fraction = (fixed & 0xff) as u8;
    Ok(ClockDivider { integer, fraction })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_defaults_are_used_divider_spreads_samples_over_interval() {
        let config = CaptureConfig::new(INPUT, BUFFER_LEN, INTERVAL_MS).unwrap();
        assert_eq!(config.divider().integer, 4800);
        assert_eq!(config.divider().fraction, 0);
        assert_relative_eq!(config.divider().as_f32(), 4800.0);
    }

    #[test]
    fn default_matches_validated_defaults() {
        let config = CaptureConfig::new(INPUT, BUFFER_LEN, INTERVAL_MS).unwrap();
        assert_eq!(CaptureConfig::default(), config);
    }

    #[test]
    fn when_interval_is_zero_it_samples_at_full_speed() {
        let config = CaptureConfig::new(0, 1000, 0).unwrap();
        assert!(config.divider().is_full_speed());
    }

    #[test]
    fn fractional_divider_is_kept_in_256ths() {
        // 48 MHz * 1 ms / 7 samples = 6857.142..
        let config = CaptureConfig::new(1, 7, 1).unwrap();
        assert_eq!(config.divider().integer, 6857);
        assert_eq!(config.divider().fraction, 36);
        assert_relative_eq!(config.divider().as_f32(), 6857.1406);
    }

    #[test]
    fn when_input_is_out_of_range_it_fails() {
        assert_eq!(
            CaptureConfig::new(4, BUFFER_LEN, INTERVAL_MS),
            Err(ConfigError::InvalidInput(4))
        );
    }

    #[test]
    fn when_buffer_is_empty_it_fails() {
        assert_eq!(
            CaptureConfig::new(INPUT, 0, INTERVAL_MS),
            Err(ConfigError::EmptyBuffer)
        );
    }

    #[test]
    fn when_interval_is_too_long_it_fails() {
        assert_eq!(
            CaptureConfig::new(INPUT, 10, 1000),
            Err(ConfigError::DivisorOutOfRange)
        );
    }

    #[test]
    fn when_interval_overflows_it_fails() {
        assert_eq!(
            CaptureConfig::new(INPUT, BUFFER_LEN, u32::MAX),
            Err(ConfigError::DivisorOutOfRange)
        );
    }

    #[test]
    fn when_buffer_length_overflows_it_fails() {
        assert_eq!(
            CaptureConfig::new(INPUT, usize::MAX, INTERVAL_MS),
            Err(ConfigError::DivisorOutOfRange)
        );
    }

    #[test]
    fn timeout_leaves_room_for_twice_the_interval() {
        let config = CaptureConfig::new(INPUT, BUFFER_LEN, INTERVAL_MS).unwrap();
        assert_eq!(config.timeout_ms(), 250);
    }
}
