//! Encoding of the selected channel into a MIDI message.

use heapless::Vec;

use crate::classifier::Channel;

/// Longest encoded command, the mode change system exclusive message.
pub const MAX_COMMAND_LEN: usize = 10;

const SYSEX_START: u8 = 0xF0;
const SYSEX_END: u8 = 0xF7;
// Korg manufacturer ID, channel 0, and the Adio model header.
const ADIO_HEADER: [u8; 5] = [0x42, 0x30, 0x00, 0x01, 0x41];
const MODE_CHANGE: u8 = 0x4E;
const PROGRAM_CHANGE: u8 = 0xC0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    User,
    Manual,
}

impl Mode {
    fn to_byte(self) -> u8 {
        match self {
            Self::User => 0,
            Self::Manual => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Switch the amplifier to the given program of the given mode.
    ///
    /// ```text
    /// F0,42,30,00,01,41  Exclusive header
    /// 4E                 Function code
    /// 0000 00mm          User(0)/Manual(2)
    /// 0000 0ppp          Program number
    /// F7                 End of exclusive
    /// ```
    ModeChange { mode: Mode, program: u8 },
    /// Plain program change, for any MIDI device.
    ProgramChange { channel: u8, program: u8 },
}

impl Command {
    #[must_use]
    pub fn encode(&self) -> Vec<u8, MAX_COMMAND_LEN> {
        let encoded = match *self {
            Self::ModeChange { mode, program } => {
                let [a, b, c, d, e] = ADIO_HEADER;
                Vec::from_slice(&[
                    SYSEX_START,
                    a,
                    b,
                    c,
                    d,
                    e,
                    MODE_CHANGE,
                    mode.to_byte(),
                    program & 0x07,
                    SYSEX_END,
                ])
            }
            Self::ProgramChange { channel, program } => {
                Vec::from_slice(&[PROGRAM_CHANGE | (channel & 0x0F), program & 0x7F])
            }
        };
        // Both messages fit by the definition of the capacity.
        encoded.unwrap_or_default()
    }
}

/// Which command should a newly selected channel produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    ModeChange(Mode),
    /// Carries the MIDI channel the program change is sent on.
    ProgramChange(u8),
}

impl Default for CommandKind {
    fn default() -> Self {
        Self::ModeChange(Mode::User)
    }
}

impl CommandKind {
    #[must_use]
    pub fn command(self, channel: Channel) -> Command {
        match self {
            Self::ModeChange(mode) => Command::ModeChange {
                mode,
                program: channel.index(),
            },
            Self::ProgramChange(midi_channel) => Command::ProgramChange {
                channel: midi_channel,
                program: channel.index(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::classifier::Classifier;

    fn channel(index: u8) -> Channel {
        let mut classifier = Classifier::new();
        let bank = if index >= 4 { 242 } else { 212 };
        let position = [173, 144, 98, 61][usize::from(index % 4)];
        classifier.classify(&[bank]);
        classifier.classify(&[position]);
        classifier.channel().unwrap()
    }

    #[test]
    fn mode_change_carries_program_in_user_mode() {
        let command = CommandKind::default().command(channel(5));
        assert_eq!(
            command.encode().as_slice(),
            &[0xF0, 0x42, 0x30, 0x00, 0x01, 0x41, 0x4E, 0x00, 0x05, 0xF7]
        );
    }

    #[test]
    fn mode_change_in_manual_mode() {
        let command = CommandKind::ModeChange(Mode::Manual).command(channel(0));
        assert_eq!(
            command.encode().as_slice(),
            &[0xF0, 0x42, 0x30, 0x00, 0x01, 0x41, 0x4E, 0x02, 0x00, 0xF7]
        );
    }

    #[test]
    fn mode_change_fills_the_whole_capacity() {
        let command = CommandKind::default().command(channel(7));
        assert_eq!(command.encode().len(), MAX_COMMAND_LEN);
    }

    #[test]
    fn program_change_is_sent_on_given_midi_channel() {
        let command = CommandKind::ProgramChange(9).command(channel(3));
        assert_eq!(command.encode().as_slice(), &[0xC9, 0x03]);
    }

    #[test]
    fn program_change_masks_out_of_range_values() {
        let command = Command::ProgramChange {
            channel: 0x1F,
            program: 0xFF,
        };
        assert_eq!(command.encode().as_slice(), &[0xCF, 0x7F]);
    }
}
