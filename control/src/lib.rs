//! Turning footswitch voltage into channel selection, and selection into
//! device commands.
//!
//! This crate is hardware independent. The firmware provides the capture of
//! raw samples and the transport carrying commands out, everything in
//! between lives here so it can be tested on the host.
//!
//! ```text
//!   [ Capture ] --(samples)--> [ Classifier ] --(Channel)--> [ CommandKind ]
//!        A                                                         |
//!        | (poll while sampling)                          (encoded bytes)
//!        |                                                         V
//!   [ Transport ] <------------------------------------------------+
//! ```
//!
//! [`Pipeline`] ties these together into a single capture cycle.

#![cfg_attr(not(test), no_std)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

#[cfg(test)]
#[macro_use]
extern crate approx;

mod capture;
mod classifier;
mod command;
mod config;
mod log;
mod pipeline;
mod threshold;
mod transport;

pub use capture::Capture;
pub use classifier::{Channel, Classifier, Levels};
pub use command::{Command, CommandKind, Mode, MAX_COMMAND_LEN};
pub use config::{CaptureConfig, ClockDivider, ConfigError};
pub use config::{BUFFER_LEN, INPUT, INTERVAL_MS, REFERENCE_CLOCK_HZ};
pub use pipeline::Pipeline;
pub use threshold::{match_band, Band, Bank, EPSILON, THRESHOLDS};
pub use transport::Transport;
