//! A single cycle from captured samples to a sent command.

use crate::capture::Capture;
use crate::classifier::{Channel, Classifier};
use crate::command::CommandKind;
use crate::log;
use crate::transport::Transport;

pub struct Pipeline<C, T> {
    capture: C,
    transport: T,
    classifier: Classifier,
    command_kind: CommandKind,
}

impl<C: Capture, T: Transport> Pipeline<C, T> {
    pub fn new(capture: C, transport: T, command_kind: CommandKind) -> Self {
        Self {
            capture,
            transport,
            classifier: Classifier::new(),
            command_kind,
        }
    }

    /// Capture, classify, and send a command if the channel changed.
    ///
    /// The transport is polled while the capture runs. The newly selected
    /// channel is returned even if the transport was not connected, the
    /// change is consumed either way.
    pub fn cycle(&mut self) -> Option<Channel> {
        let transport = &mut self.transport;
        let (samples, ()) = self.capture.capture(|| transport.poll());
        let selected = self.classifier.detect(samples);

        let connected = self.transport.is_connected();
        if let Some(channel) = selected {
            if connected {
                self.send(channel);
            } else {
                log::warning!("Transport not connected, dropping channel={:?}", channel);
            }
        }
        if connected {
            self.transport.flush();
        }

        selected
    }

    fn send(&mut self, channel: Channel) {
        let command = self.command_kind.command(channel);
        let bytes = command.encode();
        let written = self.transport.write(&bytes);
        if written == bytes.len() {
            log::info!("Sent command={:?}", command);
        } else {
            log::warning!(
                "Command={:?} was cut short, written={:?}",
                command,
                written
            );
        }
    }

    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
