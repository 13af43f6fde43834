use fugit::RateExtU32;
use rp2040_hal::clocks::ClocksManager;
use rp2040_hal::gpio::bank0::{Gpio0, Gpio1};
use rp2040_hal::gpio::{FunctionUart, Pin, PullDown};
use rp2040_hal::pac::{RESETS, UART0};
use rp2040_hal::uart::{DataBits, Enabled, StopBits, UartConfig, UartPeripheral};
use rp2040_hal::Clock;

use footswitch_control::Transport;

const BAUD_RATE: u32 = 31_250;

pub type TxPin = Pin<Gpio0, FunctionUart, PullDown>;
pub type RxPin = Pin<Gpio1, FunctionUart, PullDown>;

type Uart = UartPeripheral<Enabled, UART0, (TxPin, RxPin)>;

/// DIN MIDI output on UART0.
///
/// There is no handshake on a MIDI cable, so it is always considered
/// connected.
pub struct MidiOut {
    uart: Uart,
}

impl MidiOut {
    /// # Panics
    ///
    /// Panics if the peripheral clock cannot produce the MIDI baud rate.
    pub fn new(
        uart: UART0,
        tx: TxPin,
        rx: RxPin,
        resets: &mut RESETS,
        clocks: &ClocksManager,
    ) -> Self {
        let config = UartConfig::new(BAUD_RATE.Hz(), DataBits::Eight, None, StopBits::One);
        let uart = UartPeripheral::new(uart, (tx, rx), resets)
            .enable(config, clocks.peripheral_clock.freq())
            .unwrap();
        Self { uart }
    }
}

impl Transport for MidiOut {
    fn poll(&mut self) {
        // Nothing is received, incoming bytes are left to overflow.
    }

    fn is_connected(&self) -> bool {
        true
    }

    fn write(&mut self, bytes: &[u8]) -> usize {
        self.uart.write_full_blocking(bytes);
        bytes.len()
    }

    fn flush(&mut self) {
        while self.uart.uart_is_busy() {}
    }
}
