use embedded_hal::digital::{OutputPin, PinState};
use rp2040_hal::gpio::bank0::Gpio25;
use rp2040_hal::gpio::{FunctionSioOutput, Pin, PullDown};

pub type StatusPin = Pin<Gpio25, FunctionSioOutput, PullDown>;

/// The on-board LED, lit while the switch is ready and blinking on changes.
pub struct StatusLed {
    pin: StatusPin,
}

impl StatusLed {
    #[must_use]
    pub fn new(pin: StatusPin) -> Self {
        Self { pin }
    }

    pub fn set(&mut self, on: bool) {
        // Setting a SIO pin is infallible.
        self.pin.set_state(PinState::from(on)).ok();
    }
}
