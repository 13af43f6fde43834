//! Free-running capture of the footswitch input.
//!
//! The ADC keeps converting into its FIFO while a DMA channel moves the
//! samples into the buffer, paced by the ADC data request. Nothing is
//! needed from the CPU until the whole buffer is filled, so other work can
//! be done meanwhile.
//!
//! The capture is a typestate: [`Idle`] can only be started and [`Running`]
//! can only be waited for. The buffer is owned by the DMA transfer while
//! running and it is handed back only after the transfer finished.

use fugit::MicrosDurationU64;
use rp2040_hal::adc::{Adc, AdcFifo, AdcPin, DmaReadTarget};
use rp2040_hal::dma::{single_buffer, Channel, CH0};
use rp2040_hal::gpio::{DynPinId, FunctionSioInput, Pin, PullNone};
use rp2040_hal::Timer;

use footswitch_control::{Capture, CaptureConfig, BUFFER_LEN};

pub type Buffer = [u8; BUFFER_LEN];
pub type DmaChannel = Channel<CH0>;
pub type InputPin = AdcPin<Pin<DynPinId, FunctionSioInput, PullNone>>;

type Transfer = single_buffer::Transfer<DmaChannel, DmaReadTarget<u8>, &'static mut Buffer>;

pub struct Idle {
    fifo: AdcFifo<'static, u8>,
    channel: DmaChannel,
    buffer: &'static mut Buffer,
    timeout: MicrosDurationU64,
}

pub struct Running {
    fifo: AdcFifo<'static, u8>,
    transfer: Transfer,
    timeout: MicrosDurationU64,
}

impl Idle {
    /// Configure the ADC for the single input and leave it paused.
    ///
    /// Each conversion is shifted down to 8 bits and pushed to the FIFO,
    /// which requests a DMA transfer as soon as it holds a sample.
    ///
    /// # Panics
    ///
    /// Panics if the buffer does not match the configured length.
    pub fn init(
        adc: &'static mut Adc,
        pin: &mut InputPin,
        channel: DmaChannel,
        buffer: &'static mut Buffer,
        config: &CaptureConfig,
    ) -> Self {
        defmt::assert_eq!(config.buffer_len(), buffer.len());

        let divider = config.divider();
        defmt::info!(
            "Capturing input={:?} samples={:?} interval_ms={:?} divider={:?}",
            config.input(),
            config.buffer_len(),
            config.interval_ms(),
            divider.as_f32()
        );

        let fifo = adc
            .build_fifo()
            .clock_divider(divider.integer, divider.fraction)
            .set_channel(pin)
            .shift_8bit()
            .enable_dma()
            .start_paused();

        Self {
            fifo,
            channel,
            buffer,
            timeout: MicrosDurationU64::millis(u64::from(config.timeout_ms())),
        }
    }

    /// Arm the DMA for a whole buffer and let the ADC run.
    pub fn start(mut self) -> Running {
        // Reading from the constant FIFO address, writing to incrementing
        // byte addresses.
        let transfer =
            single_buffer::Config::new(self.channel, self.fifo.dma_read_target(), self.buffer)
                .start();
        self.fifo.resume();
        Running {
            fifo: self.fifo,
            transfer,
            timeout: self.timeout,
        }
    }

    /// Samples of the last finished capture.
    pub fn samples(&self) -> &[u8] {
        &self.buffer[..]
    }
}

impl Running {
    /// Block until the buffer is filled, then stop the ADC and drop
    /// whatever is left in its FIFO.
    ///
    /// # Panics
    ///
    /// The transfer is guaranteed to finish once armed. If it does not do so
    /// within the configured timeout, the hardware is stuck and this panics.
    pub fn wait(mut self, timer: &Timer) -> Idle {
        let deadline = timer.get_counter() + self.timeout;
        while !self.transfer.is_done() {
            if timer.get_counter() > deadline {
                defmt::panic!(
                    "Capture did not finish within {:?} ms",
                    self.timeout.to_millis()
                );
            }
        }

        let (channel, _fifo_target, buffer) = self.transfer.wait();
        self.fifo.pause();
        self.fifo.clear();

        Idle {
            fifo: self.fifo,
            channel,
            buffer,
            timeout: self.timeout,
        }
    }
}

/// Capture engine owning the ADC FIFO and the DMA channel for the lifetime
/// of the program.
pub struct Sampler {
    idle: Option<Idle>,
    timer: Timer,
}

impl Sampler {
    pub fn new(idle: Idle, timer: Timer) -> Self {
        Self {
            idle: Some(idle),
            timer,
        }
    }

    /// Samples of the last finished capture.
    ///
    /// # Panics
    ///
    /// Panics only if a previous capture panicked while running.
    pub fn samples(&self) -> &[u8] {
        self.idle.as_ref().unwrap().samples()
    }
}

impl Capture for Sampler {
    /// # Panics
    ///
    /// The sampler is idle between captures. It panics only if a previous
    /// capture panicked while running.
    fn capture<R>(&mut self, during: impl FnOnce() -> R) -> (&[u8], R) {
        let running = self.idle.take().unwrap().start();
        let result = during();
        let idle = self.idle.insert(running.wait(&self.timer));
        (idle.samples(), result)
    }
}
