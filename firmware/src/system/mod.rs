pub mod capture;
pub mod led;
pub mod midi;

pub use rp_pico::hal;

use hal::adc::{Adc, AdcPin};
use hal::clocks::init_clocks_and_plls;
use hal::dma::DMAExt;
use hal::pac::CorePeripherals;
use hal::pac::Peripherals as DevicePeripherals;
use hal::{Clock, Sio, Timer, Watchdog};
use systick_monotonic::Systick;

use footswitch_control::{CaptureConfig, BUFFER_LEN, INPUT, INTERVAL_MS};

use capture::{Buffer, Idle, InputPin, Sampler};
use led::StatusLed;
use midi::MidiOut;

pub struct System {
    pub mono: Systick<1000>,
    pub status_led: StatusLed,
    pub sampler: Sampler,
    pub midi_out: MidiOut,
    pub timer: Timer,
}

impl System {
    /// Initialize system abstraction
    ///
    /// # Panics
    ///
    /// The system can be initialized only once. It panics otherwise. It also
    /// panics when the capture configuration is invalid.
    #[must_use]
    pub fn init(cp: CorePeripherals, mut dp: DevicePeripherals) -> Self {
        let mut watchdog = Watchdog::new(dp.WATCHDOG);
        // NOTE: This also runs the ADC from the 48 MHz USB PLL, which is the
        // reference the capture divider is calculated against.
        let clocks = init_clocks_and_plls(
            rp_pico::XOSC_CRYSTAL_FREQ,
            dp.XOSC,
            dp.CLOCKS,
            dp.PLL_SYS,
            dp.PLL_USB,
            &mut dp.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let sio = Sio::new(dp.SIO);
        let pins = rp_pico::Pins::new(
            dp.IO_BANK0,
            dp.PADS_BANK0,
            sio.gpio_bank0,
            &mut dp.RESETS,
        );

        let config = match CaptureConfig::new(INPUT, BUFFER_LEN, INTERVAL_MS) {
            Ok(config) => config,
            Err(error) => defmt::panic!("Invalid capture configuration: {:?}", error),
        };

        // Analog input N is wired to GPIO 26 + N. Taking the pin as an ADC
        // input disables its digital buffer, pulls are off already.
        let pin = match config.input() {
            0 => pins.gpio26.into_floating_input().into_dyn_pin(),
            1 => pins.gpio27.into_floating_input().into_dyn_pin(),
            2 => pins.gpio28.into_floating_input().into_dyn_pin(),
            _ => pins.voltage_monitor.into_floating_input().into_dyn_pin(),
        };
        let pin: &'static mut InputPin =
            cortex_m::singleton!(: InputPin = AdcPin::new(pin).ok().unwrap()).unwrap();
        let adc: &'static mut Adc =
            cortex_m::singleton!(: Adc = Adc::new(dp.ADC, &mut dp.RESETS)).unwrap();
        let buffer: &'static mut Buffer =
            cortex_m::singleton!(: Buffer = [0; BUFFER_LEN]).unwrap();

        // The first channel is claimed for captures and never released.
        let dma = dp.DMA.split(&mut dp.RESETS);
        let timer = Timer::new(dp.TIMER, &mut dp.RESETS, &clocks);
        let sampler = Sampler::new(Idle::init(adc, pin, dma.ch0, buffer, &config), timer);

        let midi_out = MidiOut::new(
            dp.UART0,
            pins.gpio0.into_function(),
            pins.gpio1.into_function(),
            &mut dp.RESETS,
            &clocks,
        );

        let status_led = StatusLed::new(pins.led.into_push_pull_output());
        let mono = Systick::new(cp.SYST, clocks.system_clock.freq().to_Hz());

        Self {
            mono,
            status_led,
            sampler,
            midi_out,
            timer,
        }
    }
}
