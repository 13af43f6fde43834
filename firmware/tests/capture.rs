#![no_std]
#![no_main]

use footswitch_firmware as _; // memory layout + panic handler

#[defmt_test::tests]
mod tests {
    use footswitch_control::{Capture, BUFFER_LEN, INTERVAL_MS};
    use footswitch_firmware::system::capture::Sampler;
    use footswitch_firmware::system::hal::Timer;
    use footswitch_firmware::system::System;

    // 125 MHz system clock.
    const CYCLES_PER_MS: u32 = 125_000;

    pub struct State {
        sampler: Sampler,
        timer: Timer,
    }

    #[init]
    fn init() -> State {
        let cp = cortex_m::Peripherals::take().unwrap();
        let dp = rp_pico::hal::pac::Peripherals::take().unwrap();
        let system = System::init(cp, dp);
        State {
            sampler: system.sampler,
            timer: system.timer,
        }
    }

    #[test]
    fn capture_fills_whole_buffer(state: &mut State) {
        let (samples, ()) = state.sampler.capture(|| ());
        defmt::assert_eq!(samples.len(), BUFFER_LEN);
    }

    #[test]
    fn capture_takes_configured_interval(state: &mut State) {
        let start = state.timer.get_counter();
        state.sampler.capture(|| ());
        let elapsed = (state.timer.get_counter() - start).to_millis();
        defmt::assert!(
            elapsed >= u64::from(INTERVAL_MS) - 5 && elapsed <= u64::from(INTERVAL_MS) + 5,
            "Assert failed, actual value: {:?}",
            elapsed
        );
    }

    #[test]
    fn work_during_capture_overlaps_sampling(state: &mut State) {
        let start = state.timer.get_counter();
        state
            .sampler
            .capture(|| cortex_m::asm::delay(INTERVAL_MS / 2 * CYCLES_PER_MS));
        let elapsed = (state.timer.get_counter() - start).to_millis();
        defmt::assert!(
            elapsed <= u64::from(INTERVAL_MS) + 5,
            "Assert failed, actual value: {:?}",
            elapsed
        );
    }

    #[test]
    fn buffer_is_stable_after_capture(state: &mut State) {
        let mut copy = [0; BUFFER_LEN];
        let (samples, ()) = state.sampler.capture(|| ());
        copy.copy_from_slice(samples);
        cortex_m::asm::delay(10 * CYCLES_PER_MS);
        defmt::assert_eq!(state.sampler.samples(), &copy[..]);
    }
}
