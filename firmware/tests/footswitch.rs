#![no_std]
#![no_main]

use footswitch_firmware as _; // memory layout + panic handler

#[defmt_test::tests]
mod tests {
    use footswitch_control::{Bank, Classifier};
    use footswitch_firmware::system::capture::Sampler;
    use footswitch_firmware::system::System;
    use footswitch_firmware::testlib::capture_until_channel_changes;

    #[init]
    fn init() -> Sampler {
        let cp = cortex_m::Peripherals::take().unwrap();
        let dp = rp_pico::hal::pac::Peripherals::take().unwrap();
        System::init(cp, dp).sampler
    }

    #[test]
    fn all_channels_are_detected(sampler: &mut Sampler) {
        let mut classifier = Classifier::new();

        for (bank, name) in [(Bank::A, "A"), (Bank::B, "B")] {
            defmt::info!("Select bank {}", name);
            for position in 0..4 {
                defmt::info!("Press switch {}", position + 1);
                let channel = capture_until_channel_changes(sampler, &mut classifier);
                defmt::assert_eq!(classifier.bank(), bank);
                defmt::assert_eq!(classifier.position(), Some(position));
                let offset = if bank == Bank::B { 4 } else { 0 };
                defmt::assert_eq!(channel.index(), position + offset);
                defmt::info!("OK");
            }
        }
    }
}
