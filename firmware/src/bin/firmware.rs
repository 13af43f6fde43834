#![no_main]
#![no_std]

use footswitch_firmware as _; // global logger + panicking-behavior

#[rtic::app(device = rp_pico::hal::pac, peripherals = true, dispatchers = [TIMER_IRQ_1])]
mod app {
    use fugit::ExtU64;
    use systick_monotonic::Systick;

    use footswitch_control::{CommandKind, Mode, Pipeline};
    use footswitch_firmware::system::capture::Sampler;
    use footswitch_firmware::system::led::StatusLed;
    use footswitch_firmware::system::midi::MidiOut;
    use footswitch_firmware::system::System;

    const COMMAND_KIND: CommandKind = CommandKind::ModeChange(Mode::User);

    #[monotonic(binds = SysTick, default = true)]
    type Mono = Systick<1000>; // 1 kHz / 1 ms granularity

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        status_led: StatusLed,
        pipeline: Pipeline<Sampler, MidiOut>,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::info!("INIT");

        let system = System::init(cx.core, cx.device);
        let mono = system.mono;
        let status_led = system.status_led;
        let pipeline = Pipeline::new(system.sampler, system.midi_out, COMMAND_KIND);

        // Stay dark for a moment to show the board was restarted.
        blink::spawn(false, 250).unwrap();

        (
            Shared {},
            Local {
                status_led,
                pipeline,
            },
            init::Monotonics(mono),
        )
    }

    #[idle(local = [pipeline])]
    fn idle(cx: idle::Context) -> ! {
        let pipeline = cx.local.pipeline;
        loop {
            if let Some(channel) = pipeline.cycle() {
                defmt::info!("Footswitch channel={:?}", channel.index());
                blink::spawn(false, 50).ok();
            }
        }
    }

    /// Keep the LED dark for the given duration, then light it again.
    #[task(local = [status_led])]
    fn blink(cx: blink::Context, on: bool, duration_ms: u64) {
        cx.local.status_led.set(on);
        if !on {
            blink::spawn_after(duration_ms.millis(), true, 0).ok();
        }
    }
}
