/// Source of captured samples.
///
/// Sampling runs in the background while `during` executes, which lets the
/// caller service other peripherals on every cycle at no extra cost. The
/// returned buffer is fully populated and stable until the next capture.
///
/// Starting and waiting are a single call, so a capture can be neither
/// started twice nor awaited without being started.
pub trait Capture {
    fn capture<R>(&mut self, during: impl FnOnce() -> R) -> (&[u8], R);
}
