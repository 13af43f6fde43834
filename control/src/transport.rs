/// Outbound link to the controlled device.
///
/// It receives already encoded commands as opaque bytes. Framing, retries,
/// and delivery confirmation are all up to the implementation.
pub trait Transport {
    /// Service the link. Called while a capture is running.
    fn poll(&mut self);

    fn is_connected(&self) -> bool;

    /// Returns how many bytes were accepted.
    fn write(&mut self, bytes: &[u8]) -> usize;

    fn flush(&mut self);
}
