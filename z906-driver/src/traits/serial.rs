//! Byte-stream peripheral seam

/// Non-blocking byte-oriented serial port.
///
/// Implemented by the platform UART, or obtained by wrapping an
/// `embedded-io` peripheral in `IoPort` (with the `embedded-io` feature).
/// The driver holds exclusive ownership of the port; all console traffic
/// funnels through it.
pub trait SerialPort {
    /// Error type for port operations
    type Error;

    /// Write all bytes to the port.
    ///
    /// May buffer; must not wait for the peer.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Read whatever bytes are currently available, up to `buf.len()`.
    ///
    /// Must return immediately with `Ok(0)` when nothing is pending.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}
