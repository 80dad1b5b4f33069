//! Adapter from `embedded-io` serial types to [`SerialPort`].
//!
//! HAL UART drivers usually implement the `embedded-io` traits; wrapping
//! one in [`IoPort`] plugs it straight into the driver without a
//! hand-written impl.

use embedded_io::{Read, ReadReady, Write};

use crate::traits::SerialPort;

/// Wraps any `embedded-io` reader/writer as a [`SerialPort`]
#[derive(Debug)]
pub struct IoPort<T>(pub T);

impl<T> IoPort<T> {
    /// Give the wrapped port back
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Read + ReadReady + Write> SerialPort for IoPort<T> {
    type Error = T::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.0.write_all(bytes)
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.0.read_ready()? {
            self.0.read(buf)
        } else {
            Ok(0)
        }
    }
}
