use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;
use embedded_io::ErrorType;

/// Byte-level access to the serial line connected to the modem.
///
/// Baud rate, pins and driver installation are the platform's concern; the
/// driver only ever writes, reads and flushes.
pub trait Transport: ErrorType {
    /// Write as many bytes as possible, returning how many were accepted.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error>;

    /// Read whatever is available, waiting at most `timeout`.
    ///
    /// Returning `Ok(0)` means nothing arrived in time and is not an error.
    fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize, Self::Error>;

    /// Discard any stale inbound bytes.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Sleep plus a monotonic time source.
pub trait Clock: DelayNs {
    fn now(&mut self) -> Instant;

    fn sleep(&mut self, duration: Duration) {
        let mut ms = duration.as_millis();
        while ms > u32::MAX as u64 {
            self.delay_ms(u32::MAX);
            ms -= u32::MAX as u64;
        }
        self.delay_ms(ms as u32);
    }
}
