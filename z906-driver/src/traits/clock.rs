//! Monotonic time seam

/// Monotonic millisecond clock.
///
/// All driver timeouts are relative to this clock and recomputed each
/// tick; it must never go backwards but is free to jump forwards.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&mut self) -> u64;
}
