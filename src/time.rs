//! Monotonic millisecond clock readings.
//!
//! The firmware feeds `embassy_time::Instant::now().as_millis()` into
//! every tick. A `u64` millisecond counter does not wrap within any
//! realistic uptime, so elapsed time is a plain saturating subtraction.

/// Milliseconds since boot.
pub type Millis = u64;

/// Time elapsed from `earlier` to `now`, or zero if `earlier` is in the future.
#[inline]
pub const fn elapsed(now: Millis, earlier: Millis) -> Millis {
    now.saturating_sub(earlier)
}

/// Whole seconds contained in `ms` (floor).
#[inline]
pub const fn whole_secs(ms: Millis) -> u64 {
    ms / 1000
}
