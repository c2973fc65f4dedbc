//! Time keeping.
//!
//! Time is a free running 32-bit millisecond counter that wraps after about
//! 49 days.  Deadlines are compared with wrapping arithmetic, which is correct
//! as long as the two instants are less than half the counter range apart.

/// A point in time, in milliseconds.
pub type Instant = fugit::TimerInstantU32<1000>;

/// The instant `ms` milliseconds after `start`.
pub fn after(start: Instant, ms: u32) -> Instant {
    Instant::from_ticks(start.ticks().wrapping_add(ms))
}

/// Milliseconds from `since` to `now`.
pub fn elapsed(now: Instant, since: Instant) -> u32 {
    now.ticks().wrapping_sub(since.ticks())
}

/// Has `now` reached `deadline`?
pub fn expired(now: Instant, deadline: Instant) -> bool {
    (now.ticks().wrapping_sub(deadline.ticks()) as i32) >= 0
}
