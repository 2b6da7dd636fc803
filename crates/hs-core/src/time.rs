//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  Each tick represents
//! `TICK_SECS × speed_multiplier` simulated seconds.  Because the multiplier
//! can change between ticks (the operator toggles 1×/2×/5×/10×), elapsed
//! seconds are accumulated by `SimClock::advance` rather than derived from
//! the tick count.
//!
//! Dwell times (loading, unloading) are counted in ticks and are therefore
//! independent of the multiplier; only translational motion scales.

use std::fmt;

/// Simulated seconds per tick at 1× speed.
pub const TICK_SECS: f64 = 0.1;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tick counter plus accumulated simulated seconds.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Ticks issued so far.
    pub current_tick: Tick,
    /// Simulated seconds since the session started.
    pub elapsed_secs: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick of `TICK_SECS × multiplier` simulated seconds.
    #[inline]
    pub fn advance(&mut self, multiplier: f64) {
        self.current_tick = self.current_tick + 1;
        self.elapsed_secs += TICK_SECS * multiplier;
    }

    /// Seconds the next `advance(multiplier)` would land on.
    #[inline]
    pub fn peek_secs(&self, multiplier: f64) -> f64 {
        self.elapsed_secs + TICK_SECS * multiplier
    }

    /// Break elapsed time into `(minutes, seconds)`, as the timer display does.
    pub fn elapsed_ms(&self) -> (u64, u32) {
        let total = self.elapsed_secs.max(0.0) as u64;
        (total / 60, (total % 60) as u32)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s) = self.elapsed_ms();
        write!(f, "{} ({:02}:{:02})", self.current_tick, m, s)
    }
}
