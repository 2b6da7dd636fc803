//! Run configuration.
//!
//! Typically assembled by the editor layer (or loaded from JSON by an
//! application crate) and handed to the session builder.

use crate::{HsError, HsResult};

// ── SpeedMultiplier ───────────────────────────────────────────────────────────

/// Playback speed.  Scales simulated seconds per tick and walking distance
/// per tick, but not dwell ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub enum SpeedMultiplier {
    #[default]
    X1,
    X2,
    X5,
    X10,
}

impl SpeedMultiplier {
    pub const ALL: [SpeedMultiplier; 4] = [Self::X1, Self::X2, Self::X5, Self::X10];

    #[inline]
    pub fn factor(self) -> u32 {
        match self {
            SpeedMultiplier::X1  => 1,
            SpeedMultiplier::X2  => 2,
            SpeedMultiplier::X5  => 5,
            SpeedMultiplier::X10 => 10,
        }
    }

    #[inline]
    pub fn as_f32(self) -> f32 {
        self.factor() as f32
    }
}

impl TryFrom<u32> for SpeedMultiplier {
    type Error = HsError;
    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|m| m.factor() == n)
            .ok_or_else(|| HsError::Config(format!("speed multiplier must be 1, 2, 5 or 10, got {n}")))
    }
}

impl From<SpeedMultiplier> for u32 {
    fn from(m: SpeedMultiplier) -> u32 {
        m.factor()
    }
}

impl std::fmt::Display for SpeedMultiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.factor())
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Parameters of one simulation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Number of manipulants, 1–10.
    pub manipulant_count: u32,

    /// Walking speed setting, 1.0–8.0.
    pub walking_speed: f32,

    /// Initial playback speed.  May be changed while the session runs.
    pub speed_multiplier: SpeedMultiplier,

    /// Hard ceiling on simulated time.  Default: 300 s.
    pub max_sim_secs: f64,

    /// Floor units walked per tick per unit of `walking_speed`.  Default: 2.0.
    pub speed_scale: f32,

    /// Floor units per metre, used when exporting distances.  Default: 10.0.
    pub units_per_metre: f32,

    /// Ticks spent loading and again unloading.  Default: 30.
    pub dwell_ticks: u32,

    /// An agent within this many units of a waypoint has reached it.
    /// Default: 3.0.
    pub arrival_epsilon: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            manipulant_count: 2,
            walking_speed:    4.0,
            speed_multiplier: SpeedMultiplier::X1,
            max_sim_secs:     300.0,
            speed_scale:      2.0,
            units_per_metre:  10.0,
            dwell_ticks:      30,
            arrival_epsilon:  3.0,
        }
    }
}

impl RunConfig {
    pub const MAX_MANIPULANTS: u32 = 10;
    pub const MIN_WALKING_SPEED: f32 = 1.0;
    pub const MAX_WALKING_SPEED: f32 = 8.0;

    /// Reject values the editor would never produce.
    pub fn validate(&self) -> HsResult<()> {
        if !(1..=Self::MAX_MANIPULANTS).contains(&self.manipulant_count) {
            return Err(HsError::Config(format!(
                "manipulant count must be 1–{}, got {}",
                Self::MAX_MANIPULANTS,
                self.manipulant_count
            )));
        }
        if !(Self::MIN_WALKING_SPEED..=Self::MAX_WALKING_SPEED).contains(&self.walking_speed) {
            return Err(HsError::Config(format!(
                "walking speed must be {:.1}–{:.1}, got {}",
                Self::MIN_WALKING_SPEED,
                Self::MAX_WALKING_SPEED,
                self.walking_speed
            )));
        }
        if self.max_sim_secs.is_nan() || self.max_sim_secs <= 0.0 {
            return Err(HsError::Config(format!(
                "max_sim_secs must be positive, got {}",
                self.max_sim_secs
            )));
        }
        if !positive(self.speed_scale) || !positive(self.units_per_metre) {
            return Err(HsError::Config(
                "speed_scale and units_per_metre must be positive".into(),
            ));
        }
        if self.arrival_epsilon.is_nan() || self.arrival_epsilon < 0.0 {
            return Err(HsError::Config("arrival_epsilon must not be negative".into()));
        }
        Ok(())
    }

    /// Floor units walked per tick at 1× speed.
    #[inline]
    pub fn base_speed(&self) -> f32 {
        self.walking_speed * self.speed_scale
    }

    /// Convert a floor-unit distance to metres.
    #[inline]
    pub fn to_metres(&self, units: f32) -> f32 {
        units / self.units_per_metre
    }
}

#[inline]
fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}
