//! Ice risk thresholds and the pure classifiers built on them.
//!
//! Every number the analyzer compares against lives here so the daily
//! accumulator and the event detector cannot drift apart. None of these
//! are configurable at runtime.

use crate::model::{EventSeverity, RiskTier};

// ---------------------------------------------------------------------------
// Temperature bands (°F)
// ---------------------------------------------------------------------------

/// Water freezes on surfaces at or below this temperature.
pub const FREEZING_POINT_F: f64 = 32.0;

/// At or below this temperature rain is treated as extreme-cold freezing rain.
/// Physically unusual; kept because the dashboard has always flagged it.
pub const EXTREME_COLD_F: f64 = 20.0;

/// Upper bound of the 0.85 efficiency band.
pub const HARD_FREEZE_F: f64 = 28.0;

// ---------------------------------------------------------------------------
// Accretion efficiency
// ---------------------------------------------------------------------------

pub const EFFICIENCY_EXTREME_COLD: f64 = 0.90;
pub const EFFICIENCY_HARD_FREEZE: f64 = 0.85;
pub const EFFICIENCY_FREEZING_RAIN: f64 = 0.80;

/// Fraction of non-snow precipitation that accretes as ice at `temperature_f`.
///
/// Only meaningful below freezing; the caller checks that first.
///
///   t <= 20        → 0.90
///   20 < t <= 28   → 0.85
///   28 < t < 32    → 0.80
pub fn efficiency_for(temperature_f: f64) -> f64 {
    if temperature_f <= EXTREME_COLD_F {
        EFFICIENCY_EXTREME_COLD
    } else if temperature_f <= HARD_FREEZE_F {
        EFFICIENCY_HARD_FREEZE
    } else {
        EFFICIENCY_FREEZING_RAIN
    }
}

// ---------------------------------------------------------------------------
// Daily risk tiers (inches of ice)
// ---------------------------------------------------------------------------

pub const HIGH_ICE_IN: f64 = 0.25;
pub const MODERATE_ICE_IN: f64 = 0.10;

/// Maps a day's final accumulated ice to its risk tier.
pub fn classify_accumulation(ice_in: f64) -> RiskTier {
    if ice_in >= HIGH_ICE_IN {
        RiskTier::High
    } else if ice_in >= MODERATE_ICE_IN {
        RiskTier::Moderate
    } else if ice_in > 0.0 {
        RiskTier::Low
    } else {
        RiskTier::None
    }
}

// ---------------------------------------------------------------------------
// Event detection
// ---------------------------------------------------------------------------

/// Hours of rain inspected when surfaces start to refreeze.
pub const REFREEZE_LOOKBACK_HOURS: usize = 12;

/// Hours of above-freezing rain inspected for ice persistence.
pub const PERSISTENCE_LOOKBACK_HOURS: usize = 24;

/// Look-back rain must strictly exceed this many inches to matter.
pub const WET_SURFACE_MIN_IN: f64 = 0.05;

/// Refreeze grading: at least this much rain plus a hard freeze is extreme.
pub const MAJOR_REFREEZE_IN: f64 = 0.25;

/// Refreeze grading: at least this much rain is high.
pub const WIDESPREAD_REFREEZE_IN: f64 = 0.10;

/// Severity and rationale for a wet-surface refreeze.
pub fn grade_refreeze(lookback_rain_in: f64, post_freeze_temp_f: f64) -> (EventSeverity, &'static str) {
    if lookback_rain_in >= MAJOR_REFREEZE_IN && post_freeze_temp_f <= HARD_FREEZE_F {
        (EventSeverity::Extreme, "major black ice event")
    } else if lookback_rain_in >= WIDESPREAD_REFREEZE_IN {
        (EventSeverity::High, "widespread black ice")
    } else {
        (EventSeverity::Moderate, "black ice likely")
    }
}

/// Joins a severity and rationale the way the dashboard displays them.
pub fn risk_label(severity: EventSeverity, rationale: &str) -> String {
    format!("{} — {}", severity, rationale)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
