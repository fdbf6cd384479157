/// Core data types for the ice risk analyzer.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic beyond trivial accessors, no I/O, and only the
/// chrono/serde derives needed to move these types in and out of JSON.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One hour of normalized weather data.
///
/// Units are °F for temperature and inches for the three precipitation
/// fields; the provider is responsible for conversion and timezone
/// normalization. Any numeric field may be absent (`None`) when the provider
/// had no value for that hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyReading {
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub precipitation: Option<f64>,
    #[serde(default)]
    pub rain: Option<f64>,
    #[serde(default)]
    pub snowfall: Option<f64>,
}

impl HourlyReading {
    /// Total precipitation in inches; missing or negative values read as zero.
    pub fn precipitation_in(&self) -> f64 {
        non_negative(self.precipitation)
    }

    /// Liquid rain in inches; missing or negative values read as zero.
    pub fn rain_in(&self) -> f64 {
        non_negative(self.rain)
    }

    /// Snowfall in inches; missing or negative values read as zero.
    pub fn snowfall_in(&self) -> f64 {
        non_negative(self.snowfall)
    }

    /// Calendar day this hour belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

fn non_negative(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v > 0.0 => v,
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Daily accumulation
// ---------------------------------------------------------------------------

/// Risk tier derived from a day's accumulated ice, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    None,
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::None => write!(f, "None"),
            RiskTier::Low => write!(f, "Low"),
            RiskTier::Moderate => write!(f, "Moderate"),
            RiskTier::High => write!(f, "High"),
        }
    }
}

/// Estimated ice for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyIceRecord {
    /// Inches of ice, summed from hourly contributions.
    pub ice_accumulation: f64,
    /// Hours that contributed a non-zero amount of ice.
    pub freezing_hours: u32,
    /// `None` only when no hour of the day reported a temperature.
    pub min_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
    pub risk_tier: RiskTier,
}

/// Per-day records keyed by calendar date, in chronological order.
///
/// Serializes with "YYYY-MM-DD" keys.
pub type DailyIceMap = BTreeMap<NaiveDate, DailyIceRecord>;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Kind of ice formation detected at an hour boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IceEventType {
    #[serde(rename = "Freezing Rain")]
    FreezingRain,
    #[serde(rename = "Freezing Rain (Extreme Cold)")]
    FreezingRainExtremeCold,
    #[serde(rename = "Rain Transition to Freezing (Black Ice Alert)")]
    RainToFreeze,
    #[serde(rename = "Wet Surfaces Refreezing (Pooled Water)")]
    WetSurfaceRefreeze,
    #[serde(rename = "Ice Persistence (Surfaces Remain Frozen)")]
    IcePersistence,
}

impl IceEventType {
    pub fn label(&self) -> &'static str {
        match self {
            IceEventType::FreezingRain => "Freezing Rain",
            IceEventType::FreezingRainExtremeCold => "Freezing Rain (Extreme Cold)",
            IceEventType::RainToFreeze => "Rain Transition to Freezing (Black Ice Alert)",
            IceEventType::WetSurfaceRefreeze => "Wet Surfaces Refreezing (Pooled Water)",
            IceEventType::IcePersistence => "Ice Persistence (Surfaces Remain Frozen)",
        }
    }
}

impl std::fmt::Display for IceEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Severity word leading an event's risk string, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    Moderate,
    High,
    Extreme,
}

impl std::fmt::Display for EventSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventSeverity::Moderate => write!(f, "Moderate"),
            EventSeverity::High => write!(f, "High"),
            EventSeverity::Extreme => write!(f, "Extreme"),
        }
    }
}

/// A discrete ice formation signal bounded by one hour pair.
///
/// `end_time` is always `start_time + 1 hour`. Several events may share the
/// same window; they are independent signals and are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IceFormationEvent {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub event_type: IceEventType,
    /// Inches of liquid rain implicated; may span a look-back window.
    pub rainfall_involved: f64,
    pub start_temperature: f64,
    pub end_temperature: f64,
    pub severity: EventSeverity,
    /// Severity word plus a short rationale, e.g. "Extreme — black ice formation".
    pub risk: String,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised around the analyzer: reading input, parsing it, loading
/// configuration. The analysis itself is infallible.
#[derive(Debug, PartialEq)]
pub enum IceDataError {
    /// The input could not be deserialized.
    Parse(String),
    /// A file could not be read or written.
    Io(String),
    /// Configuration is invalid or incomplete.
    Config(String),
}

impl std::fmt::Display for IceDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IceDataError::Parse(msg) => write!(f, "Parse error: {}", msg),
            IceDataError::Io(msg) => write!(f, "IO error: {}", msg),
            IceDataError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for IceDataError {}

impl From<std::io::Error> for IceDataError {
    fn from(err: std::io::Error) -> Self {
        IceDataError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for IceDataError {
    fn from(err: serde_json::Error) -> Self {
        IceDataError::Parse(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
