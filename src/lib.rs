//! Ice risk analysis for a personal weather dashboard.
//!
//! Turns a normalized hourly weather series into a per-day ice accumulation
//! table and a timeline of ice formation events (freezing rain, black ice,
//! refreezing surfaces, persisting ice).

pub mod alert;
pub mod analysis;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod report;

pub use analysis::{analyze, analyze_optional};
pub use model::{
    DailyIceMap, DailyIceRecord, EventSeverity, HourlyReading, IceDataError, IceEventType,
    IceFormationEvent, RiskTier,
};
pub use report::{IceRiskReport, IceRiskSummary};
