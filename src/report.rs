//! Ice risk report
//!
//! Bundles the daily ice table and the event timeline with a small summary,
//! and renders the result as JSON (for the dashboard) or plain text (for a
//! terminal or log file).

use crate::model::{DailyIceMap, EventSeverity, IceFormationEvent, RiskTier};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Report Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IceRiskReport {
    pub summary: IceRiskSummary,
    pub daily: DailyIceMap,
    pub events: Vec<IceFormationEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IceRiskSummary {
    pub hours_analyzed: usize,
    pub days: usize,
    pub days_with_ice: usize,
    pub total_ice_accumulation: f64,
    pub worst_tier: RiskTier,
    pub event_count: usize,
    pub extreme_event_count: usize,
    /// False when there was no series to analyze. A report with no ice and
    /// `data_available == true` means "no risk", not "no data".
    pub data_available: bool,
}

impl IceRiskSummary {
    fn from_parts(hours: usize, daily: &DailyIceMap, events: &[IceFormationEvent]) -> Self {
        IceRiskSummary {
            hours_analyzed: hours,
            days: daily.len(),
            days_with_ice: daily.values().filter(|d| d.ice_accumulation > 0.0).count(),
            total_ice_accumulation: daily.values().map(|d| d.ice_accumulation).sum(),
            worst_tier: daily
                .values()
                .map(|d| d.risk_tier)
                .max()
                .unwrap_or(RiskTier::None),
            event_count: events.len(),
            extreme_event_count: events
                .iter()
                .filter(|e| e.severity == EventSeverity::Extreme)
                .count(),
            data_available: hours > 0,
        }
    }
}

impl IceRiskReport {
    pub fn new(hours: usize, daily: DailyIceMap, events: Vec<IceFormationEvent>) -> Self {
        let summary = IceRiskSummary::from_parts(hours, &daily, &events);
        IceRiskReport {
            summary,
            daily,
            events,
        }
    }

    /// Report for a series that was never obtained.
    pub fn empty() -> Self {
        Self::new(0, DailyIceMap::new(), Vec::new())
    }

    /// Same report with at most one event per hour boundary.
    pub fn with_worst_per_transition(self) -> Self {
        let events = crate::analysis::worst_per_transition(&self.events);
        Self::new(self.summary.hours_analyzed, self.daily, events)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ============================================================================
// Text Rendering
// ============================================================================

const RULE: &str = "═══════════════════════════════════════════════════════════";

/// Human-readable rendering of a report.
pub fn render_text(report: &IceRiskReport) -> String {
    report.to_string()
}

impl fmt::Display for IceRiskReport {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(out, "{}", RULE)?;
        writeln!(out, "ICE RISK SUMMARY")?;
        writeln!(out, "{}", RULE)?;

        if !self.summary.data_available {
            writeln!(out, "No ice risk data available (empty hourly series)")?;
            return writeln!(out, "{}", RULE);
        }

        writeln!(
            out,
            "Hours analyzed:   {} across {} days",
            self.summary.hours_analyzed, self.summary.days
        )?;
        writeln!(
            out,
            "Days with ice:    {}  (total {:.2}\", worst tier {})",
            self.summary.days_with_ice,
            self.summary.total_ice_accumulation,
            self.summary.worst_tier
        )?;
        writeln!(
            out,
            "Ice events:       {}  ({} extreme)",
            self.summary.event_count, self.summary.extreme_event_count
        )?;
        writeln!(out)?;

        writeln!(out, "Daily accumulation:")?;
        for (date, day) in &self.daily {
            let range = match (day.min_temperature, day.max_temperature) {
                (Some(lo), Some(hi)) => format!("{:.0}–{:.0}°F", lo, hi),
                _ => "temp n/a".to_string(),
            };
            writeln!(
                out,
                "  {}  {:>5.2}\"  {:>2} h  {:<11} {:<8}",
                date,
                day.ice_accumulation,
                day.freezing_hours,
                range,
                day.risk_tier.to_string()
            )?;
        }

        if !self.events.is_empty() {
            writeln!(out)?;
            writeln!(out, "Ice formation events:")?;
            for event in &self.events {
                writeln!(
                    out,
                    "  {} → {}  {:.0}→{:.0}°F  {:.2}\"  {}: {}",
                    event.start_time.format("%m-%d %H:%M"),
                    event.end_time.format("%H:%M"),
                    event.start_temperature,
                    event.end_temperature,
                    event.rainfall_involved,
                    event.event_type,
                    event.risk
                )?;
            }
        }

        writeln!(out, "{}", RULE)
    }
}

// ============================================================================
// Tests
// ============================================================================
