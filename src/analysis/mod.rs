/// Ice risk analysis over a normalized hourly weather series.
///
/// The analysis is pure and synchronous: no I/O, no shared state, one
/// forward pass per submodule. Calls on independent series may run in
/// parallel.
///
/// Submodules:
/// - `accumulation` — per-day ice accumulation and risk tier.
/// - `events`       — discrete ice formation events at hour boundaries.
/// - `window`       — sliding-window running sums used by the detector.

pub mod accumulation;
pub mod events;
pub mod window;

pub use accumulation::{accumulate_daily, ice_contribution};
pub use events::{detect_events, worst_per_transition};

use crate::logging::{self, Component};
use crate::model::HourlyReading;
use crate::report::IceRiskReport;

/// Runs both analysis passes over `series`.
///
/// An empty series is not an error: it produces an empty report whose
/// summary marks the data as unavailable.
pub fn analyze(series: &[HourlyReading]) -> IceRiskReport {
    warn_if_out_of_order(series);

    let daily = accumulate_daily(series);
    let events = detect_events(series);
    let report = IceRiskReport::new(series.len(), daily, events);

    logging::log_analysis_summary(
        report.summary.hours_analyzed,
        report.summary.days,
        report.summary.event_count,
        report.summary.extreme_event_count,
    );
    report
}

/// Same as `analyze`, for callers whose series may be absent altogether.
pub fn analyze_optional(series: Option<&[HourlyReading]>) -> IceRiskReport {
    match series {
        Some(series) => analyze(series),
        None => {
            logging::warn(Component::System, None, "No hourly series supplied");
            IceRiskReport::empty()
        }
    }
}

/// The analysis assumes chronological input but does not reorder it.
fn warn_if_out_of_order(series: &[HourlyReading]) {
    if let Some(pair) = series.windows(2).find(|p| p[1].timestamp <= p[0].timestamp) {
        logging::warn(
            Component::System,
            Some(&pair[1].timestamp.to_string()),
            "hourly series is not strictly increasing; results assume chronological order",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn freezing_rain_series() -> Vec<HourlyReading> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 16)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        [(34.0, 0.2), (30.0, 0.3), (29.0, 0.0)]
            .iter()
            .enumerate()
            .map(|(i, (temp, rain))| HourlyReading {
                timestamp: start + Duration::hours(i as i64),
                temperature: Some(*temp),
                precipitation: Some(*rain),
                rain: Some(*rain),
                snowfall: None,
            })
            .collect()
    }

    #[test]
    fn test_analyze_runs_both_passes() {
        let report = analyze(&freezing_rain_series());
        assert_eq!(report.daily.len(), 1);
        assert!(!report.events.is_empty());
        assert!(report.summary.data_available);
        assert_eq!(report.summary.hours_analyzed, 3);
    }

    #[test]
    fn test_analyze_optional_none_is_empty_report() {
        let report = analyze_optional(None);
        assert!(report.daily.is_empty());
        assert!(report.events.is_empty());
        assert!(!report.summary.data_available);
    }

    #[test]
    fn test_analyze_optional_some_matches_analyze() {
        let series = freezing_rain_series();
        assert_eq!(analyze_optional(Some(series.as_slice())), analyze(&series));
    }
}
