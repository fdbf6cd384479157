/// Ice formation event detection.
///
/// Scans every hour boundary `(hour[i], hour[i + 1])` once, front to back,
/// and evaluates four independent rules in a fixed order:
///
///   A. freezing rain falling at or below 32°F
///   B. rain above freezing followed by a drop to freezing (black ice)
///   C. freeze onset after rain in the last 12 hours (pooled water refreezing)
///   D. first sustained sub-freezing boundary after warm rain in the last
///      24 hours (ice persisting on surfaces)
///
/// Any number of rules may fire on the same boundary. Each firing becomes
/// its own event; nothing is merged or deduplicated. Boundaries where either
/// hour lacks a temperature are skipped.

use crate::alert::thresholds::{
    EXTREME_COLD_F, FREEZING_POINT_F, PERSISTENCE_LOOKBACK_HOURS, REFREEZE_LOOKBACK_HOURS,
    WET_SURFACE_MIN_IN, grade_refreeze, risk_label,
};
use crate::analysis::window::RollingSum;
use crate::logging::{self, Component};
use crate::model::{EventSeverity, HourlyReading, IceEventType, IceFormationEvent};
use chrono::{Duration, NaiveDateTime};

// ---------------------------------------------------------------------------
// Boundary
// ---------------------------------------------------------------------------

/// The facts every rule looks at for one hour pair.
struct Boundary {
    start: NaiveDateTime,
    rain: f64,
    start_temp: f64,
    end_temp: f64,
    /// Temperature of the hour before `start`, if there is one.
    previous_temp: Option<f64>,
    /// Rain over the 12 hours ending at `start`, inclusive.
    recent_rain: f64,
    /// Rain that fell above freezing over the 24 hours before `start`.
    recent_warm_rain: f64,
}

impl Boundary {
    fn freeze_onset(&self) -> bool {
        self.start_temp > FREEZING_POINT_F && self.end_temp <= FREEZING_POINT_F
    }

    fn event(
        &self,
        event_type: IceEventType,
        rainfall_involved: f64,
        severity: EventSeverity,
        rationale: &str,
    ) -> IceFormationEvent {
        IceFormationEvent {
            start_time: self.start,
            end_time: self.start + Duration::hours(1),
            event_type,
            rainfall_involved,
            start_temperature: self.start_temp,
            end_temperature: self.end_temp,
            severity,
            risk: risk_label(severity, rationale),
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Rule A: rain falling onto surfaces already at or below freezing.
fn freezing_rain(b: &Boundary) -> Option<IceFormationEvent> {
    if b.rain <= 0.0 || b.start_temp > FREEZING_POINT_F {
        return None;
    }
    Some(if b.start_temp <= EXTREME_COLD_F {
        b.event(
            IceEventType::FreezingRainExtremeCold,
            b.rain,
            EventSeverity::Extreme,
            "severe icing conditions",
        )
    } else {
        b.event(
            IceEventType::FreezingRain,
            b.rain,
            EventSeverity::Extreme,
            "immediate ice accumulation",
        )
    })
}

/// Rule B: it was raining when the temperature dropped to freezing.
fn rain_to_freeze(b: &Boundary) -> Option<IceFormationEvent> {
    if b.rain <= 0.0 || !b.freeze_onset() {
        return None;
    }
    Some(b.event(
        IceEventType::RainToFreeze,
        b.rain,
        EventSeverity::Extreme,
        "black ice formation",
    ))
}

/// Rule C: freeze onset with enough recent rain to leave surfaces wet.
fn wet_surface_refreeze(b: &Boundary) -> Option<IceFormationEvent> {
    if !b.freeze_onset() || b.recent_rain <= WET_SURFACE_MIN_IN {
        return None;
    }
    let (severity, rationale) = grade_refreeze(b.recent_rain, b.end_temp);
    Some(b.event(
        IceEventType::WetSurfaceRefreeze,
        b.recent_rain,
        severity,
        rationale,
    ))
}

/// Rule D: the first hour of a sustained freeze after warm rain.
///
/// Only the boundary right after the preceding above-freezing hour fires,
/// so a long freeze yields one event instead of one per hour.
fn ice_persistence(b: &Boundary) -> Option<IceFormationEvent> {
    let sustained_freeze = b.start_temp <= FREEZING_POINT_F && b.end_temp <= FREEZING_POINT_F;
    let first_frozen_hour = b.previous_temp.is_some_and(|t| t > FREEZING_POINT_F);
    if !sustained_freeze || !first_frozen_hour || b.recent_warm_rain <= WET_SURFACE_MIN_IN {
        return None;
    }
    Some(b.event(
        IceEventType::IcePersistence,
        b.recent_warm_rain,
        EventSeverity::Moderate,
        "ice remains on surfaces",
    ))
}

/// Rain counted toward persistence: only what fell while above freezing.
fn warm_rain(reading: &HourlyReading) -> f64 {
    match reading.temperature {
        Some(t) if t > FREEZING_POINT_F => reading.rain_in(),
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Detector
// ---------------------------------------------------------------------------

/// Returns every ice formation event in `series`, in scan order.
///
/// Within one boundary the order is A, B, C, D. The series must be
/// chronological; it is never modified.
pub fn detect_events(series: &[HourlyReading]) -> Vec<IceFormationEvent> {
    let mut events = Vec::new();
    let mut recent_rain = RollingSum::new(REFREEZE_LOOKBACK_HOURS);
    let mut recent_warm_rain = RollingSum::new(PERSISTENCE_LOOKBACK_HOURS);

    for (i, pair) in series.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        recent_rain.push(current.rain_in());
        // Persistence looks at the 24 hours before `current`, not including it.
        let prior_warm_rain = recent_warm_rain.total();
        recent_warm_rain.push(warm_rain(current));

        let (Some(start_temp), Some(end_temp)) = (current.temperature, next.temperature) else {
            continue;
        };
        let boundary = Boundary {
            start: current.timestamp,
            rain: current.rain_in(),
            start_temp,
            end_temp,
            previous_temp: i.checked_sub(1).and_then(|p| series[p].temperature),
            recent_rain: recent_rain.total(),
            recent_warm_rain: prior_warm_rain,
        };

        let fired = [
            freezing_rain(&boundary),
            rain_to_freeze(&boundary),
            wet_surface_refreeze(&boundary),
            ice_persistence(&boundary),
        ];
        for event in fired.into_iter().flatten() {
            logging::debug(
                Component::Detector,
                Some(&event.start_time.to_string()),
                &format!("{}: {}", event.event_type, event.risk),
            );
            events.push(event);
        }
    }

    events
}

/// Collapses the event list to the single worst event per hour boundary.
///
/// Ties keep the earliest-evaluated rule. The detector itself never does
/// this; callers that want one verdict per hour opt in here.
pub fn worst_per_transition(events: &[IceFormationEvent]) -> Vec<IceFormationEvent> {
    events
        .chunk_by(|a, b| a.start_time == b.start_time)
        .filter_map(|group| {
            group
                .iter()
                .reduce(|best, e| if e.severity > best.severity { e } else { best })
        })
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const EPS: f64 = 1e-9;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 16)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    /// Builds a contiguous hourly series from (temperature, rain) pairs.
    fn series(hours: &[(f64, f64)]) -> Vec<HourlyReading> {
        hours
            .iter()
            .enumerate()
            .map(|(i, (temp, rain))| HourlyReading {
                timestamp: start() + Duration::hours(i as i64),
                temperature: Some(*temp),
                precipitation: Some(*rain),
                rain: Some(*rain),
                snowfall: Some(0.0),
            })
            .collect()
    }

    fn types(events: &[IceFormationEvent]) -> Vec<IceEventType> {
        events.iter().map(|e| e.event_type).collect()
    }

    // --- Rule A -------------------------------------------------------------

    #[test]
    fn test_rain_at_freezing_is_freezing_rain() {
        let events = detect_events(&series(&[(31.0, 0.1), (31.0, 0.0)]));
        assert_eq!(types(&events), vec![IceEventType::FreezingRain]);
        assert_eq!(events[0].risk, "Extreme — immediate ice accumulation");
        assert!((events[0].rainfall_involved - 0.1).abs() < EPS);
    }

    #[test]
    fn test_rain_exactly_at_32_is_freezing_rain() {
        let events = detect_events(&series(&[(32.0, 0.05), (33.0, 0.0)]));
        assert_eq!(types(&events), vec![IceEventType::FreezingRain]);
    }

    #[test]
    fn test_rain_at_20_is_extreme_cold_variant() {
        let events = detect_events(&series(&[(20.0, 0.05), (19.0, 0.0)]));
        assert_eq!(types(&events), vec![IceEventType::FreezingRainExtremeCold]);
        assert_eq!(events[0].risk, "Extreme — severe icing conditions");
    }

    #[test]
    fn test_last_hour_has_no_boundary() {
        let events = detect_events(&series(&[(40.0, 0.0), (30.0, 0.3)]));
        assert!(
            events.is_empty(),
            "rain in the final hour has no following hour to bound an event"
        );
    }

    // --- Rule B and C together ----------------------------------------------

    #[test]
    fn test_rain_then_freeze_fires_transition_and_refreeze() {
        let events = detect_events(&series(&[(34.0, 0.2), (30.0, 0.0)]));
        assert_eq!(
            types(&events),
            vec![IceEventType::RainToFreeze, IceEventType::WetSurfaceRefreeze],
            "B and C are independent signals and both fire, in rule order"
        );
        assert_eq!(events[0].risk, "Extreme — black ice formation");
        assert_eq!(events[1].risk, "High — widespread black ice");
        assert_eq!(events[0].end_time, events[0].start_time + Duration::hours(1));
    }

    // --- Rule C -------------------------------------------------------------

    #[test]
    fn test_refreeze_window_is_twelve_hours() {
        // 0.3" falls 12 hours before the last warm hour: just outside the window.
        let mut hours = vec![(40.0, 0.3)];
        hours.extend(std::iter::repeat_n((40.0, 0.0), 12));
        hours.push((25.0, 0.0));
        let events = detect_events(&series(&hours));
        assert!(events.is_empty(), "rain 12+ hours back must not count: {:?}", events);

        // One hour later it is inside.
        let mut hours = vec![(40.0, 0.3)];
        hours.extend(std::iter::repeat_n((40.0, 0.0), 11));
        hours.push((25.0, 0.0));
        let events = detect_events(&series(&hours));
        assert_eq!(types(&events), vec![IceEventType::WetSurfaceRefreeze]);
        assert_eq!(events[0].risk, "Extreme — major black ice event");
        assert!((events[0].rainfall_involved - 0.3).abs() < EPS);
    }

    #[test]
    fn test_refreeze_needs_more_than_five_hundredths() {
        let events = detect_events(&series(&[(38.0, 0.05), (36.0, 0.0), (31.0, 0.0)]));
        assert!(events.is_empty());
        let events = detect_events(&series(&[(38.0, 0.06), (36.0, 0.0), (31.0, 0.0)]));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].risk, "Moderate — black ice likely");
    }

    // --- Rule D -------------------------------------------------------------

    #[test]
    fn test_persistence_fires_once_at_start_of_freeze() {
        let hours = [
            (36.0, 0.1),
            (35.0, 0.0),
            (31.0, 0.0),
            (30.0, 0.0),
            (29.0, 0.0),
            (28.0, 0.0),
        ];
        let events = detect_events(&series(&hours));
        assert_eq!(
            types(&events),
            vec![IceEventType::WetSurfaceRefreeze, IceEventType::IcePersistence]
        );
        let persistence = &events[1];
        assert_eq!(persistence.start_time, start() + Duration::hours(2));
        assert_eq!(persistence.risk, "Moderate — ice remains on surfaces");
        assert!((persistence.rainfall_involved - 0.1).abs() < EPS);
    }

    #[test]
    fn test_persistence_ignores_rain_that_fell_below_freezing() {
        let hours = [(30.0, 0.2), (33.0, 0.0), (31.0, 0.0), (30.0, 0.0)];
        let events = detect_events(&series(&hours));
        assert!(
            !types(&events).contains(&IceEventType::IcePersistence),
            "only above-freezing rain leaves water to refreeze: {:?}",
            types(&events)
        );
    }

    #[test]
    fn test_persistence_window_reaches_back_24_hours() {
        // Warm rain in hour 0; the freeze starts at hour 24, exactly 24 hours later.
        let mut hours = vec![(40.0, 0.1)];
        hours.extend(std::iter::repeat_n((40.0, 0.0), 23));
        hours.extend([(30.0, 0.0), (30.0, 0.0)]);
        let events = detect_events(&series(&hours));
        assert_eq!(types(&events), vec![IceEventType::IcePersistence]);
        assert_eq!(events[0].start_time, start() + Duration::hours(24));
        assert!((events[0].rainfall_involved - 0.1).abs() < EPS);

        // One hour further back it has left the window.
        let mut hours = vec![(40.0, 0.1)];
        hours.extend(std::iter::repeat_n((40.0, 0.0), 24));
        hours.extend([(30.0, 0.0), (30.0, 0.0)]);
        let events = detect_events(&series(&hours));
        assert!(events.is_empty(), "rain 25 hours back must not count: {:?}", events);
    }

    // --- Missing data -------------------------------------------------------

    #[test]
    fn test_boundary_with_missing_temperature_is_skipped() {
        let mut s = series(&[(34.0, 0.2), (30.0, 0.0)]);
        s[1].temperature = None;
        assert!(detect_events(&s).is_empty());
    }

    #[test]
    fn test_empty_and_single_hour_series() {
        assert!(detect_events(&[]).is_empty());
        assert!(detect_events(&series(&[(30.0, 0.5)])).is_empty());
    }

    // --- worst_per_transition -----------------------------------------------

    #[test]
    fn test_worst_per_transition_keeps_highest_severity() {
        let hours = [(38.0, 0.06), (36.0, 0.0), (34.0, 0.01), (31.0, 0.0)];
        let events = detect_events(&series(&hours));
        // Boundary 2→3 fires B (Extreme) and C (Moderate).
        assert_eq!(events.len(), 2);
        let worst = worst_per_transition(&events);
        assert_eq!(worst.len(), 1);
        assert_eq!(worst[0].event_type, IceEventType::RainToFreeze);
    }

    #[test]
    fn test_worst_per_transition_prefers_first_rule_on_tie() {
        let hours = [(31.0, 0.1), (34.0, 0.1), (30.0, 0.0)];
        let events = detect_events(&series(&hours));
        let worst = worst_per_transition(&events);
        assert_eq!(worst.len(), 2);
        assert_eq!(worst[0].event_type, IceEventType::FreezingRain);
        assert_eq!(worst[1].event_type, IceEventType::RainToFreeze);
    }
}
