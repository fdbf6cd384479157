/// Daily ice accumulation.
///
/// Folds an hourly series into one `DailyIceRecord` per calendar day. Each
/// hour below freezing with non-snow precipitation contributes
/// `(precipitation - snowfall) × efficiency`, where efficiency depends on the
/// temperature band (see `alert::thresholds::efficiency_for`). The risk tier
/// is assigned once per day after the whole series has been consumed.

use crate::alert::thresholds::{FREEZING_POINT_F, classify_accumulation, efficiency_for};
use crate::logging::{self, Component};
use crate::model::{DailyIceMap, DailyIceRecord, HourlyReading};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Per-hour contribution
// ---------------------------------------------------------------------------

/// Inches of ice one hour adds to its day.
///
/// Zero unless the temperature is known and strictly below freezing and
/// precipitation is positive. Snow is subtracted first; when snowfall
/// overstates precipitation the result is zero, never negative.
pub fn ice_contribution(reading: &HourlyReading) -> f64 {
    let Some(temperature) = reading.temperature else {
        return 0.0;
    };
    let precipitation = reading.precipitation_in();
    if temperature >= FREEZING_POINT_F || precipitation <= 0.0 {
        return 0.0;
    }

    let non_snow_precip = precipitation - reading.snowfall_in();
    if non_snow_precip <= 0.0 {
        return 0.0;
    }
    non_snow_precip * efficiency_for(temperature)
}

// ---------------------------------------------------------------------------
// Daily fold
// ---------------------------------------------------------------------------

/// Running totals for a day that is still open.
#[derive(Debug, Default)]
struct DayTally {
    ice_accumulation: f64,
    freezing_hours: u32,
    min_temperature: Option<f64>,
    max_temperature: Option<f64>,
}

impl DayTally {
    fn absorb(mut self, reading: &HourlyReading) -> Self {
        let contribution = ice_contribution(reading);
        self.ice_accumulation += contribution;
        if contribution > 0.0 {
            self.freezing_hours += 1;
        }
        if let Some(t) = reading.temperature {
            self.min_temperature = Some(self.min_temperature.map_or(t, |m| m.min(t)));
            self.max_temperature = Some(self.max_temperature.map_or(t, |m| m.max(t)));
        }
        self
    }

    fn finalize(self) -> DailyIceRecord {
        DailyIceRecord {
            ice_accumulation: self.ice_accumulation,
            freezing_hours: self.freezing_hours,
            min_temperature: self.min_temperature,
            max_temperature: self.max_temperature,
            risk_tier: classify_accumulation(self.ice_accumulation),
        }
    }
}

/// Builds the per-day ice table for `series`.
///
/// Every calendar date present in the input gets exactly one record, even
/// partial days and days with no ice. An empty series yields an empty map.
pub fn accumulate_daily(series: &[HourlyReading]) -> DailyIceMap {
    let tallies = series.iter().fold(BTreeMap::new(), |mut days, reading| {
        let tally: DayTally = days.remove(&reading.date()).unwrap_or_default();
        days.insert(reading.date(), tally.absorb(reading));
        days
    });

    tallies
        .into_iter()
        .map(|(date, tally)| {
            let record = tally.finalize();
            if record.ice_accumulation > 0.0 {
                logging::debug(
                    Component::Accumulator,
                    Some(&date.to_string()),
                    &format!(
                        "{:.2}\" ice over {} freezing hours ({})",
                        record.ice_accumulation, record.freezing_hours, record.risk_tier
                    ),
                );
            }
            (date, record)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
