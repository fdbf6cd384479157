/// Hourly series normalization for Open-Meteo style forecasts
///
/// The dashboard fetches forecasts elsewhere; this module only turns the
/// response body into `HourlyReading`s. Two shapes are accepted:
///
/// - the Open-Meteo columnar block, `{"hourly": {"time": [...],
///   "temperature_2m": [...], "precipitation": [...], "rain": [...],
///   "snowfall": [...]}}`, requested with `temperature_unit=fahrenheit`
///   and `precipitation_unit=inch`;
/// - a plain JSON array of readings, one object per hour.
///
/// Missing values stay `None` so the analyzer can treat them as zero
/// contribution. Nothing here performs network access.

use crate::logging::{self, Component};
use crate::model::{HourlyReading, IceDataError};
use chrono::NaiveDateTime;
use serde::Deserialize;

/// Open-Meteo emits minutes-only local times; seconds are tolerated.
const TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

// ============================================================================
// Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub hourly: Option<HourlyColumns>,
}

/// Column-oriented hourly block. `time` governs the number of hours; any
/// other column may be shorter, absent, or contain nulls.
#[derive(Debug, Deserialize)]
pub struct HourlyColumns {
    pub time: Vec<String>,
    #[serde(default, alias = "temperature")]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    #[serde(default)]
    pub rain: Vec<Option<f64>>,
    #[serde(default)]
    pub snowfall: Vec<Option<f64>>,
}

// ============================================================================
// Parsing
// ============================================================================

fn parse_time(raw: &str) -> Option<NaiveDateTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
}

fn column_value(column: &[Option<f64>], index: usize) -> Option<f64> {
    column.get(index).copied().flatten()
}

impl HourlyColumns {
    /// Zips the columns into readings, skipping hours whose time is unreadable.
    pub fn into_readings(self) -> Vec<HourlyReading> {
        let mut readings = Vec::with_capacity(self.time.len());

        for (i, raw_time) in self.time.iter().enumerate() {
            let Some(timestamp) = parse_time(raw_time) else {
                logging::warn(
                    Component::Ingest,
                    Some(raw_time.as_str()),
                    "unparseable hourly timestamp; hour skipped",
                );
                continue;
            };

            readings.push(HourlyReading {
                timestamp,
                temperature: column_value(&self.temperature_2m, i),
                precipitation: column_value(&self.precipitation, i),
                rain: column_value(&self.rain, i),
                snowfall: column_value(&self.snowfall, i),
            });
        }

        readings
    }
}

/// Parses an Open-Meteo forecast body. A body without an `hourly` block is
/// an empty series, not an error.
pub fn parse_forecast(json: &str) -> Result<Vec<HourlyReading>, IceDataError> {
    let response: ForecastResponse = serde_json::from_str(json)?;
    let Some(hourly) = response.hourly else {
        logging::warn(Component::Ingest, None, "forecast has no hourly block");
        return Ok(Vec::new());
    };

    let readings = hourly.into_readings();
    logging::debug(
        Component::Ingest,
        response.timezone.as_deref(),
        &format!("normalized {} hourly readings", readings.len()),
    );
    Ok(readings)
}

/// Accepts either supported shape, deciding by the top-level JSON value.
pub fn parse_series(json: &str) -> Result<Vec<HourlyReading>, IceDataError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_str(json)?),
        serde_json::Value::Object(_) => parse_forecast(json),
        serde_json::Value::Null => Ok(Vec::new()),
        other => Err(IceDataError::Parse(format!(
            "expected an object or array of hourly readings, got {}",
            other
        ))),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_accepts_minutes_and_seconds() {
        assert!(parse_time("2024-01-16T05:00").is_some());
        assert!(parse_time("2024-01-16T05:00:00").is_some());
        assert!(parse_time("16/01/2024 05:00").is_none());
    }

    #[test]
    fn test_columns_zip_into_readings() {
        let json = r#"{
            "hourly": {
                "time": ["2024-01-16T00:00", "2024-01-16T01:00"],
                "temperature_2m": [33.1, 30.4],
                "precipitation": [0.12, 0.08],
                "rain": [0.12, 0.08],
                "snowfall": [0.0, 0.0]
            }
        }"#;
        let readings = parse_forecast(json).expect("valid forecast should parse");
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[1].temperature, Some(30.4));
        assert_eq!(readings[1].rain, Some(0.08));
    }

    #[test]
    fn test_short_and_null_columns_become_none() {
        let json = r#"{
            "hourly": {
                "time": ["2024-01-16T00:00", "2024-01-16T01:00"],
                "temperature_2m": [null, 30.4],
                "precipitation": [0.1]
            }
        }"#;
        let readings = parse_forecast(json).unwrap();
        assert_eq!(readings[0].temperature, None);
        assert_eq!(readings[1].precipitation, None, "column shorter than time");
        assert_eq!(readings[0].snowfall, None, "column absent");
    }

    #[test]
    fn test_bad_time_skips_only_that_hour() {
        let json = r#"{"hourly": {"time": ["garbage", "2024-01-16T01:00"], "temperature_2m": [1.0, 2.0]}}"#;
        let readings = parse_forecast(json).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].temperature, Some(2.0), "values stay aligned with their hour");
    }

    #[test]
    fn test_missing_hourly_block_is_empty_series() {
        let readings = parse_forecast(r#"{"latitude": 35.3}"#).unwrap();
        assert!(readings.is_empty());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let result = parse_series("{not json");
        assert!(matches!(result, Err(IceDataError::Parse(_))), "got {:?}", result);
    }

    #[test]
    fn test_row_list_shape() {
        let json = r#"[
            {"timestamp": "2024-01-16T00:00:00", "temperature": 34.0, "rain": 0.2, "precipitation": 0.2},
            {"timestamp": "2024-01-16T01:00:00", "temperature": 30.0}
        ]"#;
        let readings = parse_series(json).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[1].rain, None);
    }

    #[test]
    fn test_scalar_top_level_is_rejected() {
        assert!(parse_series("42").is_err());
        assert!(parse_series("null").unwrap().is_empty());
    }
}
