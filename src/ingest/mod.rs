/// Input normalization.
///
/// Submodules:
/// - `open_meteo` — converts Open-Meteo hourly JSON (or a plain row list)
///   into `HourlyReading`s.

pub mod open_meteo;
