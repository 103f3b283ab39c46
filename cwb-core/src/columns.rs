//! Column layout and display rules for the observation table.

use chrono::{DateTime, NaiveDateTime};
use std::convert::TryFrom;

use crate::{model::ObservationRow, table::Column};

/// Shown instead of a reading the station reports as `-99`.
pub const MALFUNCTION: &str = "儀器故障";

const MALFUNCTION_SENTINEL: f64 = -99.0;

/// `obsTime` → `yyyy/MM/dd HH:mm`, in the timestamp's own offset.
///
/// Accepts RFC 3339 and the older `YYYY-MM-DD HH:MM:SS` form. Anything else
/// is shown as received.
pub fn format_observed_time(raw: &str) -> String {
    const DISPLAY: &str = "%Y/%m/%d %H:%M";

    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format(DISPLAY).to_string();
    }
    raw.to_string()
}

pub fn format_reading(raw: &str) -> String {
    if is_malfunction(raw) {
        MALFUNCTION.to_string()
    } else {
        raw.to_string()
    }
}

pub fn is_malfunction(raw: &str) -> bool {
    raw.trim().parse::<f64>().is_ok_and(|v| v == MALFUNCTION_SENTINEL)
}

/// Columns addressable from the command line, e.g. for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    County,
    Area,
    Time,
    Weather,
    Temperature,
    WindSpeed,
    Station,
}

impl ColumnKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKey::County => "county",
            ColumnKey::Area => "area",
            ColumnKey::Time => "time",
            ColumnKey::Weather => "weather",
            ColumnKey::Temperature => "temp",
            ColumnKey::WindSpeed => "wind",
            ColumnKey::Station => "station",
        }
    }

    pub const fn all() -> &'static [ColumnKey] {
        &[
            ColumnKey::County,
            ColumnKey::Area,
            ColumnKey::Time,
            ColumnKey::Weather,
            ColumnKey::Temperature,
            ColumnKey::WindSpeed,
            ColumnKey::Station,
        ]
    }

    pub fn column(&self) -> Column<ObservationRow> {
        match self {
            ColumnKey::County => Column::new("縣市", |r: &ObservationRow| r.county.as_str()),
            ColumnKey::Area => Column::new("地區", |r: &ObservationRow| r.area.as_str()),
            ColumnKey::Time => {
                Column::new("觀測時間", |r: &ObservationRow| r.observed_time.as_str())
                    .with_formatter(format_observed_time)
            }
            ColumnKey::Weather => Column::new("天氣", |r: &ObservationRow| r.weather.as_str())
                .with_formatter(format_reading),
            ColumnKey::Temperature => {
                Column::new("溫度", |r: &ObservationRow| r.temperature.as_str())
                    .with_formatter(format_reading)
            }
            ColumnKey::WindSpeed => {
                Column::new("風速", |r: &ObservationRow| r.wind_speed.as_str())
                    .with_formatter(format_reading)
            }
            ColumnKey::Station => {
                Column::new("測站", |r: &ObservationRow| r.station_name.as_str())
            }
        }
    }
}

impl std::fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ColumnKey {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        ColumnKey::all().iter().copied().find(|k| k.as_str() == lower).ok_or_else(|| {
            let names: Vec<&str> = ColumnKey::all().iter().map(ColumnKey::as_str).collect();
            anyhow::anyhow!("Unknown column '{value}'. Supported columns: {}.", names.join(", "))
        })
    }
}

/// County, area, time, weather, temperature, wind speed.
pub fn observation_columns() -> Vec<Column<ObservationRow>> {
    [
        ColumnKey::County,
        ColumnKey::Area,
        ColumnKey::Time,
        ColumnKey::Weather,
        ColumnKey::Temperature,
        ColumnKey::WindSpeed,
    ]
    .iter()
    .map(ColumnKey::column)
    .collect()
}

/// Default columns plus station name and station id.
pub fn wide_observation_columns() -> Vec<Column<ObservationRow>> {
    let mut columns = observation_columns();
    columns.push(ColumnKey::Station.column());
    columns.push(Column::new("測站代碼", |r: &ObservationRow| r.station_id.as_str()));
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::render;

    fn taipei() -> ObservationRow {
        ObservationRow {
            county: "Taipei".into(),
            area: "Daan".into(),
            observed_time: "2024-01-01T12:00:00+08:00".into(),
            weather: "Clear".into(),
            temperature: "22.5".into(),
            wind_speed: "3.1".into(),
            station_id: "C0A9C0".into(),
            station_name: "大安森林".into(),
        }
    }

    #[test]
    fn observed_time_uses_its_own_offset() {
        assert_eq!(format_observed_time("2024-01-01T12:00:00+08:00"), "2024/01/01 12:00");
    }

    #[test]
    fn observed_time_accepts_space_separated_form() {
        assert_eq!(format_observed_time("2023-06-30 23:50:00"), "2023/06/30 23:50");
    }

    #[test]
    fn unparseable_time_is_shown_raw() {
        assert_eq!(format_observed_time(""), "");
        assert_eq!(format_observed_time("yesterday"), "yesterday");
    }

    #[test]
    fn sentinel_reading_is_malfunction() {
        assert_eq!(format_reading("-99"), MALFUNCTION);
        assert_eq!(format_reading("-99.00"), MALFUNCTION);
        assert_eq!(format_reading(" -99 "), MALFUNCTION);
    }

    #[test]
    fn other_readings_pass_through() {
        assert_eq!(format_reading("22.5"), "22.5");
        assert_eq!(format_reading("-9.9"), "-9.9");
        assert_eq!(format_reading("晴"), "晴");
        assert_eq!(format_reading(""), "");
    }

    #[test]
    fn rendered_row_formats_time_and_readings() {
        let mut row = taipei();
        row.temperature = "-99".into();

        let text = render(&[row], &observation_columns());
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("縣市"));
        assert!(lines[2].contains("2024/01/01 12:00"));
        assert!(lines[2].contains(MALFUNCTION));
        assert!(!lines[2].contains("-99"));
        assert!(lines[2].contains("3.1"));
    }

    #[test]
    fn wide_columns_include_station() {
        let text = render(&[taipei()], &wide_observation_columns());

        assert!(text.lines().next().unwrap_or_default().ends_with("測站代碼"));
        assert!(text.contains("大安森林"));
        assert!(text.contains("C0A9C0"));
    }

    #[test]
    fn column_key_roundtrip() {
        for key in ColumnKey::all() {
            let parsed = ColumnKey::try_from(key.as_str()).expect("roundtrip should succeed");
            assert_eq!(*key, parsed);
        }
    }

    #[test]
    fn unknown_column_error() {
        let err = ColumnKey::try_from("humidity").unwrap_err();
        assert!(err.to_string().contains("Unknown column"));
    }
}
