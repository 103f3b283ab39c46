use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `GET /api/v1/rest/datastore/O-A0003-001`.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservationResponse {
    pub success: bool,
    pub records: Option<Records>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Records {
    pub location: Option<Vec<Location>>,
}

/// One weather station as reported by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, deserialize_with = "text_or_number")]
    pub lat: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub lon: String,
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub station_id: String,
    #[serde(default)]
    pub time: ObsTime,
    #[serde(default)]
    pub parameter: Vec<Parameter>,
    #[serde(default)]
    pub weather_element: Vec<WeatherElement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObsTime {
    #[serde(default)]
    pub obs_time: String,
}

/// Administrative metadata such as `CITY` or `TOWN`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub parameter_name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub parameter_value: String,
}

/// A measured quantity such as `TEMP`, `WDSD` or `Weather`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherElement {
    pub element_name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub element_value: String,
}

/// One flattened station reading, ready for tabular display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRow {
    pub county: String,
    pub area: String,
    pub observed_time: String,
    pub weather: String,
    pub temperature: String,
    pub wind_speed: String,
    pub station_id: String,
    pub station_name: String,
}

impl ObservationRow {
    /// Row shown before the first load resolves.
    pub fn placeholder() -> Self {
        Self::default()
    }
}

// The API is not consistent about quoting numeric readings.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
