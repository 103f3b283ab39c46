//! Reshapes the nested API payload into flat [`ObservationRow`]s.

use crate::{
    error::FetchError,
    model::{Location, ObservationResponse, ObservationRow},
};

/// Turn a response into rows, one per location, in response order.
///
/// Fails with [`FetchError::ApiUnstable`] when the API reports `success: false`
/// and with [`FetchError::MissingRecords`] when it claims success but carries no
/// location list.
pub fn rows_from_response(
    response: &ObservationResponse,
) -> Result<Vec<ObservationRow>, FetchError> {
    if !response.success {
        return Err(FetchError::ApiUnstable);
    }

    let locations = response
        .records
        .as_ref()
        .and_then(|r| r.location.as_ref())
        .ok_or(FetchError::MissingRecords)?;

    Ok(locations.iter().map(row_from_location).collect())
}

pub fn row_from_location(location: &Location) -> ObservationRow {
    let param = |name: &str| {
        let pairs = location
            .parameter
            .iter()
            .map(|p| (p.parameter_name.as_str(), p.parameter_value.as_str()));
        pick(pairs, name)
    };
    let element = |name: &str| {
        let pairs = location
            .weather_element
            .iter()
            .map(|e| (e.element_name.as_str(), e.element_value.as_str()));
        pick(pairs, name)
    };

    ObservationRow {
        county: param("CITY"),
        area: param("TOWN"),
        observed_time: location.time.obs_time.clone(),
        weather: element("Weather"),
        temperature: element("TEMP"),
        wind_speed: element("WDSD"),
        station_id: location.station_id.clone(),
        station_name: location.location_name.clone(),
    }
}

// Last occurrence wins; absent names become "".
fn pick<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>, name: &str) -> String {
    pairs
        .filter(|(key, _)| *key == name)
        .last()
        .map(|(_, value)| value.to_string())
        .unwrap_or_default()
}
