// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use super::api::{Condition, CurrentResponse, ForecastItem, ForecastResponse};
use crate::{constants::MS_TO_KMH, error::WeatherError};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One normalized reading, current conditions or a single forecast period.
///
/// `wind_speed` is km/h and `precipitation` is mm over the reporting
/// interval (1h for current, 3h for forecast). Both are never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
  pub temperature: f64,
  pub feels_like: f64,
  pub humidity: u8,
  pub wind_speed: f64,
  pub precipitation: f64,
  pub description: String,
  pub icon: String,
  pub timestamp: DateTime<Utc>,
  /// Display name, current weather only.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
}

pub fn ms_to_kmh(meters_per_second: f64) -> f64 {
  meters_per_second * MS_TO_KMH
}

impl WeatherSnapshot {
  pub(crate) fn from_current(response: CurrentResponse) -> Result<Self, WeatherError> {
    let condition = first_condition(&response.weather)?;
    let precipitation = response.rain.as_ref().and_then(|r| r.one_hour);

    let country = response
      .sys
      .as_ref()
      .map(|s| s.country.as_str())
      .unwrap_or_default();
    let location = match (response.name.trim(), country.trim()) {
      ("", "") => None,
      (name, "") => Some(name.to_string()),
      ("", country) => Some(country.to_string()),
      (name, country) => Some(format!("{}, {}", name, country)),
    };

    Ok(Self {
      temperature: response.main.temp,
      feels_like: response.main.feels_like,
      humidity: response.main.humidity,
      wind_speed: normalize(ms_to_kmh(response.wind.speed)),
      precipitation: normalize(precipitation.unwrap_or(0.0)),
      description: condition.description.clone(),
      icon: condition.icon.clone(),
      timestamp: parse_timestamp(response.dt)?,
      location,
    })
  }

  pub(crate) fn from_forecast_item(item: ForecastItem) -> Result<Self, WeatherError> {
    let condition = first_condition(&item.weather)?;
    let precipitation = item.rain.as_ref().and_then(|r| r.three_hours);

    Ok(Self {
      temperature: item.main.temp,
      feels_like: item.main.feels_like,
      humidity: item.main.humidity,
      wind_speed: normalize(ms_to_kmh(item.wind.speed)),
      precipitation: normalize(precipitation.unwrap_or(0.0)),
      description: condition.description.clone(),
      icon: condition.icon.clone(),
      timestamp: parse_timestamp(item.dt)?,
      location: None,
    })
  }

  pub(crate) fn from_forecast(response: ForecastResponse) -> Result<Vec<Self>, WeatherError> {
    response
      .list
      .into_iter()
      .map(Self::from_forecast_item)
      .collect()
  }
}

fn first_condition(conditions: &[Condition]) -> Result<&Condition, WeatherError> {
  conditions
    .first()
    .ok_or_else(|| WeatherError::ParseFailure("No weather condition in response".into()))
}

fn parse_timestamp(dt: i64) -> Result<DateTime<Utc>, WeatherError> {
  Utc
    .timestamp_opt(dt, 0)
    .single()
    .ok_or_else(|| WeatherError::ParseFailure(format!("Invalid timestamp: {}", dt)))
}

// f64::max drops NaN in favour of 0.0
fn normalize(value: f64) -> f64 {
  value.max(0.0)
}
