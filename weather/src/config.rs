// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{constants::*, error::WeatherError};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
  pub latitude: f64,
  pub longitude: f64,
}

impl Default for Coordinates {
  fn default() -> Self {
    Self {
      latitude: DEFAULT_LATITUDE,
      longitude: DEFAULT_LONGITUDE,
    }
  }
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
  pub(crate) api_key: String,
  pub(crate) base_url: String,
  pub(crate) location: Coordinates,
  pub(crate) cache_duration: Duration,
  pub(crate) request_timeout: Duration,
}

impl WeatherConfig {
  pub fn new(api_key: impl Into<String>) -> Result<Self, WeatherError> {
    let api_key = api_key.into();
    if api_key.trim().is_empty() {
      return Err(WeatherError::InvalidApiKey);
    }

    Ok(Self {
      api_key,
      base_url: API_BASE_URL.to_string(),
      location: Coordinates::default(),
      cache_duration: CACHE_DURATION,
      request_timeout: REQUEST_TIMEOUT,
    })
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, WeatherError> {
    let base_url = base_url.into();
    let parsed = Url::parse(&base_url)
      .map_err(|e| WeatherError::InvalidConfig(format!("base URL '{}': {}", base_url, e)))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
      return Err(WeatherError::InvalidConfig(format!(
        "base URL must use http or https, got: {}",
        parsed.scheme()
      )));
    }

    self.base_url = base_url.trim_end_matches('/').to_string();
    Ok(self)
  }

  pub fn with_location(mut self, location: Coordinates) -> Result<Self, WeatherError> {
    if !(-90.0..=90.0).contains(&location.latitude)
      || !(-180.0..=180.0).contains(&location.longitude)
    {
      return Err(WeatherError::InvalidConfig(format!(
        "coordinates out of range: {}, {}",
        location.latitude, location.longitude
      )));
    }

    self.location = location;
    Ok(self)
  }

  pub fn with_cache_duration(mut self, cache_duration: Duration) -> Self {
    self.cache_duration = cache_duration;
    self
  }

  pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
    self.request_timeout = request_timeout;
    self
  }

  pub fn location(&self) -> Coordinates {
    self.location
  }

  pub fn cache_duration(&self) -> Duration {
    self.cache_duration
  }

  pub fn request_timeout(&self) -> Duration {
    self.request_timeout
  }

  pub(crate) fn endpoint_url(&self, endpoint: &str, extra: &[(&str, String)]) -> Result<Url, WeatherError> {
    let mut params = vec![
      ("lat", self.location.latitude.to_string()),
      ("lon", self.location.longitude.to_string()),
      ("appid", self.api_key.clone()),
      ("units", "metric".to_string()),
    ];
    params.extend(extra.iter().map(|(k, v)| (*k, v.clone())));

    Url::parse_with_params(&format!("{}/{}", self.base_url, endpoint), &params)
      .map_err(|e| WeatherError::InvalidConfig(format!("failed to build API URL: {}", e)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_blank_api_key() {
    assert!(matches!(
      WeatherConfig::new("   "),
      Err(WeatherError::InvalidApiKey)
    ));
  }

  #[test]
  fn defaults_match_fixed_location_and_cache() {
    let config = WeatherConfig::new("key").unwrap();
    assert_eq!(config.location(), Coordinates::default());
    assert_eq!(config.cache_duration(), Duration::from_secs(600));
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
  }

  #[test]
  fn rejects_non_http_base_url() {
    let result = WeatherConfig::new("key")
      .unwrap()
      .with_base_url("ftp://example.com");
    assert!(matches!(result, Err(WeatherError::InvalidConfig(_))));
  }

  #[test]
  fn rejects_out_of_range_coordinates() {
    let result = WeatherConfig::new("key").unwrap().with_location(Coordinates {
      latitude: 91.0,
      longitude: 0.0,
    });
    assert!(matches!(result, Err(WeatherError::InvalidConfig(_))));
  }

  #[test]
  fn builds_forecast_url_with_fixed_params() {
    let config = WeatherConfig::new("secret")
      .unwrap()
      .with_base_url("https://api.example.com/data/2.5/")
      .unwrap();
    let url = config
      .endpoint_url(FORECAST_ENDPOINT, &[("cnt", "8".to_string())])
      .unwrap();

    assert_eq!(url.path(), "/data/2.5/forecast");
    let query: Vec<(String, String)> = url
      .query_pairs()
      .map(|(k, v)| (k.into_owned(), v.into_owned()))
      .collect();
    assert!(query.contains(&("lat".into(), "47.4953".into())));
    assert!(query.contains(&("lon".into(), "7.5965".into())));
    assert!(query.contains(&("appid".into(), "secret".into())));
    assert!(query.contains(&("units".into(), "metric".into())));
    assert!(query.contains(&("cnt".into(), "8".into())));
  }
}
