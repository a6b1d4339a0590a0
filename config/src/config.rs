// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use recommend::{RecommendationEngine, ThresholdPatch};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};
use weather::{constants, Coordinates, WeatherConfig};

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const CONFIG_PATH_ENV: &str = "SPORTCAST_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "sportcast.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
  pub weather: WeatherSettings,
  /// Per-activity threshold overrides, applied on top of the defaults.
  pub activities: BTreeMap<String, ThresholdPatch>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
  pub api_key: Option<String>,
  pub base_url: String,
  pub latitude: f64,
  pub longitude: f64,
  pub cache_minutes: u64,
  pub timeout_secs: u64,
}

impl Default for WeatherSettings {
  fn default() -> Self {
    Self {
      api_key: None,
      base_url: constants::API_BASE_URL.to_string(),
      latitude: constants::DEFAULT_LATITUDE,
      longitude: constants::DEFAULT_LONGITUDE,
      cache_minutes: constants::CACHE_DURATION.as_secs() / 60,
      timeout_secs: constants::REQUEST_TIMEOUT.as_secs(),
    }
  }
}

impl Config {
  #[instrument(skip(path))]
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
    let content = fs::read_to_string(path)?;
    let config: Self = toml::from_str(&content)?;
    config.validate()?;
    debug!(
      activities = config.activities.len(),
      "Loaded configuration successfully"
    );
    Ok(config)
  }

  /// Like [`Config::from_file`], but a missing file yields the defaults.
  pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
    let path = path.as_ref();
    if !path.exists() {
      info!(path = %path.display(), "No configuration file, using defaults");
      return Ok(Self::default());
    }
    Self::from_file(path)
  }

  pub fn validate(&self) -> Result<(), Error> {
    if self.weather.cache_minutes == 0 {
      return Err(Error::ConfigError(
        "weather.cache_minutes must be greater than 0".into(),
      ));
    }
    if self.weather.timeout_secs == 0 {
      return Err(Error::ConfigError(
        "weather.timeout_secs must be greater than 0".into(),
      ));
    }

    self.cache_duration()?;

    for (activity, patch) in &self.activities {
      let fields = [
        ("temp_min", patch.temp_min),
        ("temp_max", patch.temp_max),
        ("wind_max", patch.wind_max),
        ("rain_max", patch.rain_max),
      ];
      for (field, value) in fields {
        if value.is_some_and(|v| !v.is_finite()) {
          return Err(Error::ConfigError(format!(
            "activities.{}.{} must be a finite number",
            activity, field
          )));
        }
      }
      if let (Some(min), Some(max)) = (patch.temp_min, patch.temp_max) {
        if min > max {
          return Err(Error::ConfigError(format!(
            "activities.{}: temp_min ({}) is above temp_max ({})",
            activity, min, max
          )));
        }
      }
      for (field, value) in [("wind_max", patch.wind_max), ("rain_max", patch.rain_max)] {
        if value.is_some_and(|v| v < 0.0) {
          return Err(Error::ConfigError(format!(
            "activities.{}.{} cannot be negative",
            activity, field
          )));
        }
      }
    }

    Ok(())
  }

  /// `env_key` (the value of [`API_KEY_ENV`], if set) wins over the file.
  pub fn api_key(&self, env_key: Option<String>) -> Result<String, Error> {
    env_key
      .filter(|k| !k.trim().is_empty())
      .or_else(|| self.weather.api_key.clone())
      .ok_or_else(|| Error::MissingEnv(API_KEY_ENV.to_string()))
  }

  pub fn weather_config(&self, env_key: Option<String>) -> Result<WeatherConfig, Error> {
    let settings = &self.weather;
    let config = WeatherConfig::new(self.api_key(env_key)?)?
      .with_base_url(settings.base_url.as_str())?
      .with_location(Coordinates {
        latitude: settings.latitude,
        longitude: settings.longitude,
      })?
      .with_cache_duration(self.cache_duration()?)
      .with_request_timeout(Duration::from_secs(settings.timeout_secs));
    Ok(config)
  }

  fn cache_duration(&self) -> Result<Duration, Error> {
    self
      .weather
      .cache_minutes
      .checked_mul(60)
      .map(Duration::from_secs)
      .ok_or_else(|| Error::ConfigError("weather.cache_minutes is out of range".into()))
  }

  pub fn recommendation_engine(&self) -> RecommendationEngine {
    RecommendationEngine::with_overrides(
      self
        .activities
        .iter()
        .map(|(activity, patch)| (activity.as_str(), patch)),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
  }

  #[test]
  fn defaults_match_weather_constants() {
    let config = Config::default();
    assert_eq!(config.weather.cache_minutes, 10);
    assert_eq!(config.weather.timeout_secs, 10);
    assert!(config.activities.is_empty());
    assert!(config.validate().is_ok());
  }

  #[test]
  fn loads_partial_file() {
    let file = write_config(
      r#"
      [weather]
      latitude = 46.95
      longitude = 7.45

      [activities.cycling]
      temp_max = 28

      [activities.hiking]
      temp_min = 5
      temp_max = 30
      wind_max = 40
      rain_max = 1
      "#,
    );

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.weather.latitude, 46.95);
    assert_eq!(config.weather.cache_minutes, 10);
    assert_eq!(config.activities["cycling"].temp_max, Some(28.0));
    assert_eq!(config.activities["cycling"].temp_min, None);

    let engine = config.recommendation_engine();
    let thresholds = engine.get_all_thresholds();
    assert_eq!(thresholds["cycling"].temp_max, 28.0);
    assert_eq!(thresholds["cycling"].temp_min, 15.0);
    assert_eq!(thresholds["hiking"].wind_max, 40.0);
    assert_eq!(thresholds.len(), 3);
  }

  #[test]
  fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(dir.path().join("absent.toml")).unwrap();
    assert!(config.activities.is_empty());
  }

  #[test]
  fn rejects_inverted_temperature_range() {
    let file = write_config(
      r#"
      [activities.running]
      temp_min = 25
      temp_max = 10
      "#,
    );
    assert!(matches!(
      Config::from_file(file.path()),
      Err(Error::ConfigError(_))
    ));
  }

  #[test]
  fn rejects_zero_cache_duration() {
    let file = write_config("[weather]\ncache_minutes = 0\n");
    assert!(matches!(
      Config::from_file(file.path()),
      Err(Error::ConfigError(_))
    ));
  }

  #[test]
  fn rejects_overflowing_cache_duration() {
    let file = write_config(&format!("[weather]\ncache_minutes = {}\n", i64::MAX));
    assert!(matches!(
      Config::from_file(file.path()),
      Err(Error::ConfigError(_))
    ));

    let mut config = Config::default();
    config.weather.cache_minutes = u64::MAX;
    assert!(matches!(
      config.weather_config(Some("key".into())),
      Err(Error::ConfigError(_))
    ));
  }

  #[test]
  fn rejects_non_finite_thresholds() {
    for value in ["nan", "inf", "-inf"] {
      let file = write_config(&format!("[activities.cycling]\nrain_max = {}\n", value));
      assert!(
        matches!(Config::from_file(file.path()), Err(Error::ConfigError(_))),
        "{} accepted",
        value
      );
    }
  }

  #[test]
  fn rejects_unknown_threshold_fields() {
    let file = write_config("[activities.running]\ntemp_maximum = 10\n");
    assert!(matches!(
      Config::from_file(file.path()),
      Err(Error::TomlError(_))
    ));
  }

  #[test]
  fn environment_key_wins_over_file() {
    let mut config = Config::default();
    config.weather.api_key = Some("from-file".into());
    assert_eq!(config.api_key(Some("from-env".into())).unwrap(), "from-env");
    assert_eq!(config.api_key(None).unwrap(), "from-file");
    assert_eq!(config.api_key(Some("  ".into())).unwrap(), "from-file");
  }

  #[test]
  fn missing_api_key_is_reported() {
    let config = Config::default();
    assert!(matches!(config.api_key(None), Err(Error::MissingEnv(_))));
  }

  #[test]
  fn builds_weather_config() {
    let mut config = Config::default();
    config.weather.cache_minutes = 5;
    let weather = config.weather_config(Some("key".into())).unwrap();
    assert_eq!(weather.cache_duration(), Duration::from_secs(300));
    assert_eq!(weather.location(), Coordinates::default());
  }

  #[test]
  fn invalid_coordinates_surface_as_weather_error() {
    let mut config = Config::default();
    config.weather.latitude = 120.0;
    assert!(matches!(
      config.weather_config(Some("key".into())),
      Err(Error::Weather(_))
    ));
  }
}
