// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use thiserror::Error as ThisError;
use weather::WeatherError;

#[derive(ThisError, Debug)]
pub enum Error {
  #[error("Configuration error: {0}")]
  ConfigError(String),
  #[error("Missing environment variable: {0}")]
  MissingEnv(String),
  #[error("IO error: {0}")]
  IoError(#[from] std::io::Error),
  #[error("Failed to parse configuration: {0}")]
  TomlError(#[from] toml::de::Error),
  #[error("Weather error: {0}")]
  Weather(#[from] WeatherError),
}

impl Error {
  pub fn user_message(&self) -> &'static str {
    match self {
      Error::Weather(e) => e.user_message(),
      Error::MissingEnv(_) => "A required setting is missing. Check your environment.",
      Error::ConfigError(_) | Error::TomlError(_) => {
        "Invalid configuration. Check your settings."
      }
      Error::IoError(_) => "Failed to read configuration. Check the file path.",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn weather_errors_keep_their_user_message() {
    let err: Error = WeatherError::RateLimited.into();
    assert!(matches!(err, Error::Weather(WeatherError::RateLimited)));
    assert_eq!(err.user_message(), WeatherError::RateLimited.user_message());
  }

  #[test]
  fn toml_errors_convert() {
    let parse = toml::from_str::<toml::Value>("= broken").unwrap_err();
    let err: Error = parse.into();
    assert!(err.to_string().starts_with("Failed to parse configuration"));
  }
}
