// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
  #[error("Weather API request timed out")]
  TransportTimeout,
  #[error("Weather API request failed: {0}")]
  TransportFailure(String),
  #[error("Invalid API key (HTTP 401)")]
  AuthenticationFailure,
  #[error("Rate limit exceeded (HTTP 429)")]
  RateLimited,
  #[error("Weather API returned HTTP {status}")]
  HttpError { status: u16 },
  #[error("Invalid response from weather API: {0}")]
  ParseFailure(String),
  #[error("Invalid API key")]
  InvalidApiKey,
  #[error("Invalid weather configuration: {0}")]
  InvalidConfig(String),
}

impl WeatherError {
  /// Short tag used as the `kind` field of failure log events.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::TransportTimeout => "timeout",
      Self::TransportFailure(_) => "transport",
      Self::AuthenticationFailure => "auth",
      Self::RateLimited => "rate_limited",
      Self::HttpError { .. } => "http",
      Self::ParseFailure(_) => "parse",
      Self::InvalidApiKey | Self::InvalidConfig(_) => "config",
    }
  }

  /// Whether a later retry of the same request can succeed without any
  /// change on the caller's side.
  pub fn is_retryable(&self) -> bool {
    match self {
      Self::TransportTimeout | Self::TransportFailure(_) | Self::RateLimited => true,
      Self::HttpError { status } => *status >= 500,
      _ => false,
    }
  }

  pub fn user_message(&self) -> &'static str {
    match self {
      Self::AuthenticationFailure | Self::InvalidApiKey => {
        "Weather data unavailable: the weather service rejected the API key. Check settings."
      }
      Self::RateLimited => "Weather data unavailable: too many requests. Please retry later.",
      Self::InvalidConfig(_) => "Weather data unavailable: invalid configuration. Check settings.",
      _ => "Weather data unavailable. Please retry later.",
    }
  }
}

impl From<reqwest::Error> for WeatherError {
  fn from(err: reqwest::Error) -> Self {
    // the request URL carries `appid`, never keep it in the message
    let err = err.without_url();
    if err.is_timeout() {
      Self::TransportTimeout
    } else if err.is_decode() {
      Self::ParseFailure(err.to_string())
    } else {
      Self::TransportFailure(err.to_string())
    }
  }
}

impl From<serde_json::Error> for WeatherError {
  fn from(err: serde_json::Error) -> Self {
    Self::ParseFailure(err.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn retryable_classification() {
    assert!(WeatherError::TransportTimeout.is_retryable());
    assert!(WeatherError::RateLimited.is_retryable());
    assert!(WeatherError::HttpError { status: 503 }.is_retryable());
    assert!(!WeatherError::HttpError { status: 404 }.is_retryable());
    assert!(!WeatherError::AuthenticationFailure.is_retryable());
    assert!(!WeatherError::ParseFailure("x".into()).is_retryable());
  }

  #[test]
  fn user_messages_signal_unavailable_data() {
    let errors = [
      WeatherError::TransportTimeout,
      WeatherError::TransportFailure("reset".into()),
      WeatherError::AuthenticationFailure,
      WeatherError::RateLimited,
      WeatherError::HttpError { status: 500 },
      WeatherError::ParseFailure("bad".into()),
    ];
    for err in &errors {
      assert!(err.user_message().starts_with("Weather data unavailable"));
    }
    assert!(WeatherError::AuthenticationFailure
      .user_message()
      .contains("API key"));
  }

  #[test]
  fn kinds_are_distinct_for_fetch_failures() {
    assert_eq!(WeatherError::TransportTimeout.kind(), "timeout");
    assert_eq!(WeatherError::AuthenticationFailure.kind(), "auth");
    assert_eq!(WeatherError::RateLimited.kind(), "rate_limited");
    assert_eq!(WeatherError::HttpError { status: 502 }.kind(), "http");
    assert_eq!(WeatherError::ParseFailure(String::new()).kind(), "parse");
  }
}
