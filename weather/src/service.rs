// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  cache::{CacheKey, CacheSlot},
  clock::{Clock, SystemClock},
  config::WeatherConfig,
  constants::FORECAST_PERIODS,
  error::WeatherError,
  models::snapshot::WeatherSnapshot,
  provider::{OpenWeatherClient, WeatherProvider},
};
use std::{sync::Arc, time::Duration};
use tracing::{error, info, instrument, warn};

pub struct WeatherService {
  provider: Box<dyn WeatherProvider>,
  clock: Arc<dyn Clock>,
  current: CacheSlot<WeatherSnapshot>,
  forecast: CacheSlot<Vec<WeatherSnapshot>>,
}

impl WeatherService {
  pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
    let cache_duration = config.cache_duration;
    let client = OpenWeatherClient::new(config)?;
    Ok(Self::with_provider(
      Box::new(client),
      Arc::new(SystemClock),
      cache_duration,
    ))
  }

  pub fn with_provider(
    provider: Box<dyn WeatherProvider>,
    clock: Arc<dyn Clock>,
    cache_duration: Duration,
  ) -> Self {
    Self {
      provider,
      clock,
      current: CacheSlot::new(CacheKey::Current, cache_duration),
      forecast: CacheSlot::new(CacheKey::Forecast, cache_duration),
    }
  }

  #[instrument(skip(self))]
  pub async fn get_current_weather(&self) -> Result<WeatherSnapshot, WeatherError> {
    self
      .current
      .get_or_refresh(self.clock.as_ref(), || async move {
        let response = self.provider.fetch_current().await?;
        let snapshot = WeatherSnapshot::from_current(response)?;
        info!(
          temperature = snapshot.temperature,
          wind_speed = snapshot.wind_speed,
          precipitation = snapshot.precipitation,
          "Fetched current weather"
        );
        Ok(snapshot)
      })
      .await
      .inspect_err(|e| log_failure(CacheKey::Current, e))
  }

  #[instrument(skip(self))]
  pub async fn get_forecast_24h(&self) -> Result<Vec<WeatherSnapshot>, WeatherError> {
    self
      .forecast
      .get_or_refresh(self.clock.as_ref(), || async move {
        let response = self.provider.fetch_forecast(FORECAST_PERIODS).await?;
        let periods = WeatherSnapshot::from_forecast(response)?;
        if periods.len() != usize::from(FORECAST_PERIODS) {
          warn!(
            expected = FORECAST_PERIODS,
            received = periods.len(),
            "Forecast period count differs from request"
          );
        }
        info!(periods = periods.len(), "Fetched 24h forecast");
        Ok(periods)
      })
      .await
      .inspect_err(|e| log_failure(CacheKey::Forecast, e))
  }

  /// Drops both cached entries; the next read of each key fetches.
  pub async fn invalidate(&self) {
    self.current.invalidate().await;
    self.forecast.invalidate().await;
  }
}

fn log_failure(key: CacheKey, err: &WeatherError) {
  match err {
    WeatherError::TransportTimeout => {
      warn!(%key, kind = err.kind(), "Weather API timeout")
    }
    WeatherError::AuthenticationFailure => {
      error!(%key, kind = err.kind(), "Weather API rejected the API key")
    }
    WeatherError::RateLimited => {
      warn!(%key, kind = err.kind(), "Weather API rate limit exceeded")
    }
    WeatherError::HttpError { status } => {
      warn!(%key, kind = err.kind(), status, "Weather API HTTP error")
    }
    WeatherError::ParseFailure(reason) => {
      warn!(%key, kind = err.kind(), %reason, "Weather API returned an unexpected payload")
    }
    other => warn!(%key, kind = other.kind(), error = %other, "Weather API request failed"),
  }
}
