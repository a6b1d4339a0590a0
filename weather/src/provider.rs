// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  config::WeatherConfig,
  constants::*,
  error::WeatherError,
  models::api::{CurrentResponse, ForecastResponse},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::timeout;
use tracing::{debug, instrument};
use url::Url;

/// Remote source of raw weather payloads for the configured location.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
  async fn fetch_current(&self) -> Result<CurrentResponse, WeatherError>;
  async fn fetch_forecast(&self, periods: u8) -> Result<ForecastResponse, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
  config: WeatherConfig,
  client: Client,
}

impl OpenWeatherClient {
  pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
    let client = Client::builder()
      .timeout(config.request_timeout)
      .build()
      .map_err(|e| WeatherError::InvalidConfig(format!("failed to create HTTP client: {}", e)))?;

    Ok(Self { config, client })
  }

  async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, WeatherError> {
    let request = async {
      let response = self.client.get(url).send().await?;

      match response.status() {
        status if status.is_success() => (),
        StatusCode::UNAUTHORIZED => return Err(WeatherError::AuthenticationFailure),
        StatusCode::TOO_MANY_REQUESTS => return Err(WeatherError::RateLimited),
        status => {
          return Err(WeatherError::HttpError {
            status: status.as_u16(),
          })
        }
      }

      let body = response.text().await?;
      Ok::<T, WeatherError>(serde_json::from_str(&body)?)
    };

    timeout(self.config.request_timeout, request)
      .await
      .map_err(|_| WeatherError::TransportTimeout)?
  }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
  #[instrument(skip(self))]
  async fn fetch_current(&self) -> Result<CurrentResponse, WeatherError> {
    let url = self.config.endpoint_url(CURRENT_ENDPOINT, &[])?;
    debug!(path = url.path(), "Requesting current weather");
    self.get_json(url).await
  }

  #[instrument(skip(self))]
  async fn fetch_forecast(&self, periods: u8) -> Result<ForecastResponse, WeatherError> {
    let url = self
      .config
      .endpoint_url(FORECAST_ENDPOINT, &[("cnt", periods.to_string())])?;
    debug!(path = url.path(), "Requesting forecast");
    self.get_json(url).await
  }
}
