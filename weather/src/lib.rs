// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod service;

pub use cache::{CacheKey, CacheSlot};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Coordinates, WeatherConfig};
pub use error::WeatherError;
pub use models::snapshot::{ms_to_kmh, WeatherSnapshot};
pub use provider::{OpenWeatherClient, WeatherProvider};
pub use service::WeatherService;

pub mod constants {
  use std::time::Duration;
  pub const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
  pub const CURRENT_ENDPOINT: &str = "weather";
  pub const FORECAST_ENDPOINT: &str = "forecast";
  pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
  pub const CACHE_DURATION: Duration = Duration::from_secs(10 * 60);
  /// 8 x 3h periods = 24h.
  pub const FORECAST_PERIODS: u8 = 8;
  pub const MS_TO_KMH: f64 = 3.6;
  // Reinach BL, Switzerland
  pub const DEFAULT_LATITUDE: f64 = 47.4953;
  pub const DEFAULT_LONGITUDE: f64 = 7.5965;
}
