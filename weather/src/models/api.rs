// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
//! Raw OpenWeatherMap payloads, `units=metric`.
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CurrentResponse {
  pub weather: Vec<Condition>,
  pub main: MainReadings,
  pub wind: Wind,
  #[serde(default)]
  pub rain: Option<Rain>,
  pub dt: i64,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub sys: Option<SysInfo>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastResponse {
  pub list: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastItem {
  pub weather: Vec<Condition>,
  pub main: MainReadings,
  pub wind: Wind,
  #[serde(default)]
  pub rain: Option<Rain>,
  pub dt: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Condition {
  pub description: String,
  pub icon: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MainReadings {
  pub temp: f64,
  pub feels_like: f64,
  pub humidity: u8,
}

/// Wind speed in m/s.
#[derive(Debug, Deserialize, Clone)]
pub struct Wind {
  pub speed: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Rain {
  #[serde(rename = "1h")]
  pub one_hour: Option<f64>,
  #[serde(rename = "3h")]
  pub three_hours: Option<f64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SysInfo {
  #[serde(default)]
  pub country: String,
}
