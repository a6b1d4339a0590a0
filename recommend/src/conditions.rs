// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use serde::{Deserialize, Serialize};
use weather::WeatherSnapshot;

/// The three readings rules are evaluated against.
///
/// Deserializing treats absent fields as `0`. Callers that need strict
/// validation must do it before building a `Conditions`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conditions {
  pub temperature: f64,
  pub wind_speed: f64,
  pub precipitation: f64,
}

impl Conditions {
  pub fn new(temperature: f64, wind_speed: f64, precipitation: f64) -> Self {
    Self {
      temperature,
      wind_speed,
      precipitation,
    }
  }
}

impl From<&WeatherSnapshot> for Conditions {
  fn from(snapshot: &WeatherSnapshot) -> Self {
    Self::new(
      snapshot.temperature,
      snapshot.wind_speed,
      snapshot.precipitation,
    )
  }
}
