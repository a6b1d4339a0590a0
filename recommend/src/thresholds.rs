// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::constants::{CYCLING, RUNNING};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Suitability envelope for one activity. All bounds are inclusive.
///
/// Temperatures are °C, wind is km/h, rain is mm per snapshot interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
  pub temp_min: f64,
  pub temp_max: f64,
  pub wind_max: f64,
  pub rain_max: f64,
}

impl ThresholdRule {
  pub const CYCLING: Self = Self {
    temp_min: 15.0,
    temp_max: 25.0,
    wind_max: 30.0,
    rain_max: 0.0,
  };

  pub const RUNNING: Self = Self {
    temp_min: 10.0,
    temp_max: 20.0,
    wind_max: 30.0,
    rain_max: 3.0,
  };

  /// Base for activities created from a partial patch: every bound a patch
  /// leaves out accepts any reading.
  pub const UNBOUNDED: Self = Self {
    temp_min: f64::NEG_INFINITY,
    temp_max: f64::INFINITY,
    wind_max: f64::INFINITY,
    rain_max: f64::INFINITY,
  };

  pub fn defaults() -> BTreeMap<String, ThresholdRule> {
    BTreeMap::from([
      (CYCLING.to_string(), Self::CYCLING),
      (RUNNING.to_string(), Self::RUNNING),
    ])
  }

  pub fn patched(mut self, patch: &ThresholdPatch) -> Self {
    if let Some(v) = patch.temp_min {
      self.temp_min = v;
    }
    if let Some(v) = patch.temp_max {
      self.temp_max = v;
    }
    if let Some(v) = patch.wind_max {
      self.wind_max = v;
    }
    if let Some(v) = patch.rain_max {
      self.rain_max = v;
    }
    self
  }
}

/// Partial rule update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdPatch {
  pub temp_min: Option<f64>,
  pub temp_max: Option<f64>,
  pub wind_max: Option<f64>,
  pub rain_max: Option<f64>,
}

impl ThresholdPatch {
  pub fn temperature(min: f64, max: f64) -> Self {
    Self {
      temp_min: Some(min),
      temp_max: Some(max),
      ..Self::default()
    }
  }
}
