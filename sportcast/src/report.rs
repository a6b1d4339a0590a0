// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use recommend::{ActivityRecommendation, BestTime, PeriodVerdict};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use weather::WeatherSnapshot;

const UNAVAILABLE: &str = "Weather data unavailable. Please retry later.";

#[derive(Debug, Serialize)]
pub struct CurrentReport {
  pub weather: WeatherSnapshot,
  pub recommendations: BTreeMap<String, ActivityRecommendation>,
}

#[derive(Debug, Serialize)]
pub struct ForecastReport {
  pub periods: Vec<PeriodVerdict>,
  pub best_times: BTreeMap<String, Vec<BestTime>>,
}

/// Everything one run produced. `None` sections failed to load; the
/// matching `*_error` field carries the message to show instead.
#[derive(Debug, Default, Serialize)]
pub struct Report {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub current: Option<CurrentReport>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub current_error: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub forecast: Option<ForecastReport>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub forecast_error: Option<String>,
}

impl Report {
  pub fn is_empty(&self) -> bool {
    self.current.is_none() && self.forecast.is_none()
  }

  pub fn render_text(&self) -> String {
    let mut out = String::new();

    match &self.current {
      Some(current) => render_current(&mut out, current),
      None => {
        let message = self.current_error.as_deref().unwrap_or(UNAVAILABLE);
        let _ = writeln!(out, "Current weather: {}", message);
      }
    }
    out.push('\n');

    match &self.forecast {
      Some(forecast) => render_forecast(&mut out, forecast),
      None => {
        let message = self.forecast_error.as_deref().unwrap_or(UNAVAILABLE);
        let _ = writeln!(out, "24h forecast: {}", message);
      }
    }

    out
  }
}

fn render_current(out: &mut String, current: &CurrentReport) {
  let w = &current.weather;
  let _ = writeln!(
    out,
    "Currently in {}: {:.1}°C (feels like {:.1}°C), {}",
    w.location.as_deref().unwrap_or("unknown location"),
    w.temperature,
    w.feels_like,
    w.description
  );
  let _ = writeln!(
    out,
    "Wind {:.1} km/h, rain {:.1} mm/h, humidity {}%",
    w.wind_speed, w.precipitation, w.humidity
  );
  for recommendation in current.recommendations.values() {
    let _ = writeln!(out, "  {}", recommendation.summary);
  }
}

fn render_forecast(out: &mut String, forecast: &ForecastReport) {
  let _ = writeln!(out, "Best times in the next 24h:");
  for (activity, times) in &forecast.best_times {
    if times.is_empty() {
      let _ = writeln!(out, "  {}: no suitable period", activity);
      continue;
    }
    let labels: Vec<&str> = times.iter().map(|t| t.label.as_str()).collect();
    let _ = writeln!(out, "  {}: {}", activity, labels.join(", "));
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Utc};
  use recommend::{Conditions, RecommendationEngine};

  fn snapshot(hour: u32, temperature: f64) -> WeatherSnapshot {
    WeatherSnapshot {
      temperature,
      feels_like: temperature,
      humidity: 40,
      wind_speed: 10.0,
      precipitation: 0.0,
      description: "clear sky".into(),
      icon: "01d".into(),
      timestamp: Utc.with_ymd_and_hms(2025, 6, 2, hour, 0, 0).unwrap(),
      location: Some("Reinach, CH".into()),
    }
  }

  #[test]
  fn renders_current_and_best_times() {
    let engine = RecommendationEngine::new();
    let current = snapshot(12, 18.0);
    let periods = engine.get_recommendations_for_forecast(&[snapshot(9, 16.0), snapshot(12, 30.0)]);
    let best_times = engine
      .activities()
      .into_iter()
      .map(|a| {
        let times = engine.get_best_times(&periods, &a);
        (a, times)
      })
      .collect();

    let report = Report {
      current: Some(CurrentReport {
        recommendations: engine.get_recommendations(&Conditions::from(&current)),
        weather: current,
      }),
      forecast: Some(ForecastReport { periods, best_times }),
      ..Report::default()
    };

    let text = report.render_text();
    assert!(text.contains("Currently in Reinach, CH: 18.0°C"));
    assert!(text.contains("✅ Great conditions for Cycling!"));
    assert!(text.contains("cycling: Mon 09:00"));
  }

  #[test]
  fn renders_unavailable_sections() {
    let report = Report {
      forecast_error: Some("Weather data unavailable: too many requests. Please retry later.".into()),
      ..Report::default()
    };
    let text = report.render_text();
    assert!(report.is_empty());
    assert!(text.contains("Current weather: Weather data unavailable. Please retry later."));
    assert!(text.contains("24h forecast: Weather data unavailable: too many requests."));
  }
}
