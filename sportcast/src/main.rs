// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
mod report;

use anyhow::{bail, Context, Result};
use config::{Config, API_KEY_ENV, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use recommend::{Conditions, RecommendationEngine};
use report::{CurrentReport, ForecastReport, Report};
use std::env;
use tracing::{info, instrument};
use weather::WeatherService;

pub struct ReportRunner {
  weather: WeatherService,
  engine: RecommendationEngine,
}

#[cfg(debug_assertions)]
fn setup_logging() {
  tracing_subscriber::fmt()
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .init();
}

#[cfg(not(debug_assertions))]
fn setup_logging() {
  tracing_subscriber::fmt().init();
}

#[tokio::main]
async fn main() -> Result<()> {
  setup_logging();

  let json = env::args().skip(1).any(|arg| arg == "--json");
  let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
  let config =
    Config::load(&config_path).with_context(|| format!("Failed to load {}", config_path))?;

  let runner = ReportRunner::new(&config, env::var(API_KEY_ENV).ok())?;
  let report = runner.run().await;

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print!("{}", report.render_text());
  }

  if report.is_empty() {
    bail!("Weather data unavailable");
  }
  Ok(())
}

impl ReportRunner {
  #[instrument(skip(config, api_key))]
  pub fn new(config: &Config, api_key: Option<String>) -> Result<Self> {
    let weather_config = config
      .weather_config(api_key)
      .context("Invalid weather configuration")?;

    Ok(Self {
      weather: WeatherService::new(weather_config).context("Failed to create weather service")?,
      engine: config.recommendation_engine(),
    })
  }

  #[instrument(skip(self))]
  pub async fn run(&self) -> Report {
    let mut report = Report::default();

    match self.weather.get_current_weather().await {
      Ok(weather) => {
        let recommendations = self
          .engine
          .get_recommendations(&Conditions::from(&weather));
        report.current = Some(CurrentReport {
          weather,
          recommendations,
        });
      }
      Err(e) => report.current_error = Some(e.user_message().to_string()),
    }

    match self.weather.get_forecast_24h().await {
      Ok(forecast) => {
        let periods = self.engine.get_recommendations_for_forecast(&forecast);
        let best_times = self
          .engine
          .activities()
          .into_iter()
          .map(|activity| {
            let times = self.engine.get_best_times(&periods, &activity);
            (activity, times)
          })
          .collect();
        report.forecast = Some(ForecastReport {
          periods,
          best_times,
        });
      }
      Err(e) => report.forecast_error = Some(e.user_message().to_string()),
    }

    info!(
      current = report.current.is_some(),
      forecast = report.forecast.is_some(),
      "Report ready"
    );
    report
  }
}
