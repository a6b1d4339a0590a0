// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  conditions::Conditions,
  constants::PERIOD_LABEL_FORMAT,
  thresholds::{ThresholdPatch, ThresholdRule},
  verdict::{ActivityRecommendation, BestTime, Criterion, PeriodVerdict, Reason, Verdict},
};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};
use weather::WeatherSnapshot;

/// Rule table plus the evaluation logic over it.
///
/// Evaluation never fails and never touches its inputs. The table is only
/// changed through [`RecommendationEngine::update_thresholds`], which applies
/// the whole overlay under one write lock.
#[derive(Debug)]
pub struct RecommendationEngine {
  rules: RwLock<BTreeMap<String, ThresholdRule>>,
}

impl Default for RecommendationEngine {
  fn default() -> Self {
    Self::new()
  }
}

impl RecommendationEngine {
  pub fn new() -> Self {
    Self {
      rules: RwLock::new(ThresholdRule::defaults()),
    }
  }

  /// Default rules with `overrides` applied in order.
  pub fn with_overrides<'a, I>(overrides: I) -> Self
  where
    I: IntoIterator<Item = (&'a str, &'a ThresholdPatch)>,
  {
    let engine = Self::new();
    for (activity, patch) in overrides {
      engine.update_thresholds(activity, patch);
    }
    engine
  }

  pub fn evaluate(&self, activity: &str, conditions: &Conditions) -> Verdict {
    match self.rules.read().get(activity).copied() {
      Some(rule) => evaluate_rule(&rule, conditions),
      None => Verdict {
        recommended: false,
        reasons: vec![Reason::violated(
          Criterion::Activity,
          format!("Unknown activity: {}", activity),
        )],
      },
    }
  }

  pub fn get_recommendations(&self, conditions: &Conditions) -> BTreeMap<String, ActivityRecommendation> {
    // evaluate against one consistent copy of the table
    let rules = self.get_all_thresholds();
    rules
      .iter()
      .map(|(activity, rule)| {
        let recommendation = evaluate_rule(rule, conditions).into_recommendation(activity);
        (activity.clone(), recommendation)
      })
      .collect()
  }

  #[instrument(skip(self, forecast), fields(periods = forecast.len()))]
  pub fn get_recommendations_for_forecast(&self, forecast: &[WeatherSnapshot]) -> Vec<PeriodVerdict> {
    forecast
      .iter()
      .map(|snapshot| PeriodVerdict {
        timestamp: snapshot.timestamp,
        label: snapshot.timestamp.format(PERIOD_LABEL_FORMAT).to_string(),
        snapshot: snapshot.clone(),
        recommendations: self.get_recommendations(&Conditions::from(snapshot)),
      })
      .collect()
  }

  pub fn get_best_times(&self, forecast: &[PeriodVerdict], activity: &str) -> Vec<BestTime> {
    let best: Vec<BestTime> = forecast
      .iter()
      .filter_map(|period| {
        let recommendation = period.recommendations.get(activity)?;
        recommendation.recommended.then(|| BestTime {
          label: period.label.clone(),
          timestamp: period.timestamp,
          conditions: Conditions::from(&period.snapshot),
          reasons: recommendation.reasons.clone(),
        })
      })
      .collect();
    debug!(activity, matches = best.len(), "Selected best times");
    best
  }

  /// Overlays `patch` onto the activity's rule. Unknown activities are
  /// created from the patch alone.
  pub fn update_thresholds(&self, activity: &str, patch: &ThresholdPatch) {
    let mut rules = self.rules.write();
    let rule = rules
      .get(activity)
      .copied()
      .unwrap_or(ThresholdRule::UNBOUNDED)
      .patched(patch);
    rules.insert(activity.to_string(), rule);
    info!(activity, ?rule, "Updated activity thresholds");
  }

  pub fn get_all_thresholds(&self) -> BTreeMap<String, ThresholdRule> {
    self.rules.read().clone()
  }

  pub fn activities(&self) -> Vec<String> {
    self.rules.read().keys().cloned().collect()
  }
}

fn evaluate_rule(rule: &ThresholdRule, conditions: &Conditions) -> Verdict {
  let reasons = vec![
    check_temperature(rule, conditions.temperature),
    check_wind(rule, conditions.wind_speed),
    check_precipitation(rule, conditions.precipitation),
  ];
  Verdict {
    recommended: reasons.iter().all(|r| r.satisfied),
    reasons,
  }
}

fn check_temperature(rule: &ThresholdRule, temperature: f64) -> Reason {
  if temperature < rule.temp_min {
    Reason::violated(
      Criterion::Temperature,
      format!(
        "Too cold: {:.1}°C (minimum: {}°C)",
        temperature, rule.temp_min
      ),
    )
  } else if temperature > rule.temp_max {
    Reason::violated(
      Criterion::Temperature,
      format!(
        "Too hot: {:.1}°C (maximum: {}°C)",
        temperature, rule.temp_max
      ),
    )
  } else {
    Reason::satisfied(
      Criterion::Temperature,
      format!("Temperature perfect: {:.1}°C", temperature),
    )
  }
}

fn check_wind(rule: &ThresholdRule, wind_speed: f64) -> Reason {
  if wind_speed > rule.wind_max {
    Reason::violated(
      Criterion::Wind,
      format!(
        "Too windy: {:.1} km/h (maximum: {} km/h)",
        wind_speed, rule.wind_max
      ),
    )
  } else {
    Reason::satisfied(
      Criterion::Wind,
      format!("Wind acceptable: {:.1} km/h", wind_speed),
    )
  }
}

fn check_precipitation(rule: &ThresholdRule, rain: f64) -> Reason {
  if rain > rule.rain_max {
    let text = if rule.rain_max == 0.0 {
      format!("Raining: {:.1} mm/h (requires no rain)", rain)
    } else {
      format!(
        "Too much rain: {:.1} mm/h (maximum: {} mm/h)",
        rain, rule.rain_max
      )
    };
    Reason::violated(Criterion::Precipitation, text)
  } else if rain > 0.0 {
    Reason::satisfied(
      Criterion::Precipitation,
      format!("Light rain acceptable: {:.1} mm/h", rain),
    )
  } else {
    Reason::satisfied(Criterion::Precipitation, "No rain - perfect conditions")
  }
}
