// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::conditions::Conditions;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{collections::BTreeMap, fmt};
use weather::WeatherSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
  /// The activity itself is not configured.
  Activity,
  Temperature,
  Wind,
  Precipitation,
}

/// One explanation line, tagged with whether its criterion held.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reason {
  pub criterion: Criterion,
  pub satisfied: bool,
  pub text: String,
}

impl Reason {
  pub fn satisfied(criterion: Criterion, text: impl Into<String>) -> Self {
    Self {
      criterion,
      satisfied: true,
      text: text.into(),
    }
  }

  pub fn violated(criterion: Criterion, text: impl Into<String>) -> Self {
    Self {
      criterion,
      satisfied: false,
      text: text.into(),
    }
  }
}

impl fmt::Display for Reason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.text)
  }
}

/// Result of one rule against one set of conditions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
  pub recommended: bool,
  pub reasons: Vec<Reason>,
}

impl Verdict {
  pub fn violations(&self) -> impl Iterator<Item = &Reason> {
    self.reasons.iter().filter(|r| !r.satisfied)
  }

  pub fn summary(&self, activity: &str) -> String {
    let name = capitalize(activity);

    if self.recommended {
      return format!("✅ Great conditions for {}! {}", name, join(self.reasons.iter()));
    }

    let negative = join(self.violations());
    if negative.is_empty() {
      format!("❌ Conditions not suitable for {}.", name)
    } else {
      format!("❌ Not ideal for {}. {}", name, negative)
    }
  }

  pub fn into_recommendation(self, activity: &str) -> ActivityRecommendation {
    let summary = self.summary(activity);
    ActivityRecommendation {
      recommended: self.recommended,
      reasons: self.reasons,
      summary,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRecommendation {
  pub recommended: bool,
  pub reasons: Vec<Reason>,
  pub summary: String,
}

/// Per-activity recommendations for a single forecast period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodVerdict {
  pub timestamp: DateTime<Utc>,
  pub label: String,
  pub snapshot: WeatherSnapshot,
  pub recommendations: BTreeMap<String, ActivityRecommendation>,
}

impl PeriodVerdict {
  pub fn is_recommended(&self, activity: &str) -> bool {
    self
      .recommendations
      .get(activity)
      .is_some_and(|r| r.recommended)
  }
}

/// A forecast period suitable for one activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestTime {
  pub label: String,
  pub timestamp: DateTime<Utc>,
  pub conditions: Conditions,
  pub reasons: Vec<Reason>,
}

fn join<'a>(reasons: impl Iterator<Item = &'a Reason>) -> String {
  reasons
    .map(|r| r.text.as_str())
    .collect::<Vec<_>>()
    .join(" ")
}

fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    None => String::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn capitalizes_activity_names() {
    assert_eq!(capitalize("cycling"), "Cycling");
    assert_eq!(capitalize("RUNNING"), "Running");
    assert_eq!(capitalize(""), "");
  }

  #[test]
  fn negative_summary_lists_only_violations() {
    let verdict = Verdict {
      recommended: false,
      reasons: vec![
        Reason::satisfied(Criterion::Temperature, "Temperature perfect: 18.0°C"),
        Reason::violated(Criterion::Wind, "Too windy: 35.0 km/h (maximum: 30 km/h)"),
        Reason::satisfied(Criterion::Precipitation, "Light rain acceptable: 0.5 mm/h"),
      ],
    };
    assert_eq!(
      verdict.summary("running"),
      "❌ Not ideal for Running. Too windy: 35.0 km/h (maximum: 30 km/h)"
    );
  }

  #[test]
  fn negative_summary_falls_back_without_violations() {
    let verdict = Verdict {
      recommended: false,
      reasons: vec![Reason::satisfied(Criterion::Wind, "Wind acceptable: 1.0 km/h")],
    };
    assert_eq!(verdict.summary("cycling"), "❌ Conditions not suitable for Cycling.");
  }

  #[test]
  fn positive_summary_joins_all_reasons() {
    let verdict = Verdict {
      recommended: true,
      reasons: vec![
        Reason::satisfied(Criterion::Temperature, "a"),
        Reason::satisfied(Criterion::Wind, "b"),
        Reason::satisfied(Criterion::Precipitation, "c"),
      ],
    };
    assert_eq!(verdict.summary("cycling"), "✅ Great conditions for Cycling! a b c");
  }
}
