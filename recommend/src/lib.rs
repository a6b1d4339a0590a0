// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
//! Scores weather snapshots against per-activity threshold rules.
pub mod conditions;
pub mod engine;
pub mod thresholds;
pub mod verdict;

pub use conditions::Conditions;
pub use engine::RecommendationEngine;
pub use thresholds::{ThresholdPatch, ThresholdRule};
pub use verdict::{ActivityRecommendation, BestTime, Criterion, PeriodVerdict, Reason, Verdict};

pub mod constants {
  pub const CYCLING: &str = "cycling";
  pub const RUNNING: &str = "running";
  /// strftime pattern for forecast period labels, UTC.
  pub const PERIOD_LABEL_FORMAT: &str = "%a %H:%M";
}
