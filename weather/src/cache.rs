// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
//! Time-bounded cache slots, one per query identity.
//!
//! A slot's lock is held across the refresh, so concurrent callers for the
//! same key wait for the in-flight fetch instead of issuing their own.
//! Slots for different keys never block each other.
use crate::{clock::Clock, error::WeatherError};
use chrono::{DateTime, Utc};
use std::{fmt, future::Future, time::Duration};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
  Current,
  Forecast,
}

impl fmt::Display for CacheKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CacheKey::Current => write!(f, "current"),
      CacheKey::Forecast => write!(f, "forecast"),
    }
  }
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
  value: T,
  fetched_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
  fn is_valid(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
    match (now - self.fetched_at).to_std() {
      Ok(age) => age < ttl,
      // fetched "in the future": clock stepped back, keep the entry
      Err(_) => true,
    }
  }
}

#[derive(Debug)]
pub struct CacheSlot<T> {
  key: CacheKey,
  ttl: Duration,
  entry: Mutex<Option<CacheEntry<T>>>,
}

impl<T: Clone> CacheSlot<T> {
  pub fn new(key: CacheKey, ttl: Duration) -> Self {
    Self {
      key,
      ttl,
      entry: Mutex::new(None),
    }
  }

  /// Returns the cached value if it is still valid, otherwise evicts it and
  /// runs `refresh`. A failed refresh leaves the slot empty.
  pub async fn get_or_refresh<F, Fut>(&self, clock: &dyn Clock, refresh: F) -> Result<T, WeatherError>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, WeatherError>>,
  {
    let mut entry = self.entry.lock().await;

    if let Some(cached) = entry.as_ref() {
      if cached.is_valid(clock.now(), self.ttl) {
        debug!(key = %self.key, "Returning cached weather data");
        return Ok(cached.value.clone());
      }
      debug!(key = %self.key, fetched_at = %cached.fetched_at, "Evicting stale cache entry");
      *entry = None;
    }

    let value = refresh().await?;
    *entry = Some(CacheEntry {
      value: value.clone(),
      fetched_at: clock.now(),
    });
    Ok(value)
  }

  pub async fn invalidate(&self) {
    *self.entry.lock().await = None;
  }
}
