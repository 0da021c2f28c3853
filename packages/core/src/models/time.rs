//! Time Provider Abstraction
//!
//! Note timestamps are taken from a [`TimeProvider`] owned by the store, so
//! ordering by `updated_at`/`created_at` can be tested without thread sleeps.
//!
//! # Examples
//!
//! ```rust
//! use leonardo_core::models::time::{ManualTimeProvider, TimeProvider};
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let clock = ManualTimeProvider::with_time(Utc.with_ymd_and_hms(2025, 5, 30, 10, 0, 0).unwrap());
//! let before = clock.now();
//! clock.advance(Duration::minutes(15));
//! assert_eq!(clock.now() - before, Duration::minutes(15));
//! ```

use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// Trait for providing current time
pub trait TimeProvider: Send + Sync {
    /// Get the current UTC time
    fn now(&self) -> DateTime<Utc>;
}

/// System time provider using actual system clock
///
/// This is the default implementation for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock
///
/// The store holds its clock behind an `Arc`, so the current time lives in a
/// mutex and can be moved forward through a shared reference.
#[derive(Debug)]
pub struct ManualTimeProvider {
    current_time: Mutex<DateTime<Utc>>,
}

impl ManualTimeProvider {
    /// Create a manual clock starting at the current system time
    pub fn new() -> Self {
        Self::with_time(Utc::now())
    }

    /// Create a manual clock with a specific starting time
    pub fn with_time(time: DateTime<Utc>) -> Self {
        Self {
            current_time: Mutex::new(time),
        }
    }

    /// Set the current time to a specific value
    pub fn set_time(&self, time: DateTime<Utc>) {
        *self.lock() = time;
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: chrono::Duration) {
        *self.lock() += duration;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        // A poisoned clock still holds a valid timestamp.
        self.current_time
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TimeProvider for ManualTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }
}

impl Default for ManualTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}
