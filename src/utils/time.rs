//! Time utilities

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

const MIN_STEP_NANOS: i64 = 1_000_000;

/// Monotonic signing clock.
///
/// Each issued instant is the wall clock, or one millisecond after the previous
/// instant, whichever is later, so consecutive signed requests never share a
/// millisecond timestamp.
///
/// The step only applies on collision. A burst of more than 1000 calls per
/// second therefore runs ahead of the wall clock by one millisecond per excess
/// call, and falls back to the wall clock once the rate drops. Exchanges with a
/// receive window (Binance `recvWindow`, 5s by default) reject requests that
/// run more than the window ahead.
#[derive(Debug, Default)]
pub struct NonceSource {
    last_nanos: AtomicI64,
}

impl NonceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> DateTime<Utc> {
        let now = Utc::now();
        let Some(now_nanos) = now.timestamp_nanos_opt() else {
            return now;
        };
        let mut issued = now_nanos;
        // fetch_update retries until no other thread raced us
        let _ = self
            .last_nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                issued = now_nanos.max(last.saturating_add(MIN_STEP_NANOS));
                Some(issued)
            });
        DateTime::from_timestamp_nanos(issued)
    }
}

/// 밀리초 타임스탬프 문자열
pub fn millis(at: DateTime<Utc>) -> String {
    at.timestamp_millis().to_string()
}

/// 초 타임스탬프 문자열
pub fn seconds(at: DateTime<Utc>) -> String {
    at.timestamp().to_string()
}

/// Nanosecond timestamp, `None` outside the i64 nanosecond range
pub fn nanos(at: DateTime<Utc>) -> Option<String> {
    at.timestamp_nanos_opt().map(|n| n.to_string())
}

/// ISO-8601 UTC with milliseconds, e.g. `2024-01-02T03:04:05.678Z`
pub fn iso8601_millis(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// ISO-8601 UTC without fraction or zone suffix, e.g. `2024-01-02T03:04:05`
pub fn iso8601_seconds(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S").to_string()
}
