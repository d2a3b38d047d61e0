use crate::types::SourceHealth;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

/// Health bookkeeping fed by real requests, so health checks never spend API quota
pub(crate) struct HealthTracker {
    /// Millis since epoch, 0 = never
    last_success_ms: AtomicU64,
    /// Outcome of the most recent request; true before any request
    last_ok: AtomicBool,
    success_count: AtomicU64,
    failure_count: AtomicU64,
    last_latency_ms: AtomicU64,
    last_error: Mutex<Option<String>>,
}

impl HealthTracker {
    pub(crate) fn new() -> Self {
        Self {
            last_success_ms: AtomicU64::new(0),
            last_ok: AtomicBool::new(true),
            success_count: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
            last_latency_ms: AtomicU64::new(0),
            last_error: Mutex::new(None),
        }
    }

    pub(crate) fn record_success(&self, latency_ms: u64) {
        let now_ms = Utc::now().timestamp_millis() as u64;
        self.last_success_ms.store(now_ms, Ordering::Relaxed);
        self.last_latency_ms.store(latency_ms, Ordering::Relaxed);
        self.success_count.fetch_add(1, Ordering::Relaxed);
        self.last_ok.store(true, Ordering::Release);
    }

    pub(crate) fn record_failure(&self, error: &str) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_error.lock() {
            *last = Some(error.to_string());
        }
        self.last_ok.store(false, Ordering::Release);
    }

    /// Healthy until the most recent outcome is a failure
    fn is_healthy(&self) -> bool {
        self.last_ok.load(Ordering::Acquire)
    }

    fn success_rate(&self) -> f64 {
        let successes = self.success_count.load(Ordering::Relaxed);
        let failures = self.failure_count.load(Ordering::Relaxed);
        let total = successes + failures;
        if total == 0 {
            return 1.0;
        }
        successes as f64 / total as f64
    }

    pub(crate) fn snapshot(&self, source: &str) -> SourceHealth {
        let last_success_ms = self.last_success_ms.load(Ordering::Relaxed);
        let last_success = if last_success_ms > 0 {
            DateTime::from_timestamp_millis(last_success_ms as i64)
        } else {
            None
        };
        let is_healthy = self.is_healthy();
        let last_error = if is_healthy {
            None
        } else {
            self.last_error.lock().ok().and_then(|e| e.clone())
        };

        SourceHealth {
            source: source.to_string(),
            is_healthy,
            last_success,
            last_error,
            success_rate: self.success_rate(),
            avg_latency_ms: self.last_latency_ms.load(Ordering::Relaxed),
        }
    }
}
