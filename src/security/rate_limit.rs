//! Sliding-window submission rate limiting.
//!
//! Submission timestamps (epoch milliseconds) live in the durable store under
//! `form_submissions` as a JSON array in insertion order. An attempt is
//! admitted while fewer than `max_submissions` of them fall inside the
//! trailing window.
//!
//! # Known race
//! Check and record are separate store operations. The submission controller
//! runs both inside one `&mut self` call, which serializes them within a
//! process, but two processes sharing one durable file can both pass the
//! check before either records.

use std::sync::Arc;

use crate::config::FormConfig;
use crate::storage::{KeyValueStore, StorageError};

/// Durable-store key holding the submission history.
pub const HISTORY_KEY: &str = "form_submissions";

const MINUTE_MS: u64 = 60_000;

/// Result of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Denied {
        /// Milliseconds until one more submission would be admitted.
        retry_after_ms: u64,
    },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Admission::Allowed)
    }

    /// Retry delay rounded up to whole minutes, for display.
    pub fn retry_after_minutes(&self) -> Option<u64> {
        match self {
            Admission::Allowed => None,
            Admission::Denied { retry_after_ms } => Some(retry_after_ms.div_ceil(MINUTE_MS)),
        }
    }
}

/// Client-side rate limiter over the durable store.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn KeyValueStore>,
    max_submissions: usize,
    window_ms: u64,
    history_cap: usize,
}

impl RateLimiter {
    /// A `max_submissions` of zero is treated as one.
    pub fn new(store: Arc<dyn KeyValueStore>, config: &FormConfig) -> Self {
        Self {
            store,
            max_submissions: config.max_submissions.max(1),
            window_ms: config.window_ms,
            history_cap: config.history_cap,
        }
    }

    /// Decide whether an attempt at `now_ms` may proceed. Never mutates state.
    pub fn check_admission(&self, now_ms: u64) -> Result<Admission, StorageError> {
        let mut recent: Vec<u64> = self
            .history()?
            .into_iter()
            .filter(|&ts| ts.saturating_add(self.window_ms) > now_ms)
            .collect();

        if recent.len() < self.max_submissions {
            return Ok(Admission::Allowed);
        }

        // The count drops below the limit once this entry leaves the window.
        recent.sort_unstable();
        let blocking = recent[recent.len() - self.max_submissions];
        let retry_after_ms = blocking.saturating_add(self.window_ms) - now_ms;

        tracing::debug!(
            recent = recent.len(),
            limit = self.max_submissions,
            retry_after_ms,
            "Submission denied by rate limiter"
        );
        Ok(Admission::Denied { retry_after_ms })
    }

    /// Append a successful submission, keeping only the newest `history_cap`.
    pub fn record_submission(&self, now_ms: u64) -> Result<(), StorageError> {
        let mut history = self.history()?;
        history.push(now_ms);
        if history.len() > self.history_cap {
            let excess = history.len() - self.history_cap;
            history.drain(..excess);
        }

        let encoded = serde_json::to_string(&history)?;
        self.store.set(HISTORY_KEY, &encoded)
    }

    /// Stored submission timestamps, oldest first.
    ///
    /// A malformed stored value reads as an empty history.
    pub fn history(&self) -> Result<Vec<u64>, StorageError> {
        let Some(raw) = self.store.get(HISTORY_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(history) => Ok(history),
            Err(e) => {
                tracing::warn!(error = %e, "Submission history is malformed, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Forget every recorded submission.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(HISTORY_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const HOUR_MS: u64 = 3_600_000;
    const NOW: u64 = 1_700_000_000_000;

    fn limiter() -> (RateLimiter, MemoryStore) {
        let store = MemoryStore::new();
        let limiter = RateLimiter::new(Arc::new(store.clone()), &FormConfig::default());
        (limiter, store)
    }

    #[test]
    fn test_empty_history_allows() {
        let (limiter, _) = limiter();
        assert_eq!(limiter.check_admission(NOW).unwrap(), Admission::Allowed);
        assert!(limiter.history().unwrap().is_empty());
    }

    #[test]
    fn test_three_recent_submissions_deny() {
        let (limiter, _) = limiter();
        for offset in [3000, 2000, 1000] {
            limiter.record_submission(NOW - offset).unwrap();
        }

        let admission = limiter.check_admission(NOW).unwrap();
        assert_eq!(admission, Admission::Denied { retry_after_ms: 3_597_000 });
        assert_eq!(admission.retry_after_minutes(), Some(60));
    }

    #[test]
    fn test_denial_does_not_mutate() {
        let (limiter, store) = limiter();
        for offset in [3, 2, 1] {
            limiter.record_submission(NOW - offset).unwrap();
        }
        let before = store.get(HISTORY_KEY).unwrap();
        assert!(!limiter.check_admission(NOW).unwrap().is_allowed());
        assert!(!limiter.check_admission(NOW).unwrap().is_allowed());
        assert_eq!(store.get(HISTORY_KEY).unwrap(), before);
    }

    #[test]
    fn test_window_boundary() {
        let (limiter, _) = limiter();
        // Exactly one window old: outside (now - window, now]
        limiter.record_submission(NOW - HOUR_MS).unwrap();
        limiter.record_submission(NOW - 10).unwrap();
        limiter.record_submission(NOW - 5).unwrap();
        assert!(limiter.check_admission(NOW).unwrap().is_allowed());

        // One millisecond earlier it was still inside
        let admission = limiter.check_admission(NOW - 1).unwrap();
        assert_eq!(admission, Admission::Denied { retry_after_ms: 1 });
        assert_eq!(admission.retry_after_minutes(), Some(1));
    }

    #[test]
    fn test_any_three_in_window_deny_at_any_time() {
        for t in [HOUR_MS, NOW, NOW + 123_456] {
            for spread in [0, 1, 1_000, HOUR_MS - 1] {
                let (limiter, _) = limiter();
                limiter.record_submission(t - spread).unwrap();
                limiter.record_submission(t - spread / 2).unwrap();
                limiter.record_submission(t).unwrap();
                match limiter.check_admission(t).unwrap() {
                    Admission::Denied { retry_after_ms } => assert!(retry_after_ms > 0),
                    Admission::Allowed => panic!("admitted 4th submission at {t} spread {spread}"),
                }
            }
        }
    }

    #[test]
    fn test_history_capped_fifo() {
        let (limiter, _) = limiter();
        for i in 0..15u64 {
            let before = limiter.history().unwrap();
            limiter.record_submission(i).unwrap();
            let after = limiter.history().unwrap();

            assert_eq!(after.len(), (before.len() + 1).min(10));
            assert_eq!(*after.last().unwrap(), i);
            if before.len() == 10 {
                let mut expected = before[1..].to_vec();
                expected.push(i);
                assert_eq!(after, expected);
            }
        }
        assert_eq!(limiter.history().unwrap(), (5..15).collect::<Vec<u64>>());
    }

    #[test]
    fn test_retry_uses_entry_that_unblocks() {
        let store = MemoryStore::new();
        let history = [NOW - 500, NOW - 400, NOW - 300, NOW - 200];
        store
            .set(HISTORY_KEY, &serde_json::to_string(&history).unwrap())
            .unwrap();
        let limiter = RateLimiter::new(Arc::new(store), &FormConfig::default());

        // Four in window, limit three: the second oldest must expire too
        assert_eq!(
            limiter.check_admission(NOW).unwrap(),
            Admission::Denied { retry_after_ms: HOUR_MS - 400 }
        );
    }

    #[test]
    fn test_zero_limit_is_clamped() {
        let store = MemoryStore::new();
        let config = FormConfig {
            max_submissions: 0,
            ..FormConfig::default()
        };
        let limiter = RateLimiter::new(Arc::new(store), &config);

        assert!(limiter.check_admission(1_000).unwrap().is_allowed());
        limiter.record_submission(1_000).unwrap();
        assert_eq!(
            limiter.check_admission(1_500).unwrap(),
            Admission::Denied { retry_after_ms: HOUR_MS - 500 }
        );
    }

    #[test]
    fn test_malformed_history_reads_empty() {
        let (limiter, store) = limiter();
        store.set(HISTORY_KEY, "{oops").unwrap();
        assert!(limiter.history().unwrap().is_empty());
        assert!(limiter.check_admission(NOW).unwrap().is_allowed());

        limiter.record_submission(NOW).unwrap();
        assert_eq!(store.get(HISTORY_KEY).unwrap().as_deref(), Some("[1700000000000]"));
    }

    #[test]
    fn test_clear() {
        let (limiter, _) = limiter();
        limiter.record_submission(NOW).unwrap();
        limiter.clear().unwrap();
        assert!(limiter.history().unwrap().is_empty());
    }
}
