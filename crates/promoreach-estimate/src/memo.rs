//! Memoizing wrapper around [`ReachEstimator`].

use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use promoreach_types::{CampaignConfig, CampaignPeriod, Device, Gender, Objective};

use crate::estimator::{ReachEstimate, ReachEstimator};

/// Default number of cached estimates.
pub const DEFAULT_MEMO_CAPACITY: usize = 256;

/// Structural key covering every configuration field.
///
/// The budget is keyed by its bit pattern so that only bit-identical inputs
/// share a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ConfigFingerprint {
    budget_bits: u64,
    period: CampaignPeriod,
    objective: Objective,
    countries: BTreeSet<String>,
    interests: BTreeSet<String>,
    industries: BTreeSet<String>,
    devices: BTreeSet<Device>,
    age_from: i32,
    age_to: i32,
    gender: Gender,
}

impl From<&CampaignConfig> for ConfigFingerprint {
    fn from(config: &CampaignConfig) -> Self {
        Self {
            budget_bits: config.budget.to_bits(),
            period: config.period,
            objective: config.objective,
            countries: config.countries.clone(),
            interests: config.interests.clone(),
            industries: config.industries.clone(),
            devices: config.devices.clone(),
            age_from: config.age_from,
            age_to: config.age_to,
            gender: config.gender,
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoStats {
    /// Entries currently cached.
    pub len: usize,
    /// Maximum number of entries.
    pub capacity: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to compute.
    pub misses: u64,
}

struct MemoState {
    cache: LruCache<ConfigFingerprint, ReachEstimate>,
    hits: u64,
    misses: u64,
}

/// A [`ReachEstimator`] that remembers recent results.
///
/// Purely a performance aid: every answer is identical to calling the
/// wrapped estimator directly.
pub struct MemoizedEstimator {
    estimator: ReachEstimator,
    state: Mutex<MemoState>,
}

impl MemoizedEstimator {
    /// Wraps an estimator with a cache holding up to `capacity` results.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn new(estimator: ReachEstimator, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            estimator,
            state: Mutex::new(MemoState {
                cache: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Returns the wrapped estimator.
    #[must_use]
    pub const fn estimator(&self) -> &ReachEstimator {
        &self.estimator
    }

    /// Estimates reach, reusing a cached result for an identical
    /// configuration.
    pub fn estimate(&self, config: &CampaignConfig) -> ReachEstimate {
        let key = ConfigFingerprint::from(config);
        let mut state = self.lock();

        if let Some(estimate) = state.cache.get(&key).copied() {
            state.hits += 1;
            return estimate;
        }

        let estimate = self.estimator.estimate(config);
        state.misses += 1;
        state.cache.put(key, estimate);
        tracing::debug!(
            cached = state.cache.len(),
            misses = state.misses,
            "reach estimate cache miss"
        );
        estimate
    }

    /// Drops all cached results and resets the statistics.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.cache.clear();
        state.hits = 0;
        state.misses = 0;
    }

    /// Returns cache statistics.
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        let state = self.lock();
        MemoStats {
            len: state.cache.len(),
            capacity: state.cache.cap().get(),
            hits: state.hits,
            misses: state.misses,
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoState> {
        // The cache holds plain values; a panic elsewhere can't leave it torn.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoizedEstimator {
    fn default() -> Self {
        Self::new(ReachEstimator::default(), DEFAULT_MEMO_CAPACITY)
    }
}

impl std::fmt::Debug for MemoizedEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoizedEstimator")
            .field("estimator", &self.estimator)
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config(budget: f64) -> CampaignConfig {
        CampaignConfig::new(
            budget,
            CampaignPeriod::unchecked(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            ),
            Objective::Awareness,
        )
    }

    #[test]
    fn test_matches_direct_estimate() {
        let memo = MemoizedEstimator::default();
        let direct = ReachEstimator::default();

        for budget in [0.0, 10.0, 50.0, 10.0, 0.0] {
            assert_eq!(memo.estimate(&config(budget)), direct.estimate(&config(budget)));
        }

        let stats = memo.stats();
        assert_eq!(stats.misses, 3);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.len, 3);
    }

    #[test]
    fn test_changed_field_is_not_served_from_cache() {
        let memo = MemoizedEstimator::default();
        let first = memo.estimate(&config(50.0));
        let targeted = memo.estimate(&config(50.0).with_countries(["US", "CA"]));

        assert_ne!(first, targeted);
        assert_eq!(targeted.impressions, 28_000);
        assert_eq!(memo.stats().hits, 0);

        let later = memo.estimate(&config(50.0).with_objective(Objective::Traffic));
        assert_eq!(later.clicks, 4_200);
        assert_eq!(memo.stats().misses, 3);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let memo = MemoizedEstimator::new(ReachEstimator::default(), 2);
        memo.estimate(&config(1.0));
        memo.estimate(&config(2.0));
        memo.estimate(&config(3.0));
        assert_eq!(memo.stats().len, 2);

        memo.estimate(&config(1.0));
        assert_eq!(memo.stats().misses, 4);
    }

    #[test]
    fn test_zero_capacity_and_clear() {
        let memo = MemoizedEstimator::new(ReachEstimator::default(), 0);
        assert_eq!(memo.stats().capacity, 1);

        memo.estimate(&config(5.0));
        memo.estimate(&config(5.0));
        assert_eq!(memo.stats().hits, 1);

        memo.clear();
        assert_eq!(memo.stats(), MemoStats {
            len: 0,
            capacity: 1,
            hits: 0,
            misses: 0,
        });
    }

    #[test]
    fn test_shared_across_threads() {
        let memo = std::sync::Arc::new(MemoizedEstimator::default());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let memo = std::sync::Arc::clone(&memo);
                std::thread::spawn(move || memo.estimate(&config(f64::from(i % 2) * 10.0)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let stats = memo.stats();
        assert_eq!(stats.hits + stats.misses, 4);
        assert_eq!(stats.len, 2);
    }
}
