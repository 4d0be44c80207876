// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exponential backoff with jitter between polls.

use fc_core::WaitConfig;
use rand::Rng;
use std::time::Duration;

/// Delay schedule for one wait.
///
/// Attempt `n` sleeps a random duration in `[min, min * 2^(n-1)]`. Once the
/// exponential ceiling would pass `max`, every further attempt sleeps `max`.
#[derive(Debug, Clone)]
pub struct Backoff {
    min_ms: u64,
    max_ms: u64,
    attempt_ceiling: f64,
    attempt: u32,
}

fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Backoff {
    pub fn new(config: &WaitConfig) -> Self {
        let min_ms = saturating_millis(config.min_delay).max(1);
        let max_ms = saturating_millis(config.max_delay).max(min_ms);
        Self {
            min_ms,
            max_ms,
            attempt_ceiling: (max_ms as f64 / min_ms as f64).log2() + 1.0,
            attempt: 0,
        }
    }

    /// Number of delays handed out so far.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Delay before the next poll.
    pub fn next_delay(&mut self) -> Duration {
        self.attempt = self.attempt.saturating_add(1);
        self.delay_for(self.attempt, &mut rand::rng())
    }

    pub(crate) fn delay_for(&self, attempt: u32, rng: &mut impl Rng) -> Duration {
        if f64::from(attempt) > self.attempt_ceiling {
            return Duration::from_millis(self.max_ms);
        }
        let factor = 1u64
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u64::MAX);
        let ceiling = self.min_ms.saturating_mul(factor).min(self.max_ms);
        Duration::from_millis(rng.random_range(self.min_ms..=ceiling))
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
