use std::time::Duration;

use rand::Rng;

/// Base delay after a step that mutated the bank.
pub const BASE_COOLDOWN_MS: u64 = 476;
/// Width of the random extra delay added to [`BASE_COOLDOWN_MS`].
pub const JITTER_SPAN_MS: u64 = 300;
/// Delay after a step that did not touch the bank.
pub const MIN_COOLDOWN_MS: u64 = 10;

/// Delays inserted between scheduler steps.
///
/// Mutating steps wait `base_ms + uniform[0, jitter_ms)` so exchanges never
/// land on a fixed cadence. Steps that only looked wait `min_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    pub base_ms: u64,
    pub jitter_ms: u64,
    pub min_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            base_ms: BASE_COOLDOWN_MS,
            jitter_ms: JITTER_SPAN_MS,
            min_ms: MIN_COOLDOWN_MS,
        }
    }
}

impl PacingConfig {
    pub fn jittered<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let extra = if self.jitter_ms == 0 {
            0
        } else {
            rng.gen_range(0..self.jitter_ms)
        };
        Duration::from_millis(self.base_ms + extra)
    }

    #[inline]
    pub fn minimal(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn jittered_stays_within_bounds() {
        let pacing = PacingConfig::default();
        let mut rng = StdRng::seed_from_u64(7);

        let mut lowest = u128::MAX;
        let mut highest = 0;
        for _ in 0..10_000 {
            let ms = pacing.jittered(&mut rng).as_millis();
            assert!((476..776).contains(&ms), "cooldown {ms}ms out of range");
            lowest = lowest.min(ms);
            highest = highest.max(ms);
        }
        // Spread over the whole window, not a fixed cadence.
        assert!(lowest < 500);
        assert!(highest > 750);
    }

    #[test]
    fn minimal_is_ten_millis() {
        assert_eq!(PacingConfig::default().minimal(), Duration::from_millis(10));
    }

    #[test]
    fn zero_jitter_is_fixed() {
        let pacing = PacingConfig {
            base_ms: 20,
            jitter_ms: 0,
            min_ms: 1,
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pacing.jittered(&mut rng), Duration::from_millis(20));
    }
}
