#![forbid(unsafe_code)]

//! Seeded random source for random selection.

use web_time::{SystemTime, UNIX_EPOCH};

/// Small LCG; deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    /// Seed from the wall clock.
    #[must_use]
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(nanos)
    }

    /// Next raw value.
    pub fn next_u64(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform index in `0..n`. Returns `None` when `n == 0`.
    ///
    /// Uses the high bits (multiply-shift), which are the well mixed ones
    /// for an LCG.
    pub fn below(&mut self, n: usize) -> Option<usize> {
        if n == 0 {
            return None;
        }
        let wide = u128::from(self.next_u64()) * n as u128;
        Some((wide >> 64) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRng::new(9);
        let mut b = SeededRng::new(9);
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededRng::new(1);
        let mut b = SeededRng::new(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn below_stays_in_range() {
        let mut rng = SeededRng::new(0);
        for n in 1..50 {
            for _ in 0..20 {
                assert!(rng.below(n).unwrap() < n);
            }
        }
        assert_eq!(rng.below(0), None);
    }

    #[test]
    fn below_covers_every_bucket() {
        let mut rng = SeededRng::new(1234);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[rng.below(7).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
