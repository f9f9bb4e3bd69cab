//! Random source port
//!
//! Generators never reach for a global RNG. They take a `&mut impl RandomSource`,
//! so tests can pass a seeded generator and production code can pass the OS
//! cryptographic RNG (for identifiers) or a thread-local RNG (for everything else).

use rand::RngCore;

pub trait RandomSource {
    /// Fills `dest` with random bytes.
    fn fill(&mut self, dest: &mut [u8]);

    /// Returns a uniformly distributed 32-bit word.
    fn random_u32(&mut self) -> u32;

    /// Returns a float in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        f64::from(self.random_u32()) / 4_294_967_296.0
    }

    /// Returns an index in `0..bound`. `bound` must be non-zero.
    fn below(&mut self, bound: usize) -> usize {
        let idx = (self.unit() * bound as f64) as usize;
        idx.min(bound.saturating_sub(1))
    }

    /// Returns a float in `[low, high)`.
    fn between(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.unit()
    }
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn fill(&mut self, dest: &mut [u8]) {
        self.fill_bytes(dest);
    }

    fn random_u32(&mut self) -> u32 {
        self.next_u32()
    }
}

/// Reproducible generator keyed on a user-visible seed.
///
/// Each draw takes the fractional part of `sin(seed) * 10000` and bumps the
/// seed by one, so the same seed always yields the same sequence.
#[derive(Debug, Clone)]
pub struct SineRandom {
    seed: f64,
}

impl SineRandom {
    pub fn new(seed: u64) -> Self {
        Self { seed: seed as f64 }
    }

    fn next_fraction(&mut self) -> f64 {
        let x = self.seed.sin() * 10_000.0;
        self.seed += 1.0;
        x - x.floor()
    }
}

impl RngCore for SineRandom {
    fn next_u32(&mut self) -> u32 {
        (self.next_fraction() * 4_294_967_296.0).min(4_294_967_295.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sine_random_is_reproducible() {
        let mut a = SineRandom::new(42);
        let mut b = SineRandom::new(42);
        let xs: Vec<u32> = (0..16).map(|_| a.random_u32()).collect();
        let ys: Vec<u32> = (0..16).map(|_| b.random_u32()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_sine_random_differs_by_seed() {
        let mut a = SineRandom::new(1);
        let mut b = SineRandom::new(2);
        assert_ne!(a.random_u32(), b.random_u32());
    }

    #[test]
    fn test_below_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(rng.below(10) < 10);
        }
        assert_eq!(rng.below(1), 0);
    }

    #[test]
    fn test_unit_range() {
        let mut rng = SineRandom::new(3);
        for _ in 0..1000 {
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_fill_handles_partial_chunks() {
        let mut rng = SineRandom::new(9);
        let mut buf = [0u8; 7];
        rng.fill(&mut buf);
        assert!(buf.iter().any(|b| *b != 0));
    }
}
