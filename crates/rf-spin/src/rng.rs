//! Randomness sources for reel stops

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Capability producing uniform integers in `[0, upper)`.
///
/// The engine never owns a generator; every resolution is handed one, so
/// concurrent resolutions never share a stream.
pub trait StopSource {
    /// Uniform value in `[0, upper)`. `upper` is always at least 1.
    fn next_below(&mut self, upper: usize) -> usize;
}

impl<S: StopSource + ?Sized> StopSource for &mut S {
    fn next_below(&mut self, upper: usize) -> usize {
        (**self).next_below(upper)
    }
}

impl<S: StopSource + ?Sized> StopSource for Box<S> {
    fn next_below(&mut self, upper: usize) -> usize {
        (**self).next_below(upper)
    }
}

/// Production stop generator backed by a ChaCha8 stream
#[derive(Debug, Clone)]
pub struct ReelRng {
    rng: ChaCha8Rng,
}

impl ReelRng {
    /// Seed from operating-system entropy; unpredictable across processes
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_os_rng(),
        }
    }

    /// Seed for reproducible results
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Independent stream `stream` of the generator seeded with `seed`.
    ///
    /// Streams never overlap, so parallel workers can share one seed.
    pub fn stream(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self { rng }
    }
}

impl Default for ReelRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl StopSource for ReelRng {
    fn next_below(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}

/// Replays a fixed cycle of values, each reduced modulo the requested bound.
///
/// Used to pin reel stops in tests and to replay a recorded spin.
#[derive(Debug, Clone)]
pub struct ScriptedStops {
    values: Vec<usize>,
    cursor: usize,
}

impl ScriptedStops {
    /// An empty script yields 0 forever.
    pub fn new(values: impl Into<Vec<usize>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Values handed out so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }

    /// Restart the cycle from its first value
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl StopSource for ScriptedStops {
    fn next_below(&mut self, upper: usize) -> usize {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = ReelRng::seeded(42);
        let mut b = ReelRng::seeded(42);
        let xs: Vec<usize> = (0..32).map(|_| a.next_below(100)).collect();
        let ys: Vec<usize> = (0..32).map(|_| b.next_below(100)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_streams_diverge() {
        let mut a = ReelRng::stream(7, 0);
        let mut b = ReelRng::stream(7, 1);
        let xs: Vec<usize> = (0..32).map(|_| a.next_below(1_000_000)).collect();
        let ys: Vec<usize> = (0..32).map(|_| b.next_below(1_000_000)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_rng_stays_in_range() {
        let mut rng = ReelRng::seeded(1);
        for upper in 1..50 {
            for _ in 0..20 {
                assert!(rng.next_below(upper) < upper);
            }
        }
    }

    #[test]
    fn test_rng_covers_every_stop() {
        let mut rng = ReelRng::seeded(99);
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[rng.next_below(5)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_scripted_cycles_and_wraps() {
        let mut s = ScriptedStops::new(vec![3, 7]);
        assert_eq!(s.next_below(10), 3);
        assert_eq!(s.next_below(5), 2);
        assert_eq!(s.next_below(10), 3);
        assert_eq!(s.drawn(), 3);
        s.rewind();
        assert_eq!(s.next_below(10), 3);
    }
}
