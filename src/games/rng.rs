//! Random outcome source
//!
//! Leaf dependency of every game evaluator. Handlers plug in the
//! thread-local generator; tests plug in a scripted sequence to force
//! specific draws.

use rand::rngs::ThreadRng;
use rand::Rng;

/// Uniform integer source for game outcomes
pub trait OutcomeSource {
    /// Draw uniformly from `0..bound`. `bound` must be nonzero.
    fn draw(&mut self, bound: u32) -> u32;
}

/// Production source backed by the thread-local generator
#[derive(Default)]
pub struct ThreadRngSource {
    rng: ThreadRng,
}

impl ThreadRngSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutcomeSource for ThreadRngSource {
    fn draw(&mut self, bound: u32) -> u32 {
        self.rng.gen_range(0..bound)
    }
}

/// Fisher-Yates shuffle over the injected source; every permutation is
/// equally likely when the source is uniform.
pub fn shuffle<T>(items: &mut [T], source: &mut dyn OutcomeSource) {
    for i in (1..items.len()).rev() {
        let j = source.draw(i as u32 + 1) as usize;
        items.swap(i, j);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedSource;
    use super::*;

    #[test]
    fn test_thread_rng_respects_bound() {
        let mut source = ThreadRngSource::new();
        for _ in 0..1000 {
            assert!(source.draw(13) < 13);
        }
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut source = ThreadRngSource::new();
        let mut items: Vec<u32> = (0..52).collect();
        shuffle(&mut items, &mut source);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..52).collect::<Vec<_>>());
    }

    #[test]
    fn test_scripted_shuffle_is_deterministic() {
        // Swapping with index 0 at every step: [1,2,3,4] -> [4,2,3,1]
        // -> [3,2,4,1] -> [2,3,4,1]
        let mut source = ScriptedSource::new(vec![0, 0, 0]);
        let mut items = vec![1, 2, 3, 4];
        shuffle(&mut items, &mut source);
        assert_eq!(items, vec![2, 3, 4, 1]);
    }
}
