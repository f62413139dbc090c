use std::hash::{DefaultHasher, Hash, Hasher};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Ways a [`RandomProvider`] can be misused.
///
/// Both variants indicate programming errors in the caller; neither is retried.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum RandomError {
    /// A draw was requested before [`RandomProvider::initialize`] was called.
    #[error("random provider used before initialization")]
    NotInitialized,
    /// `next_int` was called with an empty range.
    #[error("invalid range [{min}, {max})")]
    InvalidRange {
        /// The offending lower bound.
        min: i64,
        /// The offending upper bound (exclusive).
        max: i64,
    },
}

/// A seeded deterministic pseudo-random source.
///
/// Two providers initialized with the same seed must produce identical output for identical call
/// sequences; everything reproducible about a generated level rests on this. Providers are owned
/// by the caller and passed by reference through the generation call chain, so independent
/// generations never share random state.
pub trait RandomProvider {
    /// Reset internal state deterministically from `seed`.
    fn initialize(&mut self, seed: &str);
    /// Draw an integer uniformly from `[min, max)`.
    fn next_int(&mut self, min: i64, max: i64) -> Result<i64, RandomError>;
    /// Draw a float uniformly from `[0, 1)`.
    fn next_float(&mut self) -> Result<f64, RandomError>;
    /// Permute `items` in place with a Fisher-Yates pass driven by this provider's stream.
    fn shuffle<T>(&mut self, items: &mut [T]) -> Result<(), RandomError>;
}

/// The standard [`RandomProvider`]: a [`SmallRng`] keyed by hashing the seed string.
///
/// The seed hash uses [`DefaultHasher`] with its fixed default keys, so the mapping from seed
/// string to stream is stable across processes.
#[derive(Clone, Debug, Default)]
pub struct SeededRandom {
    rng: Option<SmallRng>,
}

impl SeededRandom {
    /// Construct an uninitialized provider. Any draw before [`initialize`](RandomProvider::initialize)
    /// fails with [`RandomError::NotInitialized`].
    pub fn new() -> Self {
        Self::default()
    }

    fn rng(&mut self) -> Result<&mut SmallRng, RandomError> {
        self.rng.as_mut().ok_or(RandomError::NotInitialized)
    }
}

fn seed_to_u64(seed: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    hasher.finish()
}

impl RandomProvider for SeededRandom {
    fn initialize(&mut self, seed: &str) {
        self.rng = Some(SmallRng::seed_from_u64(seed_to_u64(seed)));
    }

    fn next_int(&mut self, min: i64, max: i64) -> Result<i64, RandomError> {
        if max <= min {
            return Err(RandomError::InvalidRange { min, max });
        }

        Ok(self.rng()?.gen_range(min..max))
    }

    fn next_float(&mut self) -> Result<f64, RandomError> {
        Ok(self.rng()?.gen::<f64>())
    }

    fn shuffle<T>(&mut self, items: &mut [T]) -> Result<(), RandomError> {
        items.shuffle(self.rng()?);
        Ok(())
    }
}
