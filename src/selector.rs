//! Response selection.
//!
//! The matcher decides *which* intent answers; a [`ResponseSelector`] decides
//! which of its responses is returned. Tests swap in deterministic selectors.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Picks one response out of a matched intent's candidates.
pub trait ResponseSelector: Send + Sync {
    /// Returns one element of `responses`, or `None` when it is empty.
    fn choose<'a>(&self, responses: &'a [String]) -> Option<&'a str>;
}

/// Uniform pick from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSelector;

impl ResponseSelector for RandomSelector {
    fn choose<'a>(&self, responses: &'a [String]) -> Option<&'a str> {
        responses.choose(&mut rand::thread_rng()).map(String::as_str)
    }
}

/// Uniform pick from a seeded generator. Same seed, same sequence.
#[derive(Debug)]
pub struct SeededSelector {
    rng: Mutex<StdRng>,
}

impl SeededSelector {
    /// Creates a selector seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ResponseSelector for SeededSelector {
    fn choose<'a>(&self, responses: &'a [String]) -> Option<&'a str> {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        responses.choose(&mut *rng).map(String::as_str)
    }
}

/// Always picks the first response.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstSelector;

impl ResponseSelector for FirstSelector {
    fn choose<'a>(&self, responses: &'a [String]) -> Option<&'a str> {
        responses.first().map(String::as_str)
    }
}
