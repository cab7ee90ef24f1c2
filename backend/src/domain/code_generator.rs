//! Unique coupon code generation.
//!
//! Candidates are eight uniform draws from [`CODE_ALPHABET`]. A candidate that
//! collides with a stored code is retried once with a timestamp suffix
//! before a fresh draw. Every candidate is checked against the repository,
//! so a returned code was unique when it was checked. A concurrent issue of
//! the same code is still caught by the unique index at insert time.

use std::sync::Arc;

use mockable::Clock;
use rand::Rng;
use tracing::{debug, warn};

use super::ports::{CouponRepository, CouponRepositoryError};
use super::{CODE_ALPHABET, CODE_LENGTH, CouponCode};

/// Default number of random draws before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Source of random code candidates.
pub trait CodeSource: Send + Sync {
    fn draw(&self) -> CouponCode;
}

/// Thread-local RNG backed source used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeSource;

impl CodeSource for RandomCodeSource {
    fn draw(&self) -> CouponCode {
        let mut rng = rand::thread_rng();
        let mut indices = [0_usize; CODE_LENGTH];
        for index in &mut indices {
            *index = rng.gen_range(0..CODE_ALPHABET.len());
        }
        CouponCode::from_alphabet_indices(indices)
    }
}

/// Failures raised while generating a code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeGenerationError {
    #[error("coupon repository rejected uniqueness check: {0}")]
    Repository(#[from] CouponRepositoryError),
    #[error("no unused coupon code found after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Generates codes that are not yet stored.
#[derive(Clone)]
pub struct CodeGenerator {
    source: Arc<dyn CodeSource>,
    clock: Arc<dyn Clock>,
    max_attempts: u32,
}

impl CodeGenerator {
    /// Create a generator. `max_attempts` is clamped to at least one.
    pub fn new(source: Arc<dyn CodeSource>, clock: Arc<dyn Clock>, max_attempts: u32) -> Self {
        Self {
            source,
            clock,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Produce a code that `repo` does not hold.
    pub async fn generate<R>(&self, repo: &R) -> Result<CouponCode, CodeGenerationError>
    where
        R: CouponRepository + ?Sized,
    {
        for attempt in 1..=self.max_attempts {
            let candidate = self.source.draw();
            if !repo.code_exists(&candidate).await? {
                debug!(attempt, "generated coupon code");
                return Ok(candidate);
            }

            let fallback = candidate.with_timestamp_suffix(self.clock.utc().timestamp_millis());
            warn!(
                attempt,
                collided = %candidate,
                fallback = %fallback,
                "coupon code collision, trying timestamp suffix"
            );
            if !repo.code_exists(&fallback).await? {
                return Ok(fallback);
            }
        }

        Err(CodeGenerationError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
#[path = "code_generator_tests.rs"]
mod tests;
