//! Test utilities for the itinerary backend.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`, via
//! the `test-support` feature).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ItineraryPrompt;
use crate::domain::ports::{GenerationError, ItineraryGenerator};

/// Clock whose current time only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => panic!("failed to convert {delta:?} to TimeDelta: {error}"),
        };
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex poisoned"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Generator double that replays scripted outcomes and records prompts.
///
/// Once the script is exhausted every further call fails with
/// [`GenerationError::EmptyResponse`].
#[derive(Default)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    /// Build a generator answering with `plans` in order.
    pub fn with_plans<I, S>(plans: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_outcomes(plans.into_iter().map(|plan| Ok(plan.into())))
    }

    /// Build a generator replaying arbitrary outcomes in order.
    pub fn with_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Result<String, GenerationError>>,
    {
        Self {
            script: Mutex::new(outcomes.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Number of `generate` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        match self.prompts.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => panic!("prompt log poisoned"),
        }
    }
}

#[async_trait]
impl ItineraryGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &ItineraryPrompt) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.prompts.lock() {
            Ok(mut guard) => guard.push(prompt.to_string()),
            Err(_) => panic!("prompt log poisoned"),
        }
        let next = match self.script.lock() {
            Ok(mut guard) => guard.pop_front(),
            Err(_) => panic!("generator script poisoned"),
        };
        next.unwrap_or_else(|| Err(GenerationError::empty_response()))
    }
}
