//! Per-key registry of pending generations.
//!
//! Concurrent misses for the same key join the generation started by the
//! first caller instead of issuing their own. Each generation runs as its own
//! task, so it finishes and writes back even when every waiter has gone away.
//! The task removes its registry entry once it settles, so later requests go
//! back to the store.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use tracing::{Instrument, Span};

use crate::domain::{ItineraryRecord, TraceId};
use crate::domain::ports::{ItineraryCacheKey, ItineraryError};

type Resolution = Result<ItineraryRecord, ItineraryError>;
type PendingResolution = Shared<BoxFuture<'static, Resolution>>;
type PendingMap = HashMap<ItineraryCacheKey, (u64, PendingResolution)>;

#[derive(Default)]
pub(crate) struct InFlightRegistry {
    pending: Arc<Mutex<PendingMap>>,
    next_id: AtomicU64,
}

impl InFlightRegistry {
    /// Await the pending generation for `key`, spawning one from `start` when
    /// none is registered.
    ///
    /// The returned flag is `true` when this call joined an existing
    /// generation.
    pub(crate) async fn run_or_join<F, Fut>(
        &self,
        key: &ItineraryCacheKey,
        start: F,
    ) -> (Resolution, bool)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Resolution> + Send + 'static,
    {
        let (pending, joined) = {
            let mut registry = lock(&self.pending);
            match registry.get(key) {
                Some((_, existing)) => (existing.clone(), true),
                None => {
                    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                    let pending = self.spawn(key.clone(), id, start());
                    registry.insert(key.clone(), (id, pending.clone()));
                    (pending, false)
                }
            }
        };

        (pending.await, joined)
    }

    fn spawn<Fut>(&self, key: ItineraryCacheKey, id: u64, generation: Fut) -> PendingResolution
    where
        Fut: Future<Output = Resolution> + Send + 'static,
    {
        let registry = Arc::clone(&self.pending);
        let task = async move {
            let outcome = generation.await;
            // A newer generation registered under the same key is left alone.
            let mut pending = lock(&registry);
            if pending.get(&key).is_some_and(|(current, _)| *current == id) {
                pending.remove(&key);
            }
            outcome
        }
        .instrument(Span::current());

        let handle = match TraceId::current() {
            Some(trace_id) => tokio::spawn(TraceId::scope(trace_id, task)),
            None => tokio::spawn(task),
        };

        handle
            .map(|joined| {
                joined.unwrap_or_else(|error| {
                    Err(ItineraryError::Interrupted {
                        message: error.to_string(),
                    })
                })
            })
            .boxed()
            .shared()
    }

    #[cfg(test)]
    pub(crate) fn pending_len(&self) -> usize {
        lock(&self.pending).len()
    }
}

fn lock(pending: &Mutex<PendingMap>) -> MutexGuard<'_, PendingMap> {
    // The map stays consistent across a panicking holder: every critical
    // section is a single get/insert/remove.
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}
