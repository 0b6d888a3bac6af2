use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::pipeline::Reconstruction;

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Cached { age: Duration },
}

#[derive(Debug, Clone)]
pub struct CacheLookup {
    pub reconstruction: Arc<Reconstruction>,
    pub freshness: Freshness,
}

struct CacheEntry {
    reconstruction: Arc<Reconstruction>,
    stored_at: Instant,
}

/// Single-slot memo of the last successful reconstruction.
///
/// Created once at startup and shared for the life of the process. The TTL check,
/// the recompute and the store all happen under one lock, so concurrent callers
/// never recompute twice.
///
/// If the caller is dropped while computing (client disconnect), the lock is released
/// without storing anything and the next waiter recomputes from scratch.
pub struct ResultCache {
    ttl: Duration,
    slot: Mutex<Option<CacheEntry>>,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        ResultCache {
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub async fn get_or_compute<F, Fut, E>(
        &self,
        force_refresh: bool,
        compute: F,
    ) -> Result<CacheLookup, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Reconstruction, E>>,
    {
        let mut slot = self.slot.lock().await;

        if !force_refresh {
            if let Some(entry) = slot.as_ref() {
                let age = entry.stored_at.elapsed();
                if age < self.ttl {
                    return Ok(CacheLookup {
                        reconstruction: entry.reconstruction.clone(),
                        freshness: Freshness::Cached { age },
                    });
                }
            }
        }

        // A failed compute returns early and leaves the previous entry in place.
        let reconstruction = Arc::new(compute().await?);
        *slot = Some(CacheEntry {
            reconstruction: reconstruction.clone(),
            stored_at: Instant::now(),
        });

        Ok(CacheLookup {
            reconstruction,
            freshness: Freshness::Fresh,
        })
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
