//! Per-key async locks for preview rendering.

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

/// A set of async mutexes created on demand, one per key.
///
/// An entry lives only while some task holds or waits for it.
#[derive(Debug)]
pub struct KeyedLocks<K: Eq + Hash> {
    locks: Arc<DashMap<K, Arc<Mutex<()>>>>,
}

impl<K: Eq + Hash> Clone for KeyedLocks<K> {
    fn clone(&self) -> Self {
        Self {
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<K: Eq + Hash> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self {
            locks: Arc::new(DashMap::new()),
        }
    }
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    /// Create an empty lock set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `work` while holding the lock for `key`.
    pub async fn run<T>(&self, key: K, work: impl Future<Output = T>) -> T {
        let lock = Arc::clone(self.locks.entry(key.clone()).or_default().value());
        let result = {
            let _guard = lock.lock().await;
            work.await
        };
        drop(lock);
        self.locks.remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);
        result
    }

    /// Whether no key is currently locked or awaited.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_key_is_serialized() {
        let locks = KeyedLocks::new();
        let inside = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let work = || {
            let inside = Arc::clone(&inside);
            let peak = Arc::clone(&peak);
            async move {
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                inside.fetch_sub(1, Ordering::SeqCst);
            }
        };

        tokio::join!(
            locks.run("max", work()),
            locks.run("max", work()),
            locks.run("max", work()),
        );

        assert_eq!(peak.load(Ordering::SeqCst), 1);
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = KeyedLocks::new();
        let (a, b) = tokio::join!(locks.run(1u32, async { 1 }), locks.run(2u32, async { 2 }));
        assert_eq!((a, b), (1, 2));
        assert!(locks.is_empty());
    }
}
