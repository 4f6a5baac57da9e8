use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Remembers the nonces a server has accepted so that a captured request cannot be replayed.
#[async_trait]
pub trait NonceStore: Send + Sync {
    /// Record `nonce` for credential `id` and return whether it had not been seen before.
    ///
    /// `timestamp` is the request's timestamp and `now` the server's clock, both in seconds.
    async fn check(&self, id: &str, nonce: &str, timestamp: i64, now: i64) -> bool;
}

/// An in-memory [`NonceStore`].
///
/// Nonces are only kept while their timestamp is within `window` seconds of the current time;
/// requests older than that fail the timestamp check anyway.
#[derive(Debug)]
pub struct MemoryNonceStore {
    window: i64,
    seen: Mutex<HashMap<(String, String), i64>>,
}

impl MemoryNonceStore {
    pub fn new(window: i64) -> Self {
        MemoryNonceStore {
            window,
            seen: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryNonceStore {
    fn default() -> Self {
        MemoryNonceStore::new(60)
    }
}

#[async_trait]
impl NonceStore for MemoryNonceStore {
    async fn check(&self, id: &str, nonce: &str, timestamp: i64, now: i64) -> bool {
        let window = self.window;
        let mut seen = self.seen.lock();
        seen.retain(|_, ts| ts.saturating_sub(now).saturating_abs() <= window);
        seen.insert((id.to_string(), nonce.to_string()), timestamp)
            .is_none()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_replay() {
        let store = MemoryNonceStore::default();
        assert!(block_on(store.check("id", "n1", 1000, 1000)));
        assert!(!block_on(store.check("id", "n1", 1000, 1001)));
        // the same nonce under another id is a different request
        assert!(block_on(store.check("other", "n1", 1000, 1001)));
        assert!(block_on(store.check("id", "n2", 1000, 1001)));
    }

    #[test]
    fn test_pruning() {
        let store = MemoryNonceStore::new(10);
        assert!(block_on(store.check("id", "n1", 1000, 1000)));
        assert!(block_on(store.check("id", "n2", 1005, 1005)));
        assert_eq!(store.len(), 2);
        assert!(block_on(store.check("id", "n3", 1020, 1020)));
        assert_eq!(store.len(), 1);
    }
}
