//! API credential pool with atomic rotation.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error_handling::InitializationError;

/// An ordered pool of API keys with a shared rotation cursor.
///
/// Concurrent callers read the cursor without locking; rotation after a
/// failure uses compare-and-swap so two callers observing the same failed
/// index advance the cursor once, not twice. The cursor persists across
/// requests: a key that worked stays current for the next call.
pub struct CredentialPool {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl CredentialPool {
    /// Creates a pool from an ordered key list. At least one key is required.
    pub fn new(keys: Vec<String>) -> Result<Self, InitializationError> {
        if keys.is_empty() {
            return Err(InitializationError::NoCredentials);
        }
        Ok(CredentialPool {
            keys,
            cursor: AtomicUsize::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Index of the credential a new request should try first.
    pub fn current_index(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }

    pub fn key_at(&self, index: usize) -> &str {
        &self.keys[index % self.keys.len()]
    }

    /// Advances the cursor past a failed index, modulo pool size.
    ///
    /// No-op if another caller already rotated away from `observed`, so a
    /// burst of concurrent failures on one key consumes a single rotation.
    pub fn rotate_from(&self, observed: usize) {
        let next = (observed + 1) % self.keys.len();
        let _ = self
            .cursor
            .compare_exchange(observed, next, Ordering::SeqCst, Ordering::SeqCst);
    }
}
