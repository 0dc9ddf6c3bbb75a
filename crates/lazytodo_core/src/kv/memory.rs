//! Process-local key-value store.
//!
//! Clones share the same slots, so a caller can keep a handle for
//! inspection while a repository owns another.

use super::{KeyValueStore, KvError, KvResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory slot store backed by a shared map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `get` calls fail with `KvError::Unavailable`.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent `set` calls fail with `KvError::Unavailable`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of written slots.
    pub fn len(&self) -> KvResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> KvResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> KvResult<MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|_| KvError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(KvError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(KvError::Unavailable("writes disabled".to_string()));
        }
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
