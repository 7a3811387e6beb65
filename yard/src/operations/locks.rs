//! Per-identity mutual exclusion for orchestrator operations.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::environment::EnvironmentId;
use crate::error::{Error, Result};

/// In-process lock table keyed by environment identity.
///
/// A second operation on an identity whose lock is already held is
/// rejected immediately rather than queued; callers retry once the
/// first operation finishes.
#[derive(Debug, Default)]
pub struct IdentityLocks {
    held: Mutex<HashSet<String>>,
}

impl IdentityLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for an identity.
    ///
    /// # Errors
    ///
    /// Returns `OperationInProgress` if the identity is already locked.
    pub fn acquire(&self, id: &EnvironmentId) -> Result<IdentityGuard<'_>> {
        let key = id.to_string();
        let mut held = self.held.lock().expect("lock table poisoned");
        if !held.insert(key.clone()) {
            return Err(Error::OperationInProgress { environment: key });
        }
        Ok(IdentityGuard { locks: self, key })
    }
}

/// Holds an identity lock; released on drop.
#[derive(Debug)]
pub struct IdentityGuard<'a> {
    locks: &'a IdentityLocks,
    key: String,
}

impl Drop for IdentityGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut held) = self.locks.held.lock() {
            held.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Platform;

    fn id(name: &str) -> EnvironmentId {
        EnvironmentId::new(name, "1.0", Platform::Compose).unwrap()
    }

    #[test]
    fn test_second_acquire_rejected_while_held() {
        let locks = IdentityLocks::new();
        let guard = locks.acquire(&id("atlas")).unwrap();

        let err = locks.acquire(&id("atlas")).unwrap_err();
        assert!(matches!(err, Error::OperationInProgress { .. }));

        drop(guard);
        assert!(locks.acquire(&id("atlas")).is_ok());
    }

    #[test]
    fn test_distinct_identities_are_independent() {
        let locks = IdentityLocks::new();
        let _first = locks.acquire(&id("atlas")).unwrap();
        assert!(locks.acquire(&id("borealis")).is_ok());
    }

    #[test]
    fn test_same_name_different_platform_is_distinct() {
        let locks = IdentityLocks::new();
        let _first = locks.acquire(&id("atlas")).unwrap();
        let cluster = EnvironmentId::new("atlas", "1.0", Platform::Cluster).unwrap();
        assert!(locks.acquire(&cluster).is_ok());
    }
}
