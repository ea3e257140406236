//! Session gate
//!
//! Decides whether a booking may be dispatched by looking up the session
//! marker in the persisted key-value store. The store is read-only from here
//! and any read failure counts as "no session".

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use log::{debug, warn};

use crate::{config::app::BookingConfig, error::StoreError};

/// Read access to the persisted key-value store.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }
}

impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }
}

/// Process-local store, used where no browser storage exists.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(key, value);
        store
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.write().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) {
        self.write().remove(key);
    }

    // A writer that panicked leaves a complete map behind, so poisoning is
    // recovered instead of dropping the operation.
    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.entries.write().unwrap_or_else(|poisoned| {
            warn!("Session store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read().get(key).cloned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// A session marker exists; the booking may be dispatched.
    Dispatch,
    /// No session; the user is asked to log in first.
    RequireLogin,
}

pub struct SessionGate<S> {
    store: S,
    key: String,
}

impl<S: SessionStore> SessionGate<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Gate reading the session marker under `config.session_key`.
    pub fn from_config(store: S, config: &BookingConfig) -> Self {
        Self::new(store, config.session_key.clone())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Any stored value, even an empty one, counts as a session.
    pub fn has_session(&self) -> bool {
        match self.store.get(&self.key) {
            Ok(marker) => marker.is_some(),
            Err(err) => {
                warn!("Session lookup for {} failed, treating as logged out: {}", self.key, err);
                false
            }
        }
    }

    pub fn decide(&self) -> GateDecision {
        let decision = if self.has_session() {
            GateDecision::Dispatch
        } else {
            GateDecision::RequireLogin
        };
        debug!("Session gate decision: {:?}", decision);
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Malformed {
                key: key.to_string(),
            })
        }
    }

    #[test]
    fn test_missing_marker_requires_login() {
        let gate = SessionGate::new(InMemorySessionStore::new(), "email");
        assert_eq!(gate.decide(), GateDecision::RequireLogin);
    }

    #[test]
    fn test_present_marker_dispatches() {
        let gate = SessionGate::new(InMemorySessionStore::with_entry("email", "a@b.co"), "email");
        assert_eq!(gate.decide(), GateDecision::Dispatch);
    }

    #[test]
    fn test_empty_marker_still_counts() {
        let gate = SessionGate::new(InMemorySessionStore::with_entry("email", ""), "email");
        assert!(gate.has_session());
    }

    #[test]
    fn test_other_keys_ignored() {
        let gate = SessionGate::new(InMemorySessionStore::with_entry("token", "x"), "email");
        assert!(!gate.has_session());
    }

    #[test]
    fn test_store_failure_fails_safe() {
        let gate = SessionGate::new(BrokenStore, "email");
        assert_eq!(gate.decide(), GateDecision::RequireLogin);
    }

    #[test]
    fn test_key_from_config() {
        let config = BookingConfig {
            session_key: "token".to_string(),
            ..BookingConfig::default()
        };
        let gate = SessionGate::from_config(InMemorySessionStore::with_entry("token", "x"), &config);
        assert_eq!(gate.key(), "token");
        assert_eq!(gate.decide(), GateDecision::Dispatch);
    }

    #[test]
    fn test_poisoned_store_keeps_accepting_writes() {
        let store = Arc::new(InMemorySessionStore::new());
        let poisoner = store.clone();
        let result = std::thread::spawn(move || {
            let _guard = poisoner.entries.write().unwrap();
            panic!("writer died");
        })
        .join();
        assert!(result.is_err());
        assert!(store.entries.is_poisoned());

        store.set("email", "a@b.co");
        assert_eq!(store.get("email").unwrap(), Some("a@b.co".to_string()));
        store.remove("email");
        assert_eq!(store.get("email").unwrap(), None);
    }

    #[test]
    fn test_shared_store_sees_updates() {
        let store = Arc::new(InMemorySessionStore::new());
        let gate = SessionGate::new(store.clone(), "email");
        assert!(!gate.has_session());
        store.set("email", "a@b.co");
        assert!(gate.has_session());
        store.remove("email");
        assert!(!gate.has_session());
    }
}
