//! Persisted user store.
//!
//! `UserStore` owns the storage backend and a synchronous in-memory copy of
//! the profile. `save` updates the copy before touching the backend, so a
//! caller that navigates right after `save` returns always observes the new
//! profile even if the durable write failed.
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use crate::profile::{ProfileError, UserProfile};

/// Storage key holding the serialized profile.
pub const USER_DATA_KEY: &str = "userData";

/// String key/value backend (browser `localStorage`, an in-memory map, ...).
pub trait ProfileStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write (quota, privacy mode).
    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

/// Where a saved profile ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Written to the backend; survives a reload.
    Durable,
    /// Only held in memory; lost on reload.
    MemoryOnly,
}

impl Persistence {
    #[must_use]
    pub const fn is_durable(self) -> bool {
        matches!(self, Self::Durable)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("refusing to save profile: {0}")]
    Invalid(#[from] ProfileError),
}

#[derive(Debug, Clone, PartialEq)]
enum Cached {
    Unread,
    Loaded(Option<UserProfile>),
}

/// Owner of the current learner's profile.
#[derive(Debug)]
pub struct UserStore<S> {
    storage: S,
    cache: RefCell<Cached>,
}

impl<S: ProfileStorage> UserStore<S> {
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            cache: RefCell::new(Cached::Unread),
        }
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Current profile, reading the backend on first use.
    ///
    /// Absent, unreadable and malformed records all come back as `None`.
    #[must_use]
    pub fn load(&self) -> Option<UserProfile> {
        if let Cached::Loaded(profile) = &*self.cache.borrow() {
            return profile.clone();
        }
        let profile = self.read_durable();
        *self.cache.borrow_mut() = Cached::Loaded(profile.clone());
        profile
    }

    fn read_durable(&self) -> Option<UserProfile> {
        let raw = match self.storage.read(USER_DATA_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                log::warn!("could not read stored profile: {err}");
                return None;
            }
        };
        let profile: UserProfile = match serde_json::from_str(&raw) {
            Ok(profile) => profile,
            Err(err) => {
                log::warn!("ignoring malformed stored profile: {err}");
                return None;
            }
        };
        if let Err(err) = profile.validate() {
            log::warn!("ignoring invalid stored profile: {err}");
            return None;
        }
        Some(profile)
    }

    /// Validate and store `profile`.
    ///
    /// The in-memory copy is updated before the backend write. A failed write
    /// is logged and reported as [`Persistence::MemoryOnly`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when the profile breaks its invariants;
    /// nothing is stored in that case.
    pub fn save(&self, profile: &UserProfile) -> Result<Persistence, StoreError> {
        profile.validate()?;
        *self.cache.borrow_mut() = Cached::Loaded(Some(profile.clone()));

        let encoded = match serde_json::to_string(profile) {
            Ok(encoded) => encoded,
            Err(err) => {
                log::error!("could not encode profile: {err}");
                return Ok(Persistence::MemoryOnly);
            }
        };
        match self.storage.write(USER_DATA_KEY, &encoded) {
            Ok(()) => Ok(Persistence::Durable),
            Err(err) => {
                log::error!("could not persist profile, keeping it in memory: {err}");
                Ok(Persistence::MemoryOnly)
            }
        }
    }

    /// Forget the profile (logout).
    pub fn clear(&self) -> Persistence {
        *self.cache.borrow_mut() = Cached::Loaded(None);
        match self.storage.remove(USER_DATA_KEY) {
            Ok(()) => Persistence::Durable,
            Err(err) => {
                log::error!("could not remove stored profile: {err}");
                Persistence::MemoryOnly
            }
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("memory storage is read-only")]
pub struct ReadOnlyError;

/// In-memory backend; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
    read_only: bool,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that serves reads but rejects every write.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Seed a value directly, bypassing the read-only flag.
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl ProfileStorage for MemoryStorage {
    type Error = ReadOnlyError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        if self.read_only {
            return Err(ReadOnlyError);
        }
        self.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        if self.read_only {
            return Err(ReadOnlyError);
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
