//! Browser bindings for the training engine
//!
//! Re-exports the core types and provides the browser implementations of
//! its traits: documents fetched over HTTP into a cache, `localStorage`
//! for the profile and the JS clock for "today".

use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub use hazmente_core::*;

/// Engine type used by the web app.
pub type WebEngine = TrainingEngine<PrefetchLoader, WebStorage>;

/// Resource loader backed by documents fetched ahead of use.
///
/// The core reads synchronously, so the app fetches a document with
/// [`PrefetchLoader::prefetch`] first and then hands control to the engine.
#[derive(Clone, Default)]
pub struct PrefetchLoader {
    documents: Rc<RefCell<HashMap<String, String>>>,
}

#[derive(Debug, thiserror::Error)]
pub enum PrefetchError {
    #[error("{0} has not been fetched")]
    NotFetched(String),
    #[error("fetching {path} failed: {message}")]
    Network { path: String, message: String },
}

impl PrefetchLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` as the body of `path`.
    pub fn insert(&self, path: &str, text: impl Into<String>) {
        self.documents
            .borrow_mut()
            .insert(path.to_string(), text.into());
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.documents.borrow().contains_key(path)
    }

    /// Fetch `path` from the static assets and cache the body.
    ///
    /// # Errors
    /// Returns [`PrefetchError::Network`] if the request fails or the server
    /// answers with a non-2xx status.
    #[allow(clippy::future_not_send)]
    pub async fn prefetch(&self, path: &str) -> Result<(), PrefetchError> {
        let url = crate::paths::data_url(path);
        let text = crate::dom::fetch_text(&url)
            .await
            .map_err(|message| PrefetchError::Network {
                path: path.to_string(),
                message,
            })?;
        self.insert(path, text);
        Ok(())
    }
}

impl ResourceLoader for PrefetchLoader {
    type Error = PrefetchError;

    fn load_text(&self, path: &str) -> Result<String, Self::Error> {
        self.documents
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| PrefetchError::NotFetched(path.to_string()))
    }
}

/// Profile storage on `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebStorage;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("localStorage unavailable: {0}")]
    Unavailable(String),
    #[error("localStorage rejected {key}: {message}")]
    Rejected { key: String, message: String },
}

impl ProfileStorage for WebStorage {
    type Error = WebStorageError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let storage = crate::dom::local_storage().map_err(WebStorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|err| WebStorageError::Rejected {
                key: key.to_string(),
                message: crate::dom::js_error_message(&err),
            })
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let storage = crate::dom::local_storage().map_err(WebStorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|err| WebStorageError::Rejected {
                key: key.to_string(),
                message: crate::dom::js_error_message(&err),
            })
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        let storage = crate::dom::local_storage().map_err(WebStorageError::Unavailable)?;
        storage
            .remove_item(key)
            .map_err(|err| WebStorageError::Rejected {
                key: key.to_string(),
                message: crate::dom::js_error_message(&err),
            })
    }
}

/// "Today" according to the browser's local time zone.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    #[cfg(target_arch = "wasm32")]
    fn today(&self) -> NaiveDate {
        let now = js_sys::Date::new_0();
        NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
            .unwrap_or_default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn today(&self) -> NaiveDate {
        SystemClock.today()
    }
}

/// Shared engine handle usable as a component prop.
#[derive(Clone)]
pub struct EngineHandle(Rc<WebEngine>);

impl EngineHandle {
    #[must_use]
    pub fn new(engine: WebEngine) -> Self {
        Self(Rc::new(engine))
    }
}

impl PartialEq for EngineHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for EngineHandle {
    type Target = WebEngine;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Create the engine the web app runs on.
#[must_use]
pub fn create_web_engine() -> WebEngine {
    TrainingEngine::new(PrefetchLoader::new(), WebStorage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_serves_only_prefetched_documents() {
        let loader = PrefetchLoader::new();
        assert!(matches!(
            loader.load_text(ROSTER_PATH),
            Err(PrefetchError::NotFetched(_))
        ));
        loader.insert(ROSTER_PATH, r#"{"users":[{"name":"Ana","level":2}]}"#);
        assert!(loader.contains(ROSTER_PATH));

        let engine = TrainingEngine::new(loader, MemoryStorage::new());
        let roster = engine.load_roster().unwrap();
        assert_eq!(roster.find("ana").map(|entry| entry.level), Some(2));
    }

    #[test]
    fn clones_share_the_document_cache() {
        let loader = PrefetchLoader::new();
        let engine = TrainingEngine::new(loader.clone(), MemoryStorage::new());
        loader.insert(
            CATALOG_PATH,
            r#"{"exercises":[{"title":"Cálculo","componentName":"MathExercise","duration":60,"minLevel":1}]}"#,
        );
        let session = engine.start_session(1).unwrap();
        assert_eq!(session.total(), 1);
    }

    #[test]
    fn storage_without_a_browser_reads_nothing_and_refuses_writes() {
        let engine = create_web_engine();
        assert!(engine.resume().is_none());
        let profile = UserProfile {
            name: "Ana".into(),
            day: "18".into(),
            month: "10".into(),
            year: "2026".into(),
            level: 2,
        };
        assert_eq!(
            engine.user_store().save(&profile).unwrap(),
            Persistence::MemoryOnly
        );
        assert_eq!(engine.resume(), Some(profile));
    }
}
