//! HazMente training engine
//!
//! Platform-agnostic core of the cognitive-training app: onboarding, the
//! persisted learner profile, the exercise catalog and the session
//! controller. Browser and filesystem specifics live behind the
//! [`ResourceLoader`] and [`ProfileStorage`] traits.

pub mod calendar;
pub mod catalog;
pub mod content;
pub mod guard;
pub mod history;
pub mod onboarding;
pub mod profile;
pub mod roster;
pub mod session;
pub mod store;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use calendar::{Clock, FixedClock, compose_date, matches_today};
#[cfg(not(target_arch = "wasm32"))]
pub use calendar::SystemClock;
pub use catalog::{
    CATALOG_PATH, CatalogError, ContentSource, ExerciseCatalog, ExerciseDescriptor, ExerciseKind,
    ResolvedExercise, UnknownExercise, load_for_level,
};
pub use content::{HistoricalEvent, ReadingPassage, WritingPrompt};
pub use guard::{LoadGeneration, LoadTicket};
pub use history::{EVENT_HISTORY_KEY, EXERCISE_HISTORY_KEY, RecentHistory};
pub use onboarding::{Onboarding, OnboardingError, OnboardingStep};
pub use profile::{ProfileError, UserProfile};
pub use roster::{Roster, RosterEntry};
pub use session::{CompletionOutcome, SessionController, SessionError, SessionPhase};
pub use store::{MemoryStorage, Persistence, ProfileStorage, StoreError, USER_DATA_KEY, UserStore};

/// Path of the roster document relative to the data root.
pub const ROSTER_PATH: &str = "data/users.json";

/// Trait for abstracting resource loading.
/// Platform-specific implementations fetch documents by relative path.
pub trait ResourceLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the text of the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read.
    fn load_text(&self, path: &str) -> Result<String, Self::Error>;
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not load {path}: {message}")]
    Resource { path: String, message: String },
    #[error("malformed document {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Onboarding(#[from] OnboardingError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Binds a resource loader and a storage backend into one training engine.
pub struct TrainingEngine<L, S>
where
    L: ResourceLoader,
    S: ProfileStorage,
{
    loader: L,
    store: UserStore<S>,
}

impl<L, S> TrainingEngine<L, S>
where
    L: ResourceLoader,
    S: ProfileStorage,
{
    pub const fn new(loader: L, storage: S) -> Self {
        Self {
            loader,
            store: UserStore::new(storage),
        }
    }

    #[must_use]
    pub const fn user_store(&self) -> &UserStore<S> {
        &self.store
    }

    #[must_use]
    pub const fn loader(&self) -> &L {
        &self.loader
    }

    fn load_text(&self, path: &str) -> Result<String, EngineError> {
        self.loader
            .load_text(path)
            .map_err(|err| EngineError::Resource {
                path: path.to_string(),
                message: err.to_string(),
            })
    }

    /// Load and parse any JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be loaded or parsed.
    pub fn load_document<T: DeserializeOwned>(&self, path: &str) -> Result<T, EngineError> {
        let text = self.load_text(path)?;
        serde_json::from_str(&text).map_err(|source| EngineError::Malformed {
            path: path.to_string(),
            source,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the roster cannot be loaded or parsed.
    pub fn load_roster(&self) -> Result<Roster, EngineError> {
        self.load_document(ROSTER_PATH)
    }

    #[must_use]
    pub const fn start_onboarding(&self) -> Onboarding {
        Onboarding::new()
    }

    /// Confirm the wizard and persist the resulting profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the wizard is not at confirmation or the profile
    /// is refused by the store.
    pub fn finish_onboarding(
        &self,
        wizard: &mut Onboarding,
    ) -> Result<(UserProfile, Persistence), EngineError> {
        let profile = wizard.confirm()?;
        let persistence = self.store.save(&profile)?;
        Ok((profile, persistence))
    }

    /// Profile that lets the learner skip onboarding, if one is stored.
    #[must_use]
    pub fn resume(&self) -> Option<UserProfile> {
        self.store.load()
    }

    pub fn logout(&self) -> Persistence {
        self.store.clear()
    }

    /// Load the catalog for `level` and start a session on it.
    ///
    /// # Errors
    ///
    /// Returns a catalog error when the catalog cannot be loaded, is
    /// malformed, or has nothing for `level`.
    pub fn start_session(&self, level: u32) -> Result<SessionController, EngineError> {
        let text = self
            .loader
            .load_text(CATALOG_PATH)
            .map_err(|err| CatalogError::Fetch {
                path: CATALOG_PATH.to_string(),
                message: err.to_string(),
            })?;
        let exercises = load_for_level(&text, level)?;
        Ok(SessionController::new(exercises)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FixtureLoader {
        files: HashMap<&'static str, &'static str>,
    }

    #[derive(Debug, Error)]
    #[error("missing fixture")]
    struct MissingFixture;

    impl ResourceLoader for FixtureLoader {
        type Error = MissingFixture;

        fn load_text(&self, path: &str) -> Result<String, Self::Error> {
            self.files
                .get(path)
                .map(|text| (*text).to_string())
                .ok_or(MissingFixture)
        }
    }

    fn fixture_loader() -> FixtureLoader {
        let mut files = HashMap::new();
        files.insert(
            ROSTER_PATH,
            r#"{"users":[{"name":"Maria","level":2}]}"#,
        );
        files.insert(
            CATALOG_PATH,
            r#"{"exercises":[
                {"title":"Suma","componentName":"MathExercise","duration":60,"minLevel":1},
                {"title":"Sudoku","componentName":"SudokuGame","duration":60,"minLevel":3}
            ]}"#,
        );
        FixtureLoader { files }
    }

    #[test]
    fn engine_runs_onboarding_into_a_session() {
        let engine = TrainingEngine::new(fixture_loader(), MemoryStorage::new());
        assert!(engine.resume().is_none());

        let roster = engine.load_roster().unwrap();
        let mut wizard = engine.start_onboarding();
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        wizard.submit_name("maria", &roster).unwrap();
        wizard.submit_day("18").unwrap();
        wizard.submit_month("10").unwrap();
        wizard.submit_year("2026", today).unwrap();
        let (profile, persistence) = engine.finish_onboarding(&mut wizard).unwrap();
        assert_eq!(persistence, Persistence::Durable);
        assert_eq!(engine.resume(), Some(profile.clone()));

        let session = engine.start_session(profile.level).unwrap();
        assert_eq!(session.total(), 1);
        assert_eq!(engine.logout(), Persistence::Durable);
        assert!(engine.resume().is_none());
    }

    #[test]
    fn missing_catalog_is_a_fetch_error() {
        let engine = TrainingEngine::new(FixtureLoader::default(), MemoryStorage::new());
        let err = engine.start_session(1).unwrap_err();
        assert!(matches!(err, EngineError::Catalog(CatalogError::Fetch { .. })));
        assert!(matches!(
            engine.load_roster().unwrap_err(),
            EngineError::Resource { .. }
        ));
    }

    #[test]
    fn finish_before_confirmation_fails() {
        let engine = TrainingEngine::new(fixture_loader(), MemoryStorage::new());
        let mut wizard = engine.start_onboarding();
        assert!(matches!(
            engine.finish_onboarding(&mut wizard),
            Err(EngineError::Onboarding(OnboardingError::WrongStep { .. }))
        ));
    }
}
