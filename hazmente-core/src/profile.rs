//! The single active learner.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persisted identity of the learner.
///
/// `day`, `month` and `year` keep the digit strings typed during onboarding;
/// they are only used to confirm date orientation. `level` is resolved from
/// the roster when the name is accepted and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub day: String,
    pub month: String,
    pub year: String,
    pub level: u32,
}

/// Reasons a profile is refused by the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("profile name is empty")]
    EmptyName,
    #[error("level must be at least 1 (got {0})")]
    InvalidLevel(u32),
}

impl UserProfile {
    /// Check the invariants a stored profile must hold.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] when the name is blank or the level is zero.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if self.level < 1 {
            return Err(ProfileError::InvalidLevel(self.level));
        }
        Ok(())
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}
