//! Onboarding wizard: name, then today's day, month and year.
//!
//! The machine only moves forward when the submitted value is valid. The
//! year step compares the composed date with the real current date; a
//! mismatch sends the learner back to the day step while keeping the name
//! and level already accepted.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar;
use crate::profile::UserProfile;
use crate::roster::Roster;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnboardingStep {
    Name,
    Day,
    Month,
    Year,
    Confirmation,
    Complete,
}

impl OnboardingStep {
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Name | Self::Complete => None,
            Self::Day => Some(Self::Name),
            Self::Month => Some(Self::Day),
            Self::Year => Some(Self::Month),
            Self::Confirmation => Some(Self::Year),
        }
    }

    /// Progress bar fill for the step, 25 points per input step.
    #[must_use]
    pub const fn progress_percent(self) -> u8 {
        match self {
            Self::Name => 25,
            Self::Day => 50,
            Self::Month => 75,
            Self::Year | Self::Confirmation | Self::Complete => 100,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
            Self::Confirmation => "confirmation",
            Self::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OnboardingError {
    #[error("no learner named {0:?} in the roster")]
    UnknownUser(String),
    #[error("day must be one or two digits (got {0:?})")]
    InvalidDay(String),
    #[error("month must be between 1 and 12 (got {0:?})")]
    InvalidMonth(String),
    #[error("year must be one to four digits (got {0:?})")]
    InvalidYear(String),
    #[error("{day}/{month}/{year} is not today's date")]
    DateMismatch {
        day: String,
        month: String,
        year: String,
    },
    #[error("expected the {expected:?} step, wizard is at {actual:?}")]
    WrongStep {
        expected: OnboardingStep,
        actual: OnboardingStep,
    },
}

impl OnboardingError {
    /// Stable identifier used to pick a translated message.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownUser(_) => "unknown_user",
            Self::InvalidDay(_) => "invalid_day",
            Self::InvalidMonth(_) => "invalid_month",
            Self::InvalidYear(_) => "invalid_year",
            Self::DateMismatch { .. } => "date_mismatch",
            Self::WrongStep { .. } => "wrong_step",
        }
    }
}

fn digits_between(raw: &str, min_len: usize, max_len: usize) -> bool {
    (min_len..=max_len).contains(&raw.len()) && raw.chars().all(|c| c.is_ascii_digit())
}

/// State of one onboarding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Onboarding {
    step: OnboardingStep,
    name: String,
    level: Option<u32>,
    day: String,
    month: String,
    year: String,
    error: Option<OnboardingError>,
}

impl Default for Onboarding {
    fn default() -> Self {
        Self::new()
    }
}

impl Onboarding {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: OnboardingStep::Name,
            name: String::new(),
            level: None,
            day: String::new(),
            month: String::new(),
            year: String::new(),
            error: None,
        }
    }

    #[must_use]
    pub const fn step(&self) -> OnboardingStep {
        self.step
    }

    #[must_use]
    pub const fn progress_percent(&self) -> u8 {
        self.step.progress_percent()
    }

    /// Last validation failure, cleared by the next successful submit or `back`.
    #[must_use]
    pub const fn error(&self) -> Option<&OnboardingError> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn level(&self) -> Option<u32> {
        self.level
    }

    #[must_use]
    pub fn day(&self) -> &str {
        &self.day
    }

    #[must_use]
    pub fn month(&self) -> &str {
        &self.month
    }

    #[must_use]
    pub fn year(&self) -> &str {
        &self.year
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self.step, OnboardingStep::Complete)
    }

    fn expect_step(&self, expected: OnboardingStep) -> Result<(), OnboardingError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(OnboardingError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    fn fail(&mut self, err: OnboardingError) -> Result<(), OnboardingError> {
        self.error = Some(err.clone());
        Err(err)
    }

    fn advance(&mut self, next: OnboardingStep) {
        self.error = None;
        self.step = next;
    }

    /// Accept a name when the roster knows it; the roster's spelling and
    /// level are kept.
    ///
    /// # Errors
    ///
    /// [`OnboardingError::UnknownUser`] keeps the wizard on the name step.
    pub fn submit_name(&mut self, input: &str, roster: &Roster) -> Result<(), OnboardingError> {
        self.expect_step(OnboardingStep::Name)?;
        let Some(entry) = roster.find(input) else {
            return self.fail(OnboardingError::UnknownUser(input.trim().to_string()));
        };
        self.name.clone_from(&entry.name);
        self.level = Some(entry.level);
        self.advance(OnboardingStep::Day);
        Ok(())
    }

    /// # Errors
    ///
    /// [`OnboardingError::InvalidDay`] unless the input is one or two digits.
    pub fn submit_day(&mut self, input: &str) -> Result<(), OnboardingError> {
        self.expect_step(OnboardingStep::Day)?;
        let input = input.trim();
        if !digits_between(input, 1, 2) {
            return self.fail(OnboardingError::InvalidDay(input.to_string()));
        }
        self.day = input.to_string();
        self.advance(OnboardingStep::Month);
        Ok(())
    }

    /// # Errors
    ///
    /// [`OnboardingError::InvalidMonth`] unless the input is a month number.
    pub fn submit_month(&mut self, input: &str) -> Result<(), OnboardingError> {
        self.expect_step(OnboardingStep::Month)?;
        let input = input.trim();
        let valid = digits_between(input, 1, 2)
            && input.parse::<u8>().is_ok_and(|month| (1..=12).contains(&month));
        if !valid {
            return self.fail(OnboardingError::InvalidMonth(input.to_string()));
        }
        self.month = input.to_string();
        self.advance(OnboardingStep::Year);
        Ok(())
    }

    /// Check the composed date against `today`.
    ///
    /// # Errors
    ///
    /// [`OnboardingError::InvalidYear`] keeps the wizard on the year step.
    /// [`OnboardingError::DateMismatch`] sends it back to the day step with
    /// the date fields cleared.
    pub fn submit_year(&mut self, input: &str, today: NaiveDate) -> Result<(), OnboardingError> {
        self.expect_step(OnboardingStep::Year)?;
        let input = input.trim();
        if !digits_between(input, 1, 4) {
            return self.fail(OnboardingError::InvalidYear(input.to_string()));
        }
        if !calendar::matches_today(&self.day, &self.month, input, today) {
            let err = OnboardingError::DateMismatch {
                day: std::mem::take(&mut self.day),
                month: std::mem::take(&mut self.month),
                year: input.to_string(),
            };
            self.year.clear();
            self.step = OnboardingStep::Day;
            return self.fail(err);
        }
        self.year = input.to_string();
        self.advance(OnboardingStep::Confirmation);
        Ok(())
    }

    /// Finish the wizard and hand back the profile to persist.
    ///
    /// # Errors
    ///
    /// [`OnboardingError::WrongStep`] unless the wizard is at confirmation.
    pub fn confirm(&mut self) -> Result<UserProfile, OnboardingError> {
        self.expect_step(OnboardingStep::Confirmation)?;
        let Some(level) = self.level else {
            return Err(OnboardingError::WrongStep {
                expected: OnboardingStep::Name,
                actual: self.step,
            });
        };
        self.advance(OnboardingStep::Complete);
        Ok(UserProfile {
            name: self.name.clone(),
            day: self.day.clone(),
            month: self.month.clone(),
            year: self.year.clone(),
            level,
        })
    }

    /// Step back once. Returns `false` at the name step and once complete.
    pub fn back(&mut self) -> bool {
        match self.step.previous() {
            Some(previous) => {
                self.advance(previous);
                true
            }
            None => false,
        }
    }
}
