//! Calendar helpers for the date-orientation check.
//!
//! Onboarding asks the learner for today's day, month and year. The three
//! fields are composed the way a browser `Date(year, month - 1, day)` would:
//! out-of-range days and months roll over into neighbouring months and
//! two-digit years land in the 1900s.
use chrono::{Datelike, Days, Months, NaiveDate};

/// Source of "today" for the orientation check.
pub trait Clock {
    /// The current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Clock pinned to a single date (tests, scripted runs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Host clock backed by `chrono::Local`. Not available on wasm, where the web
/// crate supplies a clock over `js_sys::Date`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

fn parse_field(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Combine the three onboarding fields into a calendar date.
///
/// Returns `None` when any field is empty or not a plain digit string, or when
/// the rolled-over date falls outside chrono's range.
#[must_use]
pub fn compose_date(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day = parse_field(day)?;
    let month = parse_field(month)?;
    let mut year = parse_field(year)?;
    if (0..=99).contains(&year) {
        year += 1900;
    }

    let base = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, 1, 1)?;
    let month_offset = month - 1;
    let with_month = if month_offset >= 0 {
        base.checked_add_months(Months::new(u32::try_from(month_offset).ok()?))?
    } else {
        base.checked_sub_months(Months::new(u32::try_from(-month_offset).ok()?))?
    };
    let day_offset = day - 1;
    if day_offset >= 0 {
        with_month.checked_add_days(Days::new(u64::try_from(day_offset).ok()?))
    } else {
        with_month.checked_sub_days(Days::new(u64::try_from(-day_offset).ok()?))
    }
}

/// True when the three fields compose to exactly `today`.
#[must_use]
pub fn matches_today(day: &str, month: &str, year: &str, today: NaiveDate) -> bool {
    compose_date(day, month, year).is_some_and(|date| {
        date.day() == today.day() && date.month() == today.month() && date.year() == today.year()
    })
}
