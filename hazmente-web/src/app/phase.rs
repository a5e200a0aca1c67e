use crate::training::{EngineError, SessionController};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Boot,
    Onboarding,
    Exercises,
}

/// Where the startup gate sends a learner.
#[must_use]
pub const fn gate_phase(has_profile: bool) -> Phase {
    if has_profile {
        Phase::Exercises
    } else {
        Phase::Onboarding
    }
}

/// Status of an asynchronous document load shown to the learner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    /// The catalog loaded but nothing is available at the learner's level.
    Empty,
    Failed(String),
}

/// Map the result of starting a session to the status and session to show.
#[must_use]
pub fn catalog_outcome(
    result: Result<SessionController, EngineError>,
) -> (LoadStatus, Option<SessionController>) {
    match result {
        Ok(session) => (LoadStatus::Ready, Some(session)),
        Err(EngineError::Catalog(err)) if err.is_empty_for_level() => {
            log::warn!("{err}");
            (LoadStatus::Empty, None)
        }
        Err(err) => {
            log::error!("exercise catalog unavailable: {err}");
            (LoadStatus::Failed(err.to_string()), None)
        }
    }
}

/// Pick one of `count` message variants. The same seed and salt always
/// give the same variant so re-renders do not reshuffle text.
#[must_use]
pub fn variant_index(seed: u64, salt: u64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    SmallRng::seed_from_u64(seed ^ salt.rotate_left(17)).gen_range(0..count)
}

/// Seed for per-visit choices (greeting, proverb, messages).
#[must_use]
pub fn entropy_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().to_bits()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0x5EED_u64
    }
}
