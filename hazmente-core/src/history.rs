//! Recently shown content, so prompts and events do not repeat back to back.
use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::store::ProfileStorage;

/// Storage key for the writing-prompt history.
pub const EXERCISE_HISTORY_KEY: &str = "exerciseHistory";
/// Storage key for the historical events already shown in this cycle.
pub const EVENT_HISTORY_KEY: &str = "eventHistory";
/// How many ids the persisted history remembers.
pub const MAX_HISTORY_SIZE: usize = 15;

/// Content items with a stable numeric id.
pub trait Identified {
    fn id(&self) -> u32;
}

/// Bounded list of recently shown ids, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentHistory {
    ids: VecDeque<u32>,
    capacity: usize,
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::with_capacity(MAX_HISTORY_SIZE)
    }
}

impl RecentHistory {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Read a history saved under `key`. Missing or malformed data starts
    /// an empty history.
    pub fn load<S: ProfileStorage>(storage: &S, key: &str) -> Self {
        let mut history = Self::default();
        match storage.read(key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<u32>>(&raw) {
                Ok(ids) => {
                    history.ids = ids.into_iter().take(history.capacity).collect();
                }
                Err(err) => log::warn!("ignoring malformed {key}: {err}"),
            },
            Ok(None) => {}
            Err(err) => log::warn!("could not read {key}: {err}"),
        }
        history
    }

    /// Write the history under `key`; failures are logged.
    pub fn persist<S: ProfileStorage>(&self, storage: &S, key: &str) {
        let ids: Vec<u32> = self.ids.iter().copied().collect();
        let encoded = match serde_json::to_string(&ids) {
            Ok(encoded) => encoded,
            Err(err) => {
                log::error!("could not encode {key}: {err}");
                return;
            }
        };
        if let Err(err) = storage.write(key, &encoded) {
            log::error!("could not persist {key}: {err}");
        }
    }

    /// Push `ids` to the front, keeping their order and dropping the oldest
    /// entries past capacity.
    pub fn record<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = u32>,
        I::IntoIter: DoubleEndedIterator,
    {
        for id in ids.into_iter().rev() {
            self.ids.push_front(id);
        }
        self.ids.truncate(self.capacity);
    }

    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.ids.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Pick up to `count` items, preferring ones absent from `recent`.
///
/// When too few fresh items remain, every fresh item is taken and the rest
/// is filled with a random selection of already-seen ones.
pub fn pick_fresh<'a, T, R>(
    items: &'a [T],
    recent: &RecentHistory,
    count: usize,
    rng: &mut R,
) -> Vec<&'a T>
where
    T: Identified,
    R: Rng + ?Sized,
{
    let (fresh, seen): (Vec<&T>, Vec<&T>) =
        items.iter().partition(|item| !recent.contains(item.id()));
    if fresh.len() >= count {
        return fresh.choose_multiple(rng, count).copied().collect();
    }
    let needed = count - fresh.len();
    let mut picked = fresh;
    picked.extend(seen.choose_multiple(rng, needed).copied());
    picked
}
