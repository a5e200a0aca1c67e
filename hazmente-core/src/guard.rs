//! Stale-response guard for asynchronous loads.
//!
//! A view takes a ticket before starting a fetch and checks it when the
//! response lands. Starting a newer load or unmounting the view invalidates
//! every outstanding ticket.
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct LoadGeneration {
    current: Rc<Cell<u64>>,
}

#[derive(Debug, Clone)]
pub struct LoadTicket {
    current: Rc<Cell<u64>>,
    issued: u64,
}

impl LoadGeneration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load, superseding any earlier ticket.
    #[must_use]
    pub fn begin(&self) -> LoadTicket {
        let issued = self.current.get().wrapping_add(1);
        self.current.set(issued);
        LoadTicket {
            current: Rc::clone(&self.current),
            issued,
        }
    }

    /// Drop interest in every outstanding load (unmount).
    pub fn invalidate(&self) {
        self.current.set(self.current.get().wrapping_add(1));
    }
}

impl LoadTicket {
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current.get() == self.issued
    }

    /// Pass `value` through only while the ticket is current.
    pub fn accept<T>(&self, value: T) -> Option<T> {
        if self.is_current() {
            Some(value)
        } else {
            log::debug!("discarding stale response for load #{}", self.issued);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_load_supersedes_older() {
        let generation = LoadGeneration::new();
        let first = generation.begin();
        assert!(first.is_current());
        let second = generation.begin();
        assert!(!first.is_current());
        assert_eq!(first.accept(1), None);
        assert_eq!(second.accept(2), Some(2));
    }

    #[test]
    fn invalidate_discards_everything() {
        let generation = LoadGeneration::new();
        let ticket = generation.begin();
        generation.invalidate();
        assert!(!ticket.is_current());
        assert!(generation.begin().is_current());
    }
}
