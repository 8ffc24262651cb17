//! One-shot section reveal
//!
//! Sections are observed until they first intersect the viewport. At that
//! point they fade in and are dropped from the observed set, so later
//! intersection reports for the same section are ignored.

use std::cell::RefCell;

/// What to do with one intersection report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealStep {
    /// Not intersecting, or already revealed.
    Ignore,
    /// Add the fade-in class and stop observing.
    Reveal,
}

/// Set of sections still waiting for their first intersection.
#[derive(Debug)]
pub struct RevealTracker<E> {
    pending: RefCell<Vec<E>>,
}

impl<E> Default for RevealTracker<E> {
    fn default() -> Self {
        Self {
            pending: RefCell::new(Vec::new()),
        }
    }
}

impl<E: Clone + PartialEq> RevealTracker<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing `sections`. Sections already observed are skipped.
    pub fn observe(&self, sections: &[E]) {
        let mut pending = self.pending.borrow_mut();
        for section in sections {
            if !pending.contains(section) {
                pending.push(section.clone());
            }
        }
    }

    pub fn is_observed(&self, section: &E) -> bool {
        self.pending.borrow().contains(section)
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Handle one report from the observer.
    pub fn on_entry(&self, section: &E, is_intersecting: bool) -> RevealStep {
        if !is_intersecting {
            return RevealStep::Ignore;
        }
        let mut pending = self.pending.borrow_mut();
        match pending.iter().position(|candidate| candidate == section) {
            Some(index) => {
                pending.swap_remove(index);
                RevealStep::Reveal
            }
            None => RevealStep::Ignore,
        }
    }
}
