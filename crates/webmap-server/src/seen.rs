use crate::counters::Counters;
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};
use webmap_common::UnitPos;

/// Units rendered at least once since the last world start
pub struct SeenSet {
    keys: RwLock<HashSet<u64>>,
    counters: Arc<Counters>,
}

impl SeenSet {
    pub fn new(counters: Arc<Counters>) -> Self {
        Self {
            keys: RwLock::new(HashSet::new()),
            counters,
        }
    }

    pub fn mark_seen(&self, unit: UnitPos) {
        self.keys
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(unit.packed());
    }

    pub fn is_unseen(&self, unit: UnitPos) -> bool {
        !self
            .keys
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&unit.packed())
    }

    /// Forgets every unit and zeroes the render/upload counters
    pub fn reset(&self) {
        self.keys
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.counters.reset_activity();
    }

    pub fn len(&self) -> usize {
        self.keys.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
