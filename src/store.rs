//! Canonical record storage
//!
//! `RecordSet` is a keyed record collection that preserves insertion order.
//! Allocation scans depend on that order: the first zone-matching container
//! wins, where "first" means earliest inserted.

use std::collections::HashMap;

use crate::model::{Container, Item};

/// Keyed records with stable insertion-order iteration.
///
/// `put` on an existing key overwrites in place (last-write-wins) without
/// moving the record's slot in the iteration order.
#[derive(Debug)]
pub struct RecordSet<T> {
    records: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for RecordSet<T> {
    fn default() -> Self {
        RecordSet::new()
    }
}

impl<T> RecordSet<T> {
    pub fn new() -> Self {
        RecordSet {
            records: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.records.get_mut(id)
    }

    /// Insert or overwrite the record under `id`.
    pub fn put(&mut self, id: impl Into<String>, record: T) {
        let id = id.into();
        if self.records.insert(id.clone(), record).is_none() {
            self.order.push(id);
        }
    }

    /// Remove the record under `id`, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let removed = self.records.remove(id);
        if removed.is_some() {
            self.order.retain(|k| k != id);
        }
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// `(id, record)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &T)> {
        self.order.iter().map(move |id| (id, &self.records[id]))
    }

    /// Records in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.order.iter().map(move |id| &self.records[id])
    }
}

/// The single shared store of container and item records.
///
/// Every component reads and mutates records only through this struct; the
/// owning [`Stowage`](crate::Stowage) context serializes access.
#[derive(Debug, Default)]
pub struct EntityStore {
    pub containers: RecordSet<Container>,
    pub items: RecordSet<Item>,
}

impl EntityStore {
    pub fn new() -> Self {
        EntityStore {
            containers: RecordSet::new(),
            items: RecordSet::new(),
        }
    }
}
