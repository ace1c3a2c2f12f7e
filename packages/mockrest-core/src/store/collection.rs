use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::record::Record;

/// Records of a single resource type, ordered by id.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Plural collection name, e.g. "contacts"
    pub name: String,
    records: BTreeMap<u64, Record>,
}

impl Collection {
    /// Creates an empty collection.
    pub fn new(name: String) -> Self {
        Self {
            name,
            records: BTreeMap::new(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Next id to assign: one past the highest id in use.
    ///
    /// `None` once `u64::MAX` is taken.
    pub fn next_id(&self) -> Option<u64> {
        match self.records.keys().next_back() {
            Some(id) => id.checked_add(1),
            None => Some(1),
        }
    }

    pub fn get(&self, id: u64) -> Result<&Record, StoreError> {
        self.records.get(&id).ok_or_else(|| self.not_found(id))
    }

    pub fn get_mut(&mut self, id: u64) -> Result<&mut Record, StoreError> {
        match self.records.get_mut(&id) {
            Some(record) => Ok(record),
            None => Err(StoreError::RecordNotFound {
                collection: self.name.clone(),
                id,
            }),
        }
    }

    /// Inserts or replaces a record.
    pub fn insert(&mut self, record: Record) -> Option<Record> {
        self.records.insert(record.id, record)
    }

    pub fn remove(&mut self, id: u64) -> Result<Record, StoreError> {
        match self.records.remove(&id) {
            Some(record) => Ok(record),
            None => Err(self.not_found(id)),
        }
    }

    /// Records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Records matching every filter, in id order.
    pub fn filter(&self, filters: &Map<String, Value>) -> Vec<Record> {
        self.records
            .values()
            .filter(|record| record.matches(filters))
            .cloned()
            .collect()
    }

    /// Removes and returns every record matching the filters.
    pub fn remove_matching(&mut self, filters: &Map<String, Value>) -> Vec<Record> {
        let ids: Vec<u64> = self
            .records
            .values()
            .filter(|record| record.matches(filters))
            .map(|record| record.id)
            .collect();
        ids.into_iter()
            .filter_map(|id| self.records.remove(&id))
            .collect()
    }

    fn not_found(&self, id: u64) -> StoreError {
        StoreError::RecordNotFound {
            collection: self.name.clone(),
            id,
        }
    }
}
