//! Fixture store holding every collection of mock records.

mod collection;

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::inflector::pluralize;
use crate::record::{parse_id, Record};

pub use collection::Collection;

/// In-memory fixture store.
///
/// Collections are keyed by plural resource name (`contacts`); every lookup
/// accepts either the singular type (`contact`) or the plural name.
/// The store is an ordinary value: construct one per test (or per app) and
/// pass it by reference to the handlers that need it.
#[derive(Debug, Default)]
pub struct Store {
    /// Map of plural collection name to collection
    collections: RwLock<HashMap<String, Collection>>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a store preloaded with fixture data.
    pub fn with_data(data: Value) -> Result<Self, StoreError> {
        let store = Self::new();
        store.load_data(data)?;
        Ok(store)
    }

    /// Bulk loads records.
    ///
    /// # Arguments
    /// * `data` - JSON object mapping collection name to an array of record objects,
    ///   e.g. `{"contacts": [{"id": 1, "name": "Link"}], "addresses": [...]}`
    ///
    /// # Returns
    /// `Result<(), StoreError>`; nothing is loaded if any record is invalid.
    pub fn load_data(&self, data: Value) -> Result<(), StoreError> {
        let Value::Object(entries) = data else {
            return Err(StoreError::InvalidData(
                "expected an object of collection name to records".to_string(),
            ));
        };

        let mut parsed = Vec::with_capacity(entries.len());
        for (name, records) in entries {
            let key = pluralize(&name);
            let Value::Array(items) = records else {
                return Err(StoreError::InvalidData(format!(
                    "collection '{}' is not an array",
                    name
                )));
            };
            let records = items
                .into_iter()
                .map(|item| Record::from_value(&key, item))
                .collect::<Result<Vec<_>, _>>()?;
            parsed.push((key, records));
        }

        let mut collections = self.write()?;
        for (key, records) in parsed {
            tracing::info!("Loading {} records into {}", records.len(), key);
            let collection = collections
                .entry(key.clone())
                .or_insert_with(|| Collection::new(key));
            for record in records {
                collection.insert(record);
            }
        }
        Ok(())
    }

    /// Finds a record by type and id.
    pub fn find(&self, resource: &str, id: u64) -> Result<Record, StoreError> {
        let collections = self.read()?;
        let collection = lookup(&collections, resource)?;
        collection.get(id).cloned()
    }

    /// Returns every record of a type, ordered by id.
    pub fn find_all(&self, resource: &str) -> Result<Vec<Record>, StoreError> {
        let collections = self.read()?;
        let collection = lookup(&collections, resource)?;
        Ok(collection.iter().cloned().collect())
    }

    /// Returns the records of a type whose fields equal every filter value.
    pub fn find_query(
        &self,
        resource: &str,
        filters: &Map<String, Value>,
    ) -> Result<Vec<Record>, StoreError> {
        let collections = self.read()?;
        let collection = lookup(&collections, resource)?;
        Ok(collection.filter(filters))
    }

    /// Saves a record.
    ///
    /// With an `id` in `attrs`, the matching record is shallow-merged (or
    /// created if absent). Without one, a new record gets the next free id.
    /// Unknown collections are created on demand.
    pub fn push(&self, resource: &str, attrs: Value) -> Result<Record, StoreError> {
        let key = pluralize(resource);
        let Value::Object(attrs) = attrs else {
            return Err(StoreError::InvalidRecord {
                collection: key,
                reason: "attributes are not a JSON object".to_string(),
            });
        };

        let mut collections = self.write()?;
        let collection = collections
            .entry(key.clone())
            .or_insert_with(|| Collection::new(key));

        let id = match attrs.get("id") {
            Some(Value::Null) | None => None,
            Some(raw) => Some(parse_id(raw).ok_or_else(|| StoreError::InvalidRecord {
                collection: collection.name.clone(),
                reason: format!("id {} is not an integer", raw),
            })?),
        };

        match id {
            Some(id) => match collection.get_mut(id) {
                Ok(existing) => {
                    existing.merge(&attrs);
                    tracing::debug!("Updated {} {}", resource, id);
                    Ok(existing.clone())
                }
                Err(_) => {
                    let mut record = Record::new(id);
                    record.merge(&attrs);
                    collection.insert(record.clone());
                    tracing::debug!("Inserted {} {}", resource, id);
                    Ok(record)
                }
            },
            None => {
                let id = collection.next_id().ok_or_else(|| StoreError::IdExhausted {
                    collection: collection.name.clone(),
                })?;
                let mut record = Record::new(id);
                record.merge(&attrs);
                collection.insert(record.clone());
                tracing::debug!("Inserted {} {}", resource, record.id);
                Ok(record)
            }
        }
    }

    /// Shallow-merges `attrs` into an existing record.
    ///
    /// Keys present in `attrs` overwrite, absent keys are preserved, and an
    /// `id` key in `attrs` is ignored.
    pub fn update(
        &self,
        resource: &str,
        id: u64,
        attrs: &Map<String, Value>,
    ) -> Result<Record, StoreError> {
        let mut collections = self.write()?;
        let collection = lookup_mut(&mut collections, resource)?;
        let record = collection.get_mut(id)?;
        record.merge(attrs);
        tracing::debug!("Updated {} {} ({} fields)", resource, id, attrs.len());
        Ok(record.clone())
    }

    /// Removes a record by type and id.
    pub fn remove(&self, resource: &str, id: u64) -> Result<Record, StoreError> {
        let mut collections = self.write()?;
        let collection = lookup_mut(&mut collections, resource)?;
        let record = collection.remove(id)?;
        tracing::debug!("Removed {} {}", resource, id);
        Ok(record)
    }

    /// Removes every record of a type matching the filters.
    pub fn remove_query(
        &self,
        resource: &str,
        filters: &Map<String, Value>,
    ) -> Result<Vec<Record>, StoreError> {
        let mut collections = self.write()?;
        let collection = lookup_mut(&mut collections, resource)?;
        let removed = collection.remove_matching(filters);
        tracing::debug!("Removed {} records from {}", removed.len(), collection.name);
        Ok(removed)
    }

    /// Returns true if a collection exists for this type.
    pub fn contains(&self, resource: &str) -> Result<bool, StoreError> {
        let collections = self.read()?;
        Ok(collections.contains_key(&pluralize(resource)))
    }

    /// Returns the loaded collection names, sorted.
    pub fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        let collections = self.read()?;
        let mut names: Vec<String> = collections.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Drops every collection.
    pub fn empty_data(&self) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        let count = collections.len();
        collections.clear();
        tracing::info!("Emptied store ({} collections)", count);
        Ok(())
    }

    /// Alias for [`Store::empty_data`], for test teardown code.
    pub fn reset(&self) -> Result<(), StoreError> {
        self.empty_data()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Collection>>, StoreError> {
        self.collections.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Collection>>, StoreError> {
        self.collections.write().map_err(|_| StoreError::LockPoisoned)
    }
}

fn lookup<'a>(
    collections: &'a HashMap<String, Collection>,
    resource: &str,
) -> Result<&'a Collection, StoreError> {
    let key = pluralize(resource);
    collections
        .get(&key)
        .ok_or(StoreError::CollectionNotFound { collection: key })
}

fn lookup_mut<'a>(
    collections: &'a mut HashMap<String, Collection>,
    resource: &str,
) -> Result<&'a mut Collection, StoreError> {
    let key = pluralize(resource);
    match collections.get_mut(&key) {
        Some(collection) => Ok(collection),
        None => Err(StoreError::CollectionNotFound { collection: key }),
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
