//! GET handler: single records, collections, and related records.

use mockrest_core::inflector::pluralize;
use mockrest_core::{MockConfig, Record, Store, StoreError};
use serde_json::{Map, Value};

use super::request_utils::{
    foreign_key, ids_key, keyed, records_value, resolve_id, resolve_resource,
};
use super::{ControllerError, Shorthand};
use crate::request::MockRequest;

/// Reads from the store.
///
/// - undefined or string shorthand with an id: `{"contact": {...}}`
/// - undefined or string shorthand without an id: `{"contacts": [...]}`,
///   filtered by the query params
/// - array shorthand without an id: one key per collection
/// - array shorthand with an id: the first entry's record plus the related
///   records of every other entry
pub(super) fn handle(
    shorthand: &Shorthand,
    store: &Store,
    request: &MockRequest,
    config: &MockConfig,
) -> Result<Value, ControllerError> {
    let id = resolve_id(request, config);
    match shorthand {
        Shorthand::Resources(names) => match id {
            Some(id) => record_with_related(names, id, store, request, config),
            None => collections(names, store),
        },
        Shorthand::Resource(name) => {
            single_or_collection(Some(name.as_str()), id, store, request, config)
        }
        _ => single_or_collection(None, id, store, request, config),
    }
}

fn single_or_collection(
    explicit: Option<&str>,
    id: Option<u64>,
    store: &Store,
    request: &MockRequest,
    config: &MockConfig,
) -> Result<Value, ControllerError> {
    let resource = resolve_resource(explicit, request, config)?;
    match id {
        Some(id) => {
            let record = store.find(&resource, id)?;
            Ok(keyed(resource, record.to_value()))
        }
        None => {
            let records = if request.query_params.is_empty() {
                store.find_all(&resource)?
            } else {
                store.find_query(&resource, &request.query_params)?
            };
            Ok(keyed(pluralize(&resource), records_value(&records)))
        }
    }
}

fn collections(names: &[String], store: &Store) -> Result<Value, ControllerError> {
    if names.is_empty() {
        return Err(ControllerError::UnresolvableResource(
            "empty resource array".to_string(),
        ));
    }
    let mut body = Map::with_capacity(names.len());
    for name in names {
        let records = store.find_all(name)?;
        body.insert(pluralize(name), records_value(&records));
    }
    Ok(Value::Object(body))
}

fn record_with_related(
    names: &[String],
    id: u64,
    store: &Store,
    request: &MockRequest,
    config: &MockConfig,
) -> Result<Value, ControllerError> {
    let Some((owner, related)) = names.split_first() else {
        return Err(ControllerError::UnresolvableResource(
            "empty resource array".to_string(),
        ));
    };
    let resource = resolve_resource(Some(owner.as_str()), request, config)?;
    let record = store.find(&resource, id)?;

    let mut body = Map::with_capacity(names.len());
    for name in related {
        let records = related_records(&resource, &record, name, store)?;
        body.insert(pluralize(name), records_value(&records));
    }
    body.insert(resource, record.to_value());
    Ok(Value::Object(body))
}

/// Related records, via the owner's `<related>_ids` array when present,
/// otherwise via the related records' `<owner>_id` field.
fn related_records(
    owner: &str,
    record: &Record,
    related: &str,
    store: &Store,
) -> Result<Vec<Record>, StoreError> {
    let ids_field = ids_key(related);
    if record.fields.contains_key(&ids_field) {
        return record
            .ids_in(&ids_field)
            .into_iter()
            .map(|id| store.find(related, id))
            .collect();
    }

    let mut filters = Map::new();
    filters.insert(foreign_key(owner), Value::from(record.id));
    store.find_query(related, &filters)
}
