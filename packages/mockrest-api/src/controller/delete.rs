//! DELETE handler: remove a record and, for arrays, its dependents.

use mockrest_core::inflector::pluralize;
use mockrest_core::{MockConfig, Store, StoreError};
use serde_json::{Map, Value};

use super::request_utils::{foreign_key, resolve_id, resolve_resource};
use super::{ControllerError, Shorthand};
use crate::request::MockRequest;

const NO_DEPENDENTS: &[String] = &[];

/// Removes the addressed record. With `["contact", "addresses"]`, also removes
/// every address whose `contact_id` equals the removed id. Every dependent
/// collection must exist; nothing is removed otherwise.
///
/// Returns a null body.
pub(super) fn handle(
    shorthand: &Shorthand,
    store: &Store,
    request: &MockRequest,
    config: &MockConfig,
) -> Result<Value, ControllerError> {
    let (owner, dependents): (Option<&str>, &[String]) = match shorthand {
        Shorthand::Resources(names) => match names.split_first() {
            Some((owner, dependents)) => (Some(owner.as_str()), dependents),
            None => {
                return Err(ControllerError::UnresolvableResource(
                    "empty resource array".to_string(),
                ))
            }
        },
        Shorthand::Resource(name) => (Some(name.as_str()), NO_DEPENDENTS),
        _ => (None, NO_DEPENDENTS),
    };

    let resource = resolve_resource(owner, request, config)?;
    let id = resolve_id(request, config).ok_or_else(|| ControllerError::MissingId {
        resource: resource.clone(),
    })?;

    for dependent in dependents {
        if !store.contains(dependent)? {
            return Err(StoreError::CollectionNotFound {
                collection: pluralize(dependent),
            }
            .into());
        }
    }

    store.remove(&resource, id)?;

    let mut filters = Map::new();
    filters.insert(foreign_key(&resource), Value::from(id));
    for dependent in dependents {
        let removed = store.remove_query(dependent, &filters)?;
        tracing::debug!(
            "DELETE {} {} cascaded to {} {}",
            resource,
            id,
            removed.len(),
            dependent
        );
    }

    Ok(Value::Null)
}
