//! Resource, id, and body resolution shared by the verb handlers.

use mockrest_core::inflector::{pluralize, resource_name_from_path, singularize};
use mockrest_core::MockConfig;
use serde_json::{Map, Value};

use super::ControllerError;
use crate::request::MockRequest;

/// Resolves the singular resource name for a request.
///
/// An explicit name wins; otherwise the first segment of the request URL
/// (after the configured namespace) is singularized.
pub fn resolve_resource(
    explicit: Option<&str>,
    request: &MockRequest,
    config: &MockConfig,
) -> Result<String, ControllerError> {
    if let Some(name) = explicit {
        let name = name.trim();
        if name.is_empty() {
            return Err(ControllerError::UnresolvableResource(
                "empty resource name".to_string(),
            ));
        }
        return Ok(singularize(name));
    }

    let path = request.path().ok_or_else(|| {
        ControllerError::UnresolvableResource("no resource name and no request url".to_string())
    })?;
    resource_name_from_path(config.strip_namespace(path)).ok_or_else(|| {
        ControllerError::UnresolvableResource(format!("url '{}' has no resource segment", path))
    })
}

/// Resolves the record id for a request: the `id` route param first,
/// then the second segment of the request URL.
pub fn resolve_id(request: &MockRequest, config: &MockConfig) -> Option<u64> {
    request.param_id().or_else(|| {
        let path = config.strip_namespace(request.path()?);
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .nth(1)
            .and_then(|segment| segment.parse().ok())
    })
}

/// Parses the JSON body and extracts the attributes under the resource key.
///
/// The body must look like `{"contact": {...}}`; the plural key is accepted too.
pub(crate) fn parse_resource_body(
    request: &MockRequest,
    resource: &str,
) -> Result<Map<String, Value>, ControllerError> {
    let body: Value = serde_json::from_str(&request.request_body)
        .map_err(|e| ControllerError::MalformedBody(format!("invalid JSON: {}", e)))?;
    let Value::Object(mut root) = body else {
        return Err(ControllerError::MalformedBody(
            "body is not a JSON object".to_string(),
        ));
    };

    let attrs = root
        .remove(resource)
        .or_else(|| root.remove(&pluralize(resource)))
        .ok_or_else(|| {
            ControllerError::MalformedBody(format!("body has no '{}' key", resource))
        })?;

    match attrs {
        Value::Object(attrs) => Ok(attrs),
        other => Err(ControllerError::MalformedBody(format!(
            "'{}' is not an object (got {})",
            resource, other
        ))),
    }
}

/// Wraps a value under a single key: `{"contact": {...}}`.
pub(crate) fn keyed(key: String, value: Value) -> Value {
    let mut object = Map::with_capacity(1);
    object.insert(key, value);
    Value::Object(object)
}

/// Records serialized as a JSON array.
pub(crate) fn records_value(records: &[mockrest_core::Record]) -> Value {
    Value::Array(records.iter().map(|record| record.to_value()).collect())
}

/// Foreign key field pointing back at an owner type: `contact` -> `contact_id`.
pub(crate) fn foreign_key(owner: &str) -> String {
    format!("{}_id", singularize(owner))
}

/// Array-of-ids field on an owner pointing at a related type: `addresses` -> `address_ids`.
pub(crate) fn ids_key(related: &str) -> String {
    format!("{}_ids", singularize(related))
}
