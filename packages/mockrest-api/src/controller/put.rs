//! PUT/PATCH handler: shallow-merge the body into an existing record.

use mockrest_core::{MockConfig, Store};
use serde_json::Value;

use super::request_utils::{keyed, parse_resource_body, resolve_id, resolve_resource};
use super::{ControllerError, Shorthand};
use crate::request::{MockRequest, Verb};

/// Updates a record from `{"<resource>": {...fields}}`.
///
/// The resource comes from the shorthand or, when undefined, from the URL
/// (`/contacts/1` -> `contact`). The id comes from the route params, then the
/// URL, then the body. Fields absent from the body are left untouched.
///
/// Returns `{"<resource>": <updated record>}`.
pub(super) fn handle(
    verb: Verb,
    shorthand: &Shorthand,
    store: &Store,
    request: &MockRequest,
    config: &MockConfig,
) -> Result<Value, ControllerError> {
    let explicit = match shorthand {
        Shorthand::Undefined => None,
        Shorthand::Resource(name) => Some(name.as_str()),
        other => {
            return Err(ControllerError::UnsupportedShorthand {
                verb,
                kind: other.kind(),
            })
        }
    };
    let resource = resolve_resource(explicit, request, config)?;
    let attrs = parse_resource_body(request, &resource)?;

    let id = resolve_id(request, config)
        .or_else(|| attrs.get("id").and_then(mockrest_core::record::parse_id))
        .ok_or_else(|| ControllerError::MissingId {
            resource: resource.clone(),
        })?;

    let record = store.update(&resource, id, &attrs)?;
    tracing::debug!("PUT {} {} -> {} fields", resource, id, record.fields.len());
    Ok(keyed(resource, record.to_value()))
}
