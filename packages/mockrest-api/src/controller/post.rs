//! POST handler: create a record from the body.

use mockrest_core::{MockConfig, Store};
use serde_json::Value;

use super::request_utils::{keyed, parse_resource_body, resolve_resource};
use super::{ControllerError, Shorthand};
use crate::request::{MockRequest, Verb};

/// Creates a record from `{"<resource>": {...fields}}` and returns it under
/// the same key. A null or missing id gets the next free id.
pub(super) fn handle(
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
                verb: Verb::Post,
                kind: other.kind(),
            })
        }
    };
    let resource = resolve_resource(explicit, request, config)?;
    let attrs = parse_resource_body(request, &resource)?;

    let record = store.push(&resource, Value::Object(attrs))?;
    tracing::debug!("POST {} -> id {}", resource, record.id);
    Ok(keyed(resource, record.to_value()))
}
