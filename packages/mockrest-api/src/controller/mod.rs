//! Front controller dispatching verb + shorthand pairs to store routines.

mod delete;
mod get;
mod post;
mod put;
mod request_utils;

use std::fmt;
use std::sync::Arc;

use mockrest_core::{MockConfig, Store, StoreError};
use serde_json::Value;
use thiserror::Error;

use crate::request::{MockRequest, Verb};
use crate::response::MockResponse;

pub use request_utils::{resolve_id, resolve_resource};

/// User-supplied handler routine.
pub type CustomHandler = Arc<dyn Fn(&Store, &MockRequest) -> Value + Send + Sync>;

/// How a route describes its behavior.
#[derive(Clone)]
pub enum Shorthand {
    /// Resolve the resource from the request URL
    Undefined,
    /// Explicit resource name, singular or plural
    Resource(String),
    /// Several resources: a primary one followed by related collections
    Resources(Vec<String>),
    /// Static body returned as is
    Object(Value),
    /// Custom routine
    Custom(CustomHandler),
}

impl Shorthand {
    /// Wraps a closure as a custom handler.
    pub fn custom<F>(handler: F) -> Self
    where
        F: Fn(&Store, &MockRequest) -> Value + Send + Sync + 'static,
    {
        Shorthand::Custom(Arc::new(handler))
    }

    fn kind(&self) -> &'static str {
        match self {
            Shorthand::Undefined => "undefined",
            Shorthand::Resource(_) => "string",
            Shorthand::Resources(_) => "array",
            Shorthand::Object(_) => "object",
            Shorthand::Custom(_) => "function",
        }
    }
}

impl fmt::Debug for Shorthand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shorthand::Undefined => f.write_str("Undefined"),
            Shorthand::Resource(name) => f.debug_tuple("Resource").field(name).finish(),
            Shorthand::Resources(names) => f.debug_tuple("Resources").field(names).finish(),
            Shorthand::Object(value) => f.debug_tuple("Object").field(value).finish(),
            Shorthand::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for Shorthand {
    fn from(name: &str) -> Self {
        Shorthand::Resource(name.to_string())
    }
}

impl From<String> for Shorthand {
    fn from(name: String) -> Self {
        Shorthand::Resource(name)
    }
}

impl From<Option<&str>> for Shorthand {
    fn from(name: Option<&str>) -> Self {
        name.map_or(Shorthand::Undefined, Shorthand::from)
    }
}

impl From<Vec<&str>> for Shorthand {
    fn from(names: Vec<&str>) -> Self {
        Shorthand::Resources(names.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Shorthand {
    fn from(names: [&str; N]) -> Self {
        Shorthand::Resources(names.iter().map(|name| name.to_string()).collect())
    }
}

impl From<Value> for Shorthand {
    fn from(body: Value) -> Self {
        Shorthand::Object(body)
    }
}

/// Front controller errors.
#[derive(Error, Debug)]
pub enum ControllerError {
    /// Resource name could not be derived from the shorthand or URL
    #[error("Cannot resolve resource name: {0}")]
    UnresolvableResource(String),

    /// Request body is not the expected JSON shape
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Neither params nor URL carry a record id
    #[error("Request for '{resource}' has no record id")]
    MissingId { resource: String },

    /// Shorthand kind is not supported by this verb
    #[error("{verb} does not support the {kind} shorthand")]
    UnsupportedShorthand { verb: Verb, kind: &'static str },

    /// Verb string not recognized
    #[error("Unknown verb '{0}'")]
    UnknownVerb(String),

    /// Store lookup or mutation failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ControllerError {
    /// HTTP-like status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ControllerError::UnresolvableResource(_)
            | ControllerError::MalformedBody(_)
            | ControllerError::MissingId { .. }
            | ControllerError::UnsupportedShorthand { .. } => 400,
            ControllerError::UnknownVerb(_) => 405,
            ControllerError::Store(e) if e.is_not_found() => 404,
            ControllerError::Store(StoreError::InvalidRecord { .. })
            | ControllerError::Store(StoreError::InvalidData(_)) => 400,
            ControllerError::Store(_) => 500,
        }
    }
}

/// Dispatches mock requests to the verb handlers.
#[derive(Debug, Clone, Default)]
pub struct FrontController {
    config: Arc<MockConfig>,
}

impl FrontController {
    /// Creates a controller with the given configuration.
    pub fn new(config: Arc<MockConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Handles a request with the verb's default status code.
    ///
    /// # Arguments
    /// * `verb` - Request verb
    /// * `shorthand` - Route behavior (resource name, array, static body, routine)
    /// * `store` - Fixture store to read and mutate
    /// * `request` - Params, body, and URL of the request
    ///
    /// # Returns
    /// `Result<MockResponse, ControllerError>` with the status code and JSON body.
    pub fn handle(
        &self,
        verb: Verb,
        shorthand: &Shorthand,
        store: &Store,
        request: &MockRequest,
    ) -> Result<MockResponse, ControllerError> {
        self.handle_with_code(verb, shorthand, store, request, None)
    }

    /// Handles a request, overriding the status code when `code` is set.
    pub fn handle_with_code(
        &self,
        verb: Verb,
        shorthand: &Shorthand,
        store: &Store,
        request: &MockRequest,
        code: Option<u16>,
    ) -> Result<MockResponse, ControllerError> {
        let code = code.unwrap_or_else(|| self.default_code(verb));
        if self.config.log_requests {
            tracing::info!(
                "{} {} ({} shorthand)",
                verb,
                request.url.as_deref().unwrap_or("-"),
                shorthand.kind()
            );
        } else {
            tracing::debug!("Handling {} with {:?}", verb, shorthand);
        }

        let body = match shorthand {
            Shorthand::Object(body) => body.clone(),
            Shorthand::Custom(handler) => handler(store, request),
            _ => {
                let result = match verb {
                    Verb::Get => get::handle(shorthand, store, request, &self.config),
                    Verb::Post => post::handle(shorthand, store, request, &self.config),
                    Verb::Put | Verb::Patch => {
                        put::handle(verb, shorthand, store, request, &self.config)
                    }
                    Verb::Delete => delete::handle(shorthand, store, request, &self.config),
                };
                result.inspect_err(|e| tracing::warn!("{} request rejected: {}", verb, e))?
            }
        };

        Ok(MockResponse::new(code, body))
    }

    /// Default status code for a verb, from configuration.
    pub fn default_code(&self, verb: Verb) -> u16 {
        match verb {
            Verb::Get => self.config.get_status,
            Verb::Post => self.config.post_status,
            Verb::Put | Verb::Patch => self.config.put_status,
            Verb::Delete => self.config.delete_status,
        }
    }
}
