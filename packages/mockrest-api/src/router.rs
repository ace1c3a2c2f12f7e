//! Matchit route table for mock requests.
//!
//! Routes are registered per verb with a path pattern and a shorthand.
//! Dispatch happens in process: no sockets, just method + URL + body in and
//! a [`MockResponse`] out.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use mockrest_core::{MockConfig, Store};
use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

use crate::controller::{ControllerError, FrontController, Shorthand};
use crate::request::{MockRequest, Verb};
use crate::response::{error_response, MockResponse};

/// Mock request router.
pub struct Router {
    routes: HashMap<Verb, MatchitRouter<Shorthand>>,
    route_count: usize,
    controller: FrontController,
    config: Arc<MockConfig>,
}

impl Router {
    /// Creates an empty router.
    pub fn new(config: MockConfig) -> Self {
        let config = Arc::new(config);
        Self {
            routes: HashMap::new(),
            route_count: 0,
            controller: FrontController::new(config.clone()),
            config,
        }
    }

    /// Registers a route.
    ///
    /// # Arguments
    /// * `verb` - Verb the route answers to
    /// * `path` - Pattern relative to the namespace; `/contacts/{id}` and
    ///   `/contacts/:id` are equivalent
    /// * `shorthand` - Route behavior
    ///
    /// # Returns
    /// `Result<&mut Self, RouterError>`; registering the same verb and pattern twice fails.
    pub fn register(
        &mut self,
        verb: Verb,
        path: &str,
        shorthand: impl Into<Shorthand>,
    ) -> Result<&mut Self, RouterError> {
        let pattern = normalize_pattern(path);
        self.routes
            .entry(verb)
            .or_insert_with(MatchitRouter::new)
            .insert(pattern.clone(), shorthand.into())
            .map_err(|e| RouterError::DuplicateRoute(format!("{} {}: {}", verb, pattern, e)))?;
        self.route_count += 1;
        tracing::debug!("Registered {} {}", verb, pattern);
        Ok(self)
    }

    pub fn get(
        &mut self,
        path: &str,
        shorthand: impl Into<Shorthand>,
    ) -> Result<&mut Self, RouterError> {
        self.register(Verb::Get, path, shorthand)
    }

    pub fn post(
        &mut self,
        path: &str,
        shorthand: impl Into<Shorthand>,
    ) -> Result<&mut Self, RouterError> {
        self.register(Verb::Post, path, shorthand)
    }

    pub fn put(
        &mut self,
        path: &str,
        shorthand: impl Into<Shorthand>,
    ) -> Result<&mut Self, RouterError> {
        self.register(Verb::Put, path, shorthand)
    }

    pub fn patch(
        &mut self,
        path: &str,
        shorthand: impl Into<Shorthand>,
    ) -> Result<&mut Self, RouterError> {
        self.register(Verb::Patch, path, shorthand)
    }

    pub fn delete(
        &mut self,
        path: &str,
        shorthand: impl Into<Shorthand>,
    ) -> Result<&mut Self, RouterError> {
        self.register(Verb::Delete, path, shorthand)
    }

    /// Routes a request to the matching shorthand.
    ///
    /// # Arguments
    /// * `store` - Fixture store
    /// * `method` - Verb name, case-insensitive
    /// * `url` - Request URL including namespace and query string
    /// * `body` - Raw request body
    ///
    /// # Returns
    /// `Result<MockResponse, RouterError>` containing the response or an error.
    pub fn route(
        &self,
        store: &Store,
        method: &str,
        url: &str,
        body: &str,
    ) -> Result<MockResponse, RouterError> {
        let verb: Verb = method.parse().map_err(|_| RouterError::MethodNotAllowed)?;
        let (path, query) = split_url(url);
        let local_path = self.config.strip_namespace(path);

        let table = self
            .routes
            .get(&verb)
            .ok_or_else(|| RouterError::NotFound(format!("No route found for {} {}", verb, path)))?;
        let matched = table
            .at(local_path)
            .map_err(|_| RouterError::NotFound(format!("No route found for {} {}", verb, path)))?;

        let mut request = MockRequest::new()
            .with_url(url)
            .with_body(body.to_string());
        for (key, value) in matched.params.iter() {
            let decoded = percent_decode_str(value).decode_utf8_lossy();
            request.params.insert(key.to_string(), decoded.into_owned());
        }
        request.query_params = parse_query_params(query)?;

        self.controller
            .handle(verb, matched.value, store, &request)
            .map_err(RouterError::from)
    }

    /// Routes a request and renders any error as an error response.
    pub fn respond(&self, store: &Store, method: &str, url: &str, body: &str) -> MockResponse {
        self.route(store, method, url, body)
            .unwrap_or_else(MockResponse::from)
    }

    /// Number of registered routes across all verbs.
    pub fn route_count(&self) -> usize {
        self.route_count
    }
}

/// Converts `:name` segments into matchit's `{name}` form and ensures a leading slash.
fn normalize_pattern(path: &str) -> String {
    let segments: Vec<String> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => format!("{{{}}}", name),
            None => segment.to_string(),
        })
        .collect();
    format!("/{}", segments.join("/"))
}

/// Splits a URL into path and optional query string, dropping any fragment.
fn split_url(url: &str) -> (&str, Option<&str>) {
    let url = url.split('#').next().unwrap_or_default();
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Parse query parameters from URL query string.
///
/// Values that parse as JSON keep their JSON type (`1`, `true`); everything
/// else is a string.
pub fn parse_query_params(query_str: Option<&str>) -> Result<Map<String, Value>, RouterError> {
    let mut params = Map::new();

    if let Some(query_str) = query_str {
        for pair in query_str.split('&').filter(|pair| !pair.is_empty()) {
            let (key, encoded_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = percent_decode_str(key).decode_utf8_lossy();
            if key.is_empty() {
                return Err(RouterError::BadRequest(format!(
                    "Invalid query parameter '{}'",
                    pair
                )));
            }
            let decoded_value = percent_decode_str(encoded_value).decode_utf8_lossy();
            let json_value = serde_json::from_str(&decoded_value)
                .unwrap_or_else(|_| Value::String(decoded_value.to_string()));
            params.insert(key.into_owned(), json_value);
        }
    }

    Ok(params)
}

/// Router error type.
#[derive(Debug)]
pub enum RouterError {
    MethodNotAllowed,
    NotFound(String),
    BadRequest(String),
    DuplicateRoute(String),
    Controller(ControllerError),
}

impl RouterError {
    /// HTTP-like status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            RouterError::MethodNotAllowed => 405,
            RouterError::NotFound(_) => 404,
            RouterError::BadRequest(_) => 400,
            RouterError::DuplicateRoute(_) => 500,
            RouterError::Controller(e) => e.status_code(),
        }
    }
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            RouterError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            RouterError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            RouterError::DuplicateRoute(msg) => write!(f, "Duplicate route: {}", msg),
            RouterError::Controller(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouterError::Controller(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ControllerError> for RouterError {
    fn from(err: ControllerError) -> Self {
        RouterError::Controller(err)
    }
}

impl From<RouterError> for MockResponse {
    fn from(err: RouterError) -> Self {
        let status = err.status_code();
        let (message, details) = match &err {
            RouterError::MethodNotAllowed => ("Method Not Allowed".to_string(), None),
            RouterError::NotFound(msg) => ("Not Found".to_string(), Some(msg.clone())),
            RouterError::BadRequest(msg) => ("Bad Request".to_string(), Some(msg.clone())),
            RouterError::DuplicateRoute(msg) => ("Internal Error".to_string(), Some(msg.clone())),
            RouterError::Controller(e) => (e.to_string(), None),
        };

        let body = serde_json::to_value(error_response(status, message, details))
            .unwrap_or(Value::Null);
        MockResponse::new(status, body)
    }
}
