//! Request types handed to the front controller.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::controller::ControllerError;

/// HTTP verb understood by the front controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = ControllerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Verb::Get),
            "post" => Ok(Verb::Post),
            "put" => Ok(Verb::Put),
            "patch" => Ok(Verb::Patch),
            "delete" | "del" => Ok(Verb::Delete),
            _ => Err(ControllerError::UnknownVerb(s.to_string())),
        }
    }
}

/// A mock request: route params, query params, raw body, and optional URL.
#[derive(Debug, Clone, Default)]
pub struct MockRequest {
    /// Route parameters, e.g. `id`
    pub params: HashMap<String, String>,
    /// Decoded query string parameters
    pub query_params: Map<String, Value>,
    /// Raw JSON request body
    pub request_body: String,
    /// Request URL, used when the handler has to resolve the resource itself
    pub url: Option<String>,
}

impl MockRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.request_body = body.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_query_param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.query_params.insert(key.into(), value);
        self
    }

    /// Route param parsed as a record id.
    pub fn param_id(&self) -> Option<u64> {
        self.params.get("id").and_then(|raw| raw.trim().parse().ok())
    }

    /// URL path without query string or fragment.
    pub fn path(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(|url| url.split(['?', '#']).next().unwrap_or_default())
    }
}
