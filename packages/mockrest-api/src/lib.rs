//! Mock REST API layer over the in-memory fixture store.
//!
//! Provides the front controller that turns verb + shorthand + request
//! triples into store reads and mutations, and an in-process route
//! table that dispatches method/URL pairs to it.

pub mod controller;
pub mod request;
pub mod response;
pub mod router;

pub use controller::{ControllerError, FrontController, Shorthand};
pub use request::{MockRequest, Verb};
pub use response::MockResponse;
pub use router::{Router, RouterError};
