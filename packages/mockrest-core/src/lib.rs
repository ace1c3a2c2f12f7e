//! In-memory fixture store for mock REST APIs.
//!
//! Provides the record store that mock handlers read and mutate,
//! the singular/plural rule table used to resolve resource names,
//! configuration, and the error taxonomy.

pub mod config;
pub mod error;
pub mod inflector;
pub mod record;
pub mod store;

pub use config::MockConfig;
pub use error::StoreError;
pub use record::Record;
pub use store::Store;
