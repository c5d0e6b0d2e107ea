//! Client for the service-map host search API.
//!
//! Hostnames are queued with [`SearchClient::add_host`], submitted as one
//! batch by [`SearchClient::execute`], and read back per host afterwards.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::{Config, ServiceConfig};
pub use error::{Result, SearchError};
pub use models::{SearchEntry, ServiceResult};
pub use services::SearchClient;
