//! Remote template providers.

mod http;

pub use http::{DEFAULT_API_URL, HttpTemplateProvider};
