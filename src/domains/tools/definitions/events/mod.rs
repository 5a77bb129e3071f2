//! Events API tools.
//!
//! - `query_json`: keyword, spatial and facet search over event listings
//! - `models`: the event record shape returned by the API

pub mod models;
pub mod query_json;

pub use models::Event;
pub use query_json::{QueryJsonParams, QueryJsonTool, QueryValue};
