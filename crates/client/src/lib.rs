//! Remote job-search API client for joblens.
//!
//! Builds authenticated queries against the upstream search endpoint and
//! normalizes raw postings into [`joblens_core::Job`] records.

pub mod api;

pub use api::error::ApiError;
pub use api::request::{QueryContext, build_query, cache_key, query_string};
pub use api::response::{RawJob, RawResponse, SearchResponse};
pub use api::{ApiClient, ApiConfig};
