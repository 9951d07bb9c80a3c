//! Shared request state.

use crate::search::SearchService;
use joblens_core::AppConfig;
use std::sync::Arc;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub search: Arc<SearchService>,
}
