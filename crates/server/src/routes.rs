//! HTTP routes and handlers.
//!
//! Handlers are infallible by construction: upstream failures surface as
//! degraded page states, and an unresolvable slug renders the not-found
//! page with a 404 status.

use crate::state::AppState;
use crate::{seo, views};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use joblens_client::QueryContext;
use joblens_core::{AppConfig, ContractType, SearchCriteria, WorkHours};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/jobs", get(listing))
        .route("/jobs/:slug", get(detail))
        .route("/sitemap.xml", get(sitemap))
        .route("/robots.txt", get(robots))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Raw listing query parameters.
///
/// Everything arrives as optional strings and is coerced, not validated;
/// unparseable values simply drop out of the criteria.
#[derive(Debug, Default, Deserialize)]
struct ListingParams {
    keywords: Option<String>,
    location: Option<String>,
    contract_type: Option<String>,
    work_hours: Option<String>,
    page: Option<String>,
    page_size: Option<String>,
    radius: Option<String>,
}

impl ListingParams {
    fn into_criteria(self) -> SearchCriteria {
        SearchCriteria {
            keywords: self.keywords.filter(|s| !s.trim().is_empty()),
            location: self.location.filter(|s| !s.trim().is_empty()),
            contract_type: self.contract_type.as_deref().and_then(ContractType::from_param),
            work_hours: self.work_hours.as_deref().and_then(WorkHours::from_param),
            page: self.page.and_then(|s| s.parse().ok()),
            page_size: self.page_size.and_then(|s| s.parse().ok()),
            radius: self.radius.and_then(|s| s.parse().ok()),
        }
    }
}

/// Caller context from inbound headers, falling back to configured values.
fn caller_context(headers: &HeaderMap, config: &AppConfig) -> QueryContext {
    let user_ip = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| config.fallback_ip.clone());

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| config.fallback_user_agent.clone());

    QueryContext { user_ip, user_agent }
}

async fn home(State(state): State<AppState>) -> Html<String> {
    Html(views::home_page(&state.config))
}

async fn listing(
    State(state): State<AppState>, Query(params): Query<ListingParams>, headers: HeaderMap,
) -> Html<String> {
    let criteria = params.into_criteria();
    let ctx = caller_context(&headers, &state.config);
    let response = state.search.search(&criteria, &ctx).await;
    Html(views::listing_page(&state.config, &criteria, &response))
}

async fn detail(State(state): State<AppState>, Path(slug): Path<String>, headers: HeaderMap) -> Response {
    let ctx = caller_context(&headers, &state.config);
    match state.search.resolve(&slug, &SearchCriteria::default(), &ctx).await {
        Some(job) => Html(views::detail_page(&state.config, &job)).into_response(),
        None => (StatusCode::NOT_FOUND, Html(views::not_found_page(&state.config))).into_response(),
    }
}

async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let jobs = state.search.jobs().snapshot();
    (
        [(header::CONTENT_TYPE, "application/xml")],
        seo::sitemap_xml(&state.config.site_origin, &jobs),
    )
}

async fn robots(State(state): State<AppState>) -> String {
    seo::robots_txt(&state.config.site_origin)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_params_coercion() {
        let params = ListingParams {
            keywords: Some("backend".into()),
            location: Some("  ".into()),
            contract_type: Some("permanent".into()),
            work_hours: Some("nights".into()),
            page: Some("3".into()),
            page_size: Some("abc".into()),
            radius: Some("25".into()),
        };
        let criteria = params.into_criteria();
        assert_eq!(criteria.keywords.as_deref(), Some("backend"));
        assert_eq!(criteria.location, None);
        assert_eq!(criteria.contract_type, Some(ContractType::Permanent));
        assert_eq!(criteria.work_hours, None);
        assert_eq!(criteria.page, Some(3));
        assert_eq!(criteria.page_size, None);
        assert_eq!(criteria.radius, Some(25));
    }

    #[test]
    fn test_caller_context_prefers_headers() {
        let config = AppConfig::default();
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        headers.insert(header::USER_AGENT, "Mozilla/5.0".parse().unwrap());

        let ctx = caller_context(&headers, &config);
        assert_eq!(ctx.user_ip, "203.0.113.7");
        assert_eq!(ctx.user_agent, "Mozilla/5.0");
    }

    #[test]
    fn test_caller_context_falls_back_to_config() {
        let config = AppConfig::default();
        let ctx = caller_context(&HeaderMap::new(), &config);
        assert_eq!(ctx.user_ip, config.fallback_ip);
        assert_eq!(ctx.user_agent, config.fallback_user_agent);
    }
}
