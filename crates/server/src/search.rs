//! Search orchestration: response cache, upstream fetch, normalization and
//! job cache population.

use joblens_client::{ApiClient, ApiConfig, ApiError, QueryContext, RawResponse, SearchResponse};
use joblens_core::{AppConfig, CacheDb, JobCache, SearchCriteria};
use std::sync::Arc;

/// The search client: everything between page renderers and the remote API.
pub struct SearchService {
    db: CacheDb,
    jobs: Arc<JobCache>,
    client: ApiClient,
    locale: String,
    page_size: u32,
    response_ttl: i64,
}

impl SearchService {
    /// Build the service. Fails when the API credential is missing; that is
    /// the fatal configuration error and it fires before any network attempt.
    pub fn new(config: &AppConfig, db: CacheDb) -> Result<Self, ApiError> {
        let client = ApiClient::new(ApiConfig::from_app(config)?)?;
        Ok(Self {
            db,
            jobs: Arc::new(JobCache::new(config.job_ttl_secs)),
            client,
            locale: config.locale.clone(),
            page_size: config.page_size,
            response_ttl: config.response_ttl_secs,
        })
    }

    /// The in-memory job cache populated by searches.
    pub fn jobs(&self) -> &JobCache {
        &self.jobs
    }

    #[cfg(test)]
    pub(crate) fn db(&self) -> &CacheDb {
        &self.db
    }

    /// Run a search. Never fails: any upstream error is converted into a
    /// degraded-but-renderable [`SearchResponse::Failed`].
    pub async fn search(&self, criteria: &SearchCriteria, ctx: &QueryContext) -> SearchResponse {
        match self.perform(criteria, ctx).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "search request failed");
                SearchResponse::failed(e.to_string())
            }
        }
    }

    async fn perform(&self, criteria: &SearchCriteria, ctx: &QueryContext) -> Result<SearchResponse, ApiError> {
        let pairs = joblens_client::build_query(criteria, ctx, &self.locale, self.page_size);
        let query = joblens_client::query_string(&pairs);
        let key = joblens_client::cache_key(&query);

        let cached = match self.db.get_response(&key).await {
            Ok(found) => found,
            Err(e) => {
                // A broken cache read falls through to the network.
                tracing::warn!(error = %e, "response cache read failed");
                None
            }
        };

        let body = match cached {
            Some(json) => {
                tracing::debug!("response cache hit");
                json
            }
            None => {
                let body = self.client.fetch_raw(&pairs).await?;
                let criteria_json = serde_json::to_string(criteria).unwrap_or_default();
                if let Err(e) = self.db.put_response(&key, &criteria_json, &body, self.response_ttl).await {
                    tracing::warn!(error = %e, "failed to cache search response");
                }
                body
            }
        };

        let raw: RawResponse = serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;
        let response = SearchResponse::from_raw(raw);

        // Normalization re-runs on cached responses too, so the job cache
        // stays warm for detail-page resolution.
        if let SearchResponse::Jobs { jobs, .. } = &response {
            self.jobs.remember(jobs);
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use joblens_core::slug;

    fn config() -> AppConfig {
        AppConfig { api_key: Some("test-key".into()), ..Default::default() }
    }

    fn ctx(config: &AppConfig) -> QueryContext {
        QueryContext { user_ip: config.fallback_ip.clone(), user_agent: config.fallback_user_agent.clone() }
    }

    /// Seed the response cache with the raw body the given criteria would
    /// fetch, so `search` is served without touching the network.
    async fn seed(service: &SearchService, criteria: &SearchCriteria, ctx: &QueryContext, body: &str) {
        let pairs = joblens_client::build_query(criteria, ctx, &service.locale, service.page_size);
        let key = joblens_client::cache_key(&joblens_client::query_string(&pairs));
        service.db.put_response(&key, "{}", body, 600).await.unwrap();
    }

    #[tokio::test]
    async fn test_cached_search_populates_job_cache() {
        let config = config();
        let db = CacheDb::open_in_memory().await.unwrap();
        let service = SearchService::new(&config, db).unwrap();
        let ctx = ctx(&config);

        let criteria = SearchCriteria { keywords: Some("backend".into()), ..Default::default() };
        let body = r#"{
            "type": "JOBS", "hits": 1, "pages": 1,
            "jobs": [{
                "title": "Senior Backend Engineer",
                "company": "Acme",
                "date": "2026-08-01",
                "description": "d",
                "locations": "Austin, TX",
                "site": "examplejobs",
                "url": "https://example.com/jobs/123"
            }]
        }"#;
        seed(&service, &criteria, &ctx, body).await;

        let SearchResponse::Jobs { jobs, hits, .. } = service.search(&criteria, &ctx).await else {
            panic!("expected jobs response");
        };
        assert_eq!(hits, 1);
        assert_eq!(jobs.len(), 1);

        // The batch landed in the job cache under its hash suffix.
        let hash = slug::extract_hash(&jobs[0].slug).to_string();
        assert_eq!(service.jobs().get(&hash), Some(jobs[0].clone()));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_yields_failed_not_panic() {
        let config = AppConfig {
            api_key: Some("test-key".into()),
            // Discard port; connection is refused immediately.
            api_base_url: "http://127.0.0.1:9/v1/search".into(),
            ..Default::default()
        };
        let db = CacheDb::open_in_memory().await.unwrap();
        let service = SearchService::new(&config, db).unwrap();
        let ctx = ctx(&config);

        let SearchResponse::Failed { message } = service.search(&SearchCriteria::default(), &ctx).await else {
            panic!("expected failed response");
        };
        assert!(!message.is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_cached_body_yields_failed() {
        let config = config();
        let db = CacheDb::open_in_memory().await.unwrap();
        let service = SearchService::new(&config, db).unwrap();
        let ctx = ctx(&config);

        let criteria = SearchCriteria::default();
        seed(&service, &criteria, &ctx, "not json").await;

        let SearchResponse::Failed { message } = service.search(&criteria, &ctx).await else {
            panic!("expected failed response");
        };
        assert!(!message.is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_is_fatal_at_construction() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let result = SearchService::new(&AppConfig::default(), db);
        assert!(matches!(result, Err(ApiError::MissingApiKey)));
    }
}
