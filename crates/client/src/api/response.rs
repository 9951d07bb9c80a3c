//! Upstream response types and normalization.

use joblens_core::{Job, slug};
use serde::{Deserialize, Serialize};

/// Raw response envelope from the upstream search API.
///
/// The `type` field discriminates between a result page (`JOBS`), a
/// location-disambiguation prompt (`LOCATIONS`), and anything else.
#[derive(Debug, Deserialize)]
pub struct RawResponse {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub hits: u64,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub jobs: Option<Vec<RawJob>>,
    #[serde(default)]
    pub locations: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A single raw job posting as returned upstream.
#[derive(Debug, Deserialize)]
pub struct RawJob {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    /// Display string of the posting's location(s).
    #[serde(default)]
    pub locations: String,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub salary_currency_code: Option<String>,
    #[serde(default)]
    pub salary_type: Option<String>,
    #[serde(default)]
    pub site: String,
    pub url: String,
    #[serde(default)]
    pub apply_url: Option<String>,
}

/// Normalized search response, the shape page renderers consume.
///
/// Upstream failures are folded into `Failed` at the search boundary;
/// callers never see an exception.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchResponse {
    Jobs { jobs: Vec<Job>, hits: u64, pages: u32 },
    Locations { locations: Vec<String> },
    Failed { message: String },
}

impl SearchResponse {
    /// Degraded-but-renderable response carrying the error message.
    pub fn failed(message: impl Into<String>) -> Self {
        SearchResponse::Failed { message: message.into() }
    }

    /// Normalize a raw envelope, deriving each job's slug.
    pub fn from_raw(raw: RawResponse) -> Self {
        match raw.kind.as_str() {
            "JOBS" => {
                let jobs = raw
                    .jobs
                    .unwrap_or_default()
                    .into_iter()
                    .map(normalize_job)
                    .collect();
                SearchResponse::Jobs { jobs, hits: raw.hits, pages: raw.pages }
            }
            "LOCATIONS" => SearchResponse::Locations { locations: raw.locations.unwrap_or_default() },
            other => {
                let message = raw
                    .error
                    .unwrap_or_else(|| format!("unexpected response type: {other:?}"));
                SearchResponse::Failed { message }
            }
        }
    }
}

/// Convert a raw posting into a [`Job`], deriving its slug from the title
/// and canonical source URL. The slug is immutable from here on.
pub fn normalize_job(raw: RawJob) -> Job {
    let slug = slug::make_slug(&raw.title, &raw.url);
    Job {
        title: raw.title,
        company: raw.company,
        posted_at: raw.date,
        description: raw.description,
        location: raw.locations,
        salary_min: raw.salary_min,
        salary_max: raw.salary_max,
        salary_currency: raw.salary_currency_code,
        salary_period: raw.salary_type,
        site: raw.site,
        url: raw.url,
        apply_url: raw.apply_url,
        slug,
    }
}
