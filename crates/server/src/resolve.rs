//! Slug resolution for detail pages.

use crate::search::SearchService;
use joblens_client::{QueryContext, SearchResponse};
use joblens_core::{Job, SearchCriteria, slug};

impl SearchService {
    /// Resolve a slug back to a job record.
    ///
    /// Tries the job cache first; on a miss, re-issues a single search with
    /// keywords reconstructed from the slug and scans that one page of
    /// results for a matching hash suffix. No pagination sweep, no retry
    /// with broadened criteria.
    pub async fn resolve(
        &self, slug_value: &str, fallback: &SearchCriteria, ctx: &QueryContext,
    ) -> Option<Job> {
        let hash = slug::extract_hash(slug_value);
        if let Some(job) = self.jobs().get(hash) {
            tracing::debug!(hash, "job cache hit");
            return Some(job);
        }

        let criteria = SearchCriteria {
            keywords: keywords_from_slug(slug_value).or_else(|| fallback.keywords.clone()),
            ..fallback.clone()
        };

        match self.search(&criteria, ctx).await {
            SearchResponse::Jobs { jobs, .. } => jobs
                .into_iter()
                .find(|job| slug::extract_hash(&job.slug) == hash),
            _ => None,
        }
    }
}

/// Best-effort keyword reconstruction from a slug: the hyphen-joined
/// segments minus the trailing hash segment, rejoined with spaces.
///
/// Heuristic only; titles containing numerals or unusual normalization can
/// produce keywords that no longer match the original title.
fn keywords_from_slug(slug_value: &str) -> Option<String> {
    let (head, _hash) = slug_value.rsplit_once('-')?;
    if head.is_empty() {
        return None;
    }
    Some(head.replace('-', " "))
}
