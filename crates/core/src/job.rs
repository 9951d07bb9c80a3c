//! The normalized job record.

use serde::{Deserialize, Serialize};

/// Normalized representation of a job posting.
///
/// Created once during normalization of a raw API response and never
/// mutated afterwards. The `slug` is derived at that point and is the
/// record's externally visible identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub company: String,
    /// Posting date, verbatim from the upstream record.
    pub posted_at: String,
    /// Description body; may be HTML or plain text.
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_currency: Option<String>,
    /// Period unit for the salary figures (e.g. "year", "month", "hour").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_period: Option<String>,
    /// Identifier of the site the posting was sourced from.
    pub site: String,
    /// Canonical source URL; input to the slug digest.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_url: Option<String>,
    pub slug: String,
}

impl Job {
    /// The hash suffix of this job's slug, used as its cache key.
    pub fn hash(&self) -> &str {
        crate::slug::extract_hash(&self.slug)
    }

    /// Whether both salary bounds are present (required for the structured
    /// data salary block).
    pub fn has_salary_range(&self) -> bool {
        self.salary_min.is_some() && self.salary_max.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Job {
        Job {
            title: "Senior Backend Engineer".into(),
            company: "Acme".into(),
            posted_at: "2026-08-01".into(),
            description: "<p>Build things.</p>".into(),
            location: "Austin, TX".into(),
            salary_min: Some(120_000.0),
            salary_max: Some(150_000.0),
            salary_currency: Some("USD".into()),
            salary_period: Some("year".into()),
            site: "examplejobs".into(),
            url: "https://example.com/jobs/123".into(),
            apply_url: None,
            slug: crate::slug::make_slug("Senior Backend Engineer", "https://example.com/jobs/123"),
        }
    }

    #[test]
    fn test_hash_is_slug_suffix() {
        let job = sample();
        assert_eq!(job.hash(), crate::slug::extract_hash(&job.slug));
        assert_eq!(job.hash().len(), 10);
    }

    #[test]
    fn test_salary_range_requires_both_bounds() {
        let mut job = sample();
        assert!(job.has_salary_range());
        job.salary_max = None;
        assert!(!job.has_salary_range());
    }

    #[test]
    fn test_serde_round_trip() {
        let job = sample();
        let json = serde_json::to_string(&job).unwrap();
        let back: Job = serde_json::from_str(&json).unwrap();
        assert_eq!(job, back);
    }

    #[test]
    fn test_absent_options_are_omitted() {
        let mut job = sample();
        job.salary_min = None;
        job.salary_max = None;
        job.salary_currency = None;
        job.salary_period = None;
        let json = serde_json::to_string(&job).unwrap();
        assert!(!json.contains("salary_min"));
        assert!(!json.contains("apply_url"));
    }
}
