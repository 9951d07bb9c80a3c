//! Outbound query construction and cache keying.

use joblens_core::SearchCriteria;
use sha2::{Digest, Sha256};

/// Caller context forwarded to the upstream API.
///
/// Taken from inbound request headers when available, otherwise from the
/// configured fallback values.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub user_ip: String,
    pub user_agent: String,
}

/// Build the ordered query parameter list for a search.
///
/// Always carries locale, pagination and caller context; criteria fields
/// are appended only when present.
pub fn build_query(
    criteria: &SearchCriteria, ctx: &QueryContext, locale: &str, default_page_size: u32,
) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = vec![
        ("locale".into(), locale.to_string()),
        ("page".into(), criteria.get_page().to_string()),
        ("pagesize".into(), criteria.get_page_size(default_page_size).to_string()),
        ("user_ip".into(), ctx.user_ip.clone()),
        ("user_agent".into(), ctx.user_agent.clone()),
    ];

    if let Some(keywords) = &criteria.keywords {
        pairs.push(("keywords".into(), keywords.clone()));
    }
    if let Some(location) = &criteria.location {
        pairs.push(("location".into(), location.clone()));
    }
    if let Some(contract_type) = &criteria.contract_type {
        pairs.push(("contracttype".into(), contract_type.code().into()));
    }
    if let Some(work_hours) = &criteria.work_hours {
        pairs.push(("workinghours".into(), work_hours.code().into()));
    }
    if let Some(radius) = criteria.radius {
        pairs.push(("radius".into(), radius.to_string()));
    }

    pairs
}

/// Canonical urlencoded form of the query pairs.
///
/// This exact string keys the response cache, so identical criteria from
/// the same caller context map to the same entry.
pub fn query_string(pairs: &[(String, String)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// SHA-256 hex digest of the canonical query string.
pub fn cache_key(query: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(query.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use joblens_core::{ContractType, WorkHours};

    fn ctx() -> QueryContext {
        QueryContext { user_ip: "203.0.113.7".into(), user_agent: "Mozilla/5.0".into() }
    }

    #[test]
    fn test_build_query_defaults() {
        let pairs = build_query(&SearchCriteria::default(), &ctx(), "en_US", 20);
        assert_eq!(
            pairs,
            vec![
                ("locale".to_string(), "en_US".to_string()),
                ("page".to_string(), "1".to_string()),
                ("pagesize".to_string(), "20".to_string()),
                ("user_ip".to_string(), "203.0.113.7".to_string()),
                ("user_agent".to_string(), "Mozilla/5.0".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_query_full_criteria() {
        let criteria = SearchCriteria {
            keywords: Some("backend engineer".into()),
            location: Some("Austin, TX".into()),
            contract_type: Some(ContractType::Permanent),
            work_hours: Some(WorkHours::FullTime),
            page: Some(2),
            page_size: Some(50),
            radius: Some(25),
        };
        let pairs = build_query(&criteria, &ctx(), "en_US", 20);
        assert!(pairs.contains(&("keywords".to_string(), "backend engineer".to_string())));
        assert!(pairs.contains(&("contracttype".to_string(), "p".to_string())));
        assert!(pairs.contains(&("workinghours".to_string(), "f".to_string())));
        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
        assert!(pairs.contains(&("pagesize".to_string(), "50".to_string())));
        assert!(pairs.contains(&("radius".to_string(), "25".to_string())));
    }

    #[test]
    fn test_query_string_encoding() {
        let pairs = vec![("keywords".to_string(), "backend engineer".to_string())];
        assert_eq!(query_string(&pairs), "keywords=backend+engineer");
    }

    #[test]
    fn test_cache_key_stability() {
        let pairs = build_query(&SearchCriteria::default(), &ctx(), "en_US", 20);
        let key1 = cache_key(&query_string(&pairs));
        let key2 = cache_key(&query_string(&pairs));
        assert_eq!(key1, key2);
        assert_eq!(key1.len(), 64); // SHA-256 hex
    }

    #[test]
    fn test_cache_key_differs_per_criteria() {
        let base = SearchCriteria::default();
        let paged = SearchCriteria { page: Some(2), ..Default::default() };
        let key1 = cache_key(&query_string(&build_query(&base, &ctx(), "en_US", 20)));
        let key2 = cache_key(&query_string(&build_query(&paged, &ctx(), "en_US", 20)));
        assert_ne!(key1, key2);
    }
}
