//! Search response cache operations.
//!
//! Identical criteria within the expiration window are served from the
//! stored raw response without a new network round trip. Expired rows are
//! invisible to reads and removed opportunistically via [`CacheDb::purge_expired`].

use super::connection::CacheDb;
use crate::Error;
use chrono::{Duration, Utc};
use tokio_rusqlite::params;

impl CacheDb {
    /// Fetch the cached raw response for a query-string hash, if a fresh
    /// entry exists.
    pub async fn get_response(&self, key_hash: &str) -> Result<Option<String>, Error> {
        let key_hash = key_hash.to_string();
        let now = Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT response_json FROM response_cache
                     WHERE key_hash = ?1 AND expires_at > ?2",
                )?;

                let result = stmt.query_row(params![key_hash, now], |row| row.get(0));

                match result {
                    Ok(json) => Ok(Some(json)),
                    Err(tokio_rusqlite::rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Store a raw response under a query-string hash with a fresh
    /// expiration `ttl_seconds` from now. Upserts: a later write for the
    /// same key replaces the earlier one wholesale.
    pub async fn put_response(
        &self, key_hash: &str, criteria_json: &str, response_json: &str, ttl_seconds: i64,
    ) -> Result<(), Error> {
        let key_hash = key_hash.to_string();
        let criteria_json = criteria_json.to_string();
        let response_json = response_json.to_string();

        let now = Utc::now();
        let fetched_at = now.to_rfc3339();
        let expires_at = (now + Duration::seconds(ttl_seconds)).to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO response_cache (key_hash, criteria_json, response_json, fetched_at, expires_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(key_hash) DO UPDATE SET
                         criteria_json = excluded.criteria_json,
                         response_json = excluded.response_json,
                         fetched_at = excluded.fetched_at,
                         expires_at = excluded.expires_at",
                    params![key_hash, criteria_json, response_json, fetched_at, expires_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Delete expired rows, returning how many were removed.
    pub async fn purge_expired(&self) -> Result<u64, Error> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM response_cache WHERE expires_at < ?1", params![now])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::CacheDb;

    #[tokio::test]
    async fn test_put_then_get() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let response_json = r#"{"type":"JOBS","hits":0,"pages":0,"jobs":[]}"#;

        db.put_response("key1", r#"{"keywords":"rust"}"#, response_json, 600)
            .await
            .unwrap();

        let cached = db.get_response("key1").await.unwrap().unwrap();
        assert_eq!(cached, response_json);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = CacheDb::open_in_memory().await.unwrap();
        assert!(db.get_response("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_invisible() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.put_response("stale", "{}", "{}", 1).await.unwrap();

        assert!(db.get_response("stale").await.unwrap().is_some());
        tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;
        assert!(db.get_response("stale").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_row() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.put_response("key1", r#"{"page":1}"#, r#"{"old":1}"#, 600).await.unwrap();
        db.put_response("key1", r#"{"page":2}"#, r#"{"new":2}"#, 600).await.unwrap();

        let cached = db.get_response("key1").await.unwrap().unwrap();
        assert_eq!(cached, r#"{"new":2}"#);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.put_response("stale", "{}", "{}", 1).await.unwrap();
        db.put_response("fresh", "{}", "{}", 600).await.unwrap();

        tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;

        let deleted = db.purge_expired().await.unwrap();
        assert_eq!(deleted, 1);
        assert!(db.get_response("fresh").await.unwrap().is_some());
    }
}
