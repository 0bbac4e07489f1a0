//! On-disk result cache for station lookups
//!
//! A SQLite-backed key-value store mapping query strings to ordered
//! lists of [`Station`] records. The store is opened for the scope of a
//! single search call and closed when the handle drops, so data stays
//! durable across process restarts and early abandonment of a search
//! never leaks the file handle.
//!
//! Keys are matched fuzzily on read so minor rephrasings ("jazz ",
//! "Jazz") reuse cached data. An empty station list is never persisted:
//! replacing with an empty list deletes the key.

use crate::error::{Error, Result};
use crate::models::Station;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

/// Minimum normalized-key similarity for a fuzzy cache hit
pub const FUZZY_KEY_THRESHOLD: f64 = 0.85;

const TABLE: &str = "search_cache";

/// Scoped handle on the on-disk station cache
///
/// Open the cache around each search call; dropping the handle flushes
/// and closes the underlying database on every exit path.
#[derive(Debug)]
pub struct StationCache {
    conn: Connection,
}

impl StationCache {
    /// Open (or create) the cache database at `path`
    ///
    /// Parent directories are created as needed. Any failure maps to
    /// [`Error::CacheUnavailable`] so callers can degrade to a
    /// cache-less search.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::cache_unavailable(format!("{}: {}", path.display(), e)))?;
        }

        let conn = Connection::open(path)
            .map_err(|e| Error::cache_unavailable(format!("{}: {}", path.display(), e)))?;

        let create_table_sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                key TEXT PRIMARY KEY,
                stations TEXT NOT NULL,
                hits INTEGER DEFAULT 0,
                last_used TEXT
            )",
            TABLE
        );
        conn.execute(&create_table_sql, [])
            .map_err(|e| Error::cache_unavailable(format!("{}: {}", path.display(), e)))?;

        Ok(Self { conn })
    }

    /// Fetch the station lists for every key matching `key`
    ///
    /// With `fuzzy` set, stored keys match when their normalized forms
    /// are equal or within [`FUZZY_KEY_THRESHOLD`] Damerau–Levenshtein
    /// similarity; otherwise only the exact key matches. Results keep
    /// insertion order. Access statistics are bumped for every hit.
    pub fn get(&self, key: &str, fuzzy: bool) -> Result<Vec<(String, Vec<Station>)>> {
        let sql = format!("SELECT key, stations FROM {} ORDER BY rowid", TABLE);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let wanted = normalize_key(key);
        let mut matched = Vec::new();
        for (stored_key, stations_json) in rows {
            let hit = if fuzzy {
                keys_match(&normalize_key(&stored_key), &wanted)
            } else {
                stored_key == key
            };
            if hit {
                let stations: Vec<Station> = serde_json::from_str(&stations_json)?;
                matched.push((stored_key, stations));
            }
        }

        for (stored_key, _) in &matched {
            self.update_hit(stored_key)?;
        }

        Ok(matched)
    }

    /// Append a station to the list for `key`, creating the key if absent
    pub fn add(&self, key: &str, station: &Station) -> Result<()> {
        let mut stations = self.get_exact(key)?.unwrap_or_default();
        stations.push(station.clone());
        self.upsert(key, &stations)
    }

    /// Overwrite the list for `key`
    ///
    /// Replacing with an empty list deletes the key instead, preserving
    /// the no-empty-lists invariant.
    pub fn replace(&self, key: &str, stations: &[Station]) -> Result<()> {
        if stations.is_empty() {
            return self.delete(key);
        }
        self.upsert(key, stations)
    }

    /// Remove `key` entirely
    pub fn delete(&self, key: &str) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE key = ?1", TABLE);
        self.conn.execute(&sql, [key])?;
        Ok(())
    }

    /// Number of cached keys
    pub fn len(&self) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", TABLE);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Whether the cache holds no keys
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// All cached keys, in insertion order
    pub fn keys(&self) -> Result<Vec<String>> {
        let sql = format!("SELECT key FROM {} ORDER BY rowid", TABLE);
        let mut stmt = self.conn.prepare(&sql)?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(keys)
    }

    fn get_exact(&self, key: &str) -> Result<Option<Vec<Station>>> {
        let sql = format!("SELECT stations FROM {} WHERE key = ?1", TABLE);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query_map([key], |row| row.get::<_, String>(0))?;
        match rows.next() {
            Some(json) => Ok(Some(serde_json::from_str(&json?)?)),
            None => Ok(None),
        }
    }

    fn upsert(&self, key: &str, stations: &[Station]) -> Result<()> {
        let json = serde_json::to_string(stations)?;
        let sql = format!(
            "INSERT INTO {} (key, stations, hits, last_used)
             VALUES (?1, ?2, 0, ?3)
             ON CONFLICT(key) DO UPDATE SET
                 stations = excluded.stations,
                 last_used = excluded.last_used",
            TABLE
        );
        self.conn
            .execute(&sql, params![key, json, Utc::now().to_rfc3339()])?;
        Ok(())
    }

    fn update_hit(&self, key: &str) -> Result<()> {
        let sql = format!(
            "UPDATE {} SET hits = hits + 1, last_used = ?1 WHERE key = ?2",
            TABLE
        );
        self.conn
            .execute(&sql, params![Utc::now().to_rfc3339(), key])?;
        Ok(())
    }
}

/// Canonical form used for key comparison: lowercased, whitespace collapsed
fn normalize_key(key: &str) -> String {
    key.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn keys_match(stored: &str, wanted: &str) -> bool {
    stored == wanted || strsim::normalized_damerau_levenshtein(stored, wanted) >= FUZZY_KEY_THRESHOLD
}
