//! File-based enrichment cache, `cache_google.json` by default.
//!
//! Keyed by the raw "lat,lon" strings of the branch record. Entries never
//! expire; every insert rewrites the whole file so an interrupted run can
//! be resumed.

use super::types::LocationSummary;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CACHE_FILE: &str = "cache_google.json";

#[derive(Serialize, Deserialize, Clone)]
struct CacheEntry {
    #[serde(flatten)]
    summary: LocationSummary,
    /// Insert time, ms since epoch. Informational only.
    #[serde(default)]
    cached_at: i64,
}

/// Cache key for a coordinate pair. Not normalized: "13.70" and "13.700"
/// are different keys.
pub fn cache_key(lat: &str, lon: &str) -> String {
    format!("{},{}", lat.trim(), lon.trim())
}

/// `cache_google.json` → `cache_google.json.bak`.
fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

/// The enrichment cache. Single writer, single process.
pub struct EnrichmentCache {
    path: PathBuf,
    entries: BTreeMap<String, CacheEntry>,
}

impl EnrichmentCache {
    /// Load the cache from `path`. A missing file gives an empty cache.
    ///
    /// A file that exists but does not parse is moved aside to
    /// `<name>.bak` before starting empty, so the first insert cannot
    /// overwrite it. Failing to read or move it is an error.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = Self::read_file(&path)?;
        Ok(Self { path, entries })
    }

    fn read_file(path: &Path) -> Result<BTreeMap<String, CacheEntry>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(path)?;
        match serde_json::from_str(&data) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                let backup = backup_path(path);
                fs::rename(path, &backup)?;
                log::warn!(
                    "Unreadable cache {} ({}); moved to {} and starting empty",
                    path.display(),
                    e,
                    backup.display()
                );
                Ok(BTreeMap::new())
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, lat: &str, lon: &str) -> Option<&LocationSummary> {
        self.entries.get(&cache_key(lat, lon)).map(|e| &e.summary)
    }

    /// Store a summary and persist the whole cache before returning.
    pub fn insert(&mut self, lat: &str, lon: &str, summary: LocationSummary) -> Result<()> {
        let entry = CacheEntry {
            summary,
            cached_at: chrono::Utc::now().timestamp_millis(),
        };
        self.entries.insert(cache_key(lat, lon), entry);
        self.persist()
    }

    /// Return the cached summary for the pair, or run `compute`, store its
    /// result, persist, and return it. `compute` runs only on a miss.
    pub fn get_or_compute<F>(&mut self, lat: &str, lon: &str, compute: F) -> Result<LocationSummary>
    where
        F: FnOnce() -> LocationSummary,
    {
        if let Some(hit) = self.get(lat, lon) {
            log::debug!("Cache hit for {}", cache_key(lat, lon));
            return Ok(hit.clone());
        }
        let summary = compute();
        self.insert(lat, lon, summary.clone())?;
        Ok(summary)
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AtlasError;
    use std::cell::Cell;
    use tempfile::TempDir;

    fn test_cache() -> (EnrichmentCache, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        (EnrichmentCache::load_from(path).unwrap(), dir)
    }

    fn summary(road: &str) -> LocationSummary {
        LocationSummary {
            location_type: vec!["ใกล้โรงพยาบาล".into()],
            road_description: road.into(),
            poi_summary: "โรงพยาบาล(1)".into(),
            nearby_places: vec!["โรงพยาบาลกรุงเทพ".into()],
        }
    }

    #[test]
    fn test_cache_key_is_raw() {
        assert_eq!(cache_key(" 13.70 ", "100.50\n"), "13.70,100.50");
        assert_ne!(cache_key("13.70", "100.50"), cache_key("13.700", "100.500"));
    }

    #[test]
    fn test_cache_miss() {
        let (cache, _dir) = test_cache();
        assert!(cache.get("13.7", "100.5").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_or_compute_runs_once() {
        let (mut cache, _dir) = test_cache();
        let calls = Cell::new(0);

        let first = cache
            .get_or_compute("13.7563", "100.5018", || {
                calls.set(calls.get() + 1);
                summary("ถนนสุขุมวิท (ถนน)")
            })
            .unwrap();
        let second = cache
            .get_or_compute("13.7563", "100.5018", || {
                calls.set(calls.get() + 1);
                summary("something else")
            })
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_trailing_zeros_are_distinct() {
        let (mut cache, _dir) = test_cache();
        cache.insert("13.70", "100.50", summary("a")).unwrap();
        cache.insert("13.700", "100.500", summary("b")).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_write_through_persistence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("cache.json");

        {
            let mut cache = EnrichmentCache::load_from(&path).unwrap();
            cache
                .get_or_compute("18.79", "98.98", || summary("ถนนห้วยแก้ว (ถนน)"))
                .unwrap();
            // no explicit save
        }

        let reloaded = EnrichmentCache::load_from(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(
            reloaded.get("18.79", "98.98").unwrap().road_description,
            "ถนนห้วยแก้ว (ถนน)"
        );
    }

    #[test]
    fn test_corrupt_file_moved_aside() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "{ not json").unwrap();

        let cache = EnrichmentCache::load_from(&path).unwrap();
        assert!(cache.is_empty());
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(dir.path().join("cache.json.bak")).unwrap(), "{ not json");
    }

    #[test]
    fn test_legacy_cache_survives_first_insert() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CACHE_FILE);
        let legacy = r#"{
  "13.7563,100.5018": {
    "ทำเลเป็นแบบไหน": "ย่านทั่วไป",
    "อยู่บนเส้นถนนแบบไหน": "ไม่พบข้อมูล",
    "รอบๆมักเป็นอะไร": "ไม่พบข้อมูล",
    "สถานที่ใกล้เคียง": "ไม่พบข้อมูล"
  },
  "18.79,98.98": {
    "ทำเลเป็นแบบไหน": "ใกล้โรงพยาบาล",
    "อยู่บนเส้นถนนแบบไหน": "ถนนห้วยแก้ว (ถนน)",
    "รอบๆมักเป็นอะไร": "โรงพยาบาล(1)",
    "สถานที่ใกล้เคียง": "โรงพยาบาลมหาราช"
  }
}"#;
        fs::write(&path, legacy).unwrap();

        let mut cache = EnrichmentCache::load_from(&path).unwrap();
        assert!(cache.is_empty());
        cache.insert("7.88", "98.39", summary("ถนนเทพกระษัตรี (ถนน)")).unwrap();

        let backup = dir.path().join("cache_google.json.bak");
        assert_eq!(fs::read_to_string(&backup).unwrap(), legacy);
        let reloaded = EnrichmentCache::load_from(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.get("7.88", "98.39").is_some());
    }

    #[test]
    fn test_persist_failure_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "").unwrap();

        let mut cache = EnrichmentCache::load_from(blocker.join("cache.json")).unwrap();
        let result = cache.get_or_compute("13.7", "100.5", || summary("x"));
        assert!(matches!(result, Err(AtlasError::Io(_))));
    }

    #[test]
    fn test_cache_path_is_directory() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(EnrichmentCache::load_from(dir.path()), Err(AtlasError::Io(_))));
    }

    #[test]
    fn test_entry_without_timestamp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.json");
        let json = r#"{
            "7.88,98.39": {
                "location_type": ["ย่านทั่วไป"],
                "road_description": "ไม่พบข้อมูล",
                "poi_summary": "ไม่พบข้อมูล"
            }
        }"#;
        fs::write(&path, json).unwrap();

        let cache = EnrichmentCache::load_from(&path).unwrap();
        let hit = cache.get("7.88", "98.39").unwrap();
        assert_eq!(hit.location_type, vec!["ย่านทั่วไป".to_string()]);
        assert!(hit.nearby_places.is_empty());
    }
}
