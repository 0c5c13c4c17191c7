//! Branch records from the store-finder feed.

use crate::error::{AtlasError, Result};
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SOURCE_URL: &str = "https://globalhouse.co.th/api/storefinder/storeDataOnline";
const SOURCE_TIMEOUT: Duration = Duration::from_secs(30);

/// Contact titles exported as their own report columns.
pub const CONTACT_TITLES: [&str; 5] = [
    "ผอ.สาขา",
    "เคาน์เตอร์ขาย",
    "แคชเชียร์โครงสร้าง",
    "โทรศัพท์",
    "เวลาบริการ",
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub detail: String,
}

/// One branch as published by the store finder. Field names follow the feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BranchRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub branch_code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub branch_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub branch_address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub postcode: String,
    #[serde(default, deserialize_with = "lenient_contacts")]
    pub contact_data: Vec<Contact>,
    /// Latitude, as published (the feed spells it "lut").
    #[serde(default, deserialize_with = "lenient_string")]
    pub branch_lut: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub branch_long: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub page_line: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub page_fb: String,
}

impl BranchRecord {
    pub fn lat(&self) -> &str {
        self.branch_lut.trim()
    }

    pub fn lon(&self) -> &str {
        self.branch_long.trim()
    }

    /// Detail of the first contact with this exact title, or "".
    pub fn contact(&self, title: &str) -> &str {
        self.contact_data
            .iter()
            .find(|c| c.title == title)
            .map_or("", |c| c.detail.as_str())
    }
}

/// Google Maps link for a coordinate pair.
pub fn maps_link(lat: &str, lon: &str) -> String {
    format!("https://maps.google.com/?q={},{}", lat.trim(), lon.trim())
}

// ─── Loading ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct BranchFeed {
    #[serde(default)]
    data: Vec<BranchRecord>,
}

pub fn parse_feed(json: &str) -> Result<Vec<BranchRecord>> {
    let feed: BranchFeed = serde_json::from_str(json)?;
    Ok(feed.data)
}

/// Fetch the branch list from the store-finder API.
pub fn fetch_branches(url: &str) -> Result<Vec<BranchRecord>> {
    let response = ureq::get(url)
        .set("User-Agent", concat!("BranchAtlas/", env!("CARGO_PKG_VERSION")))
        .timeout(SOURCE_TIMEOUT)
        .call()
        .map_err(|e| AtlasError::Network(e.to_string()))?;

    let body = response
        .into_string()
        .map_err(|e| AtlasError::InvalidResponse(e.to_string()))?;
    parse_feed(&body).map_err(|e| AtlasError::InvalidResponse(e.to_string()))
}

/// Read a saved copy of the feed (`{"data": [...]}`) from disk.
pub fn load_branches(path: &Path) -> Result<Vec<BranchRecord>> {
    let json = std::fs::read_to_string(path)?;
    parse_feed(&json)
}

// ─── Lenient field decoding ─────────────────────────────────────

/// Accept strings, numbers, and null for text fields.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_contacts<'de, D>(deserializer: D) -> std::result::Result<Vec<Contact>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Contact>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "data": [
            {
                "branch_code": "GH001",
                "branch_name": "สาขาราชบุรี",
                "branch_address": "99 หมู่ 1 ถนนเพชรเกษม ต.หน้าเมือง อ.เมือง จ.ราชบุรี 70000",
                "postcode": 70000,
                "contact_data": [
                    {"title": "โทรศัพท์", "detail": "032-000-000"},
                    {"title": "เวลาบริการ", "detail": "08:00-20:00"}
                ],
                "branch_lut": " 13.5360 ",
                "branch_long": "99.8170",
                "page_line": null
            },
            {"branch_name": "สาขาว่าง", "contact_data": null}
        ]
    }"#;

    #[test]
    fn test_parse_feed() {
        let branches = parse_feed(FEED).unwrap();
        assert_eq!(branches.len(), 2);

        let b = &branches[0];
        assert_eq!(b.branch_code, "GH001");
        assert_eq!(b.postcode, "70000");
        assert_eq!(b.lat(), "13.5360");
        assert_eq!(b.page_line, "");
        assert_eq!(b.contact("โทรศัพท์"), "032-000-000");
        assert_eq!(b.contact("ผอ.สาขา"), "");

        let empty = &branches[1];
        assert!(empty.contact_data.is_empty());
        assert_eq!(empty.lat(), "");
    }

    #[test]
    fn test_maps_link() {
        assert_eq!(
            maps_link(" 13.5360", "99.8170 "),
            "https://maps.google.com/?q=13.5360,99.8170"
        );
    }

    #[test]
    fn test_feed_without_data() {
        assert!(parse_feed("{}").unwrap().is_empty());
        assert!(parse_feed("[1, 2]").is_err());
    }

    #[test]
    fn test_load_branches_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("branches.json");
        std::fs::write(&path, FEED).unwrap();
        assert_eq!(load_branches(&path).unwrap().len(), 2);
    }
}
