//! Enrichment pipeline, one branch at a time, in input order.
//!
//! Per branch:  address → province → region
//!              coordinates → cache → [miss: geocode + nearby → analyze → store]

use crate::analyzer;
use crate::branch::{self, BranchRecord};
use crate::error::Result;
use crate::location::{EnrichmentCache, LocationProvider, LocationSummary};
use crate::province::{self, Region};
use serde::Serialize;
use std::time::Duration;

/// A branch with everything the report needs. Serialized field names are
/// the CSV column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedBranch {
    pub branch_code: String,
    #[serde(rename = "สาขา")]
    pub name: String,
    #[serde(rename = "ที่อยู่")]
    pub address: String,
    #[serde(rename = "จังหวัด")]
    pub province: String,
    #[serde(rename = "ภูมิภาค")]
    pub region: Region,
    pub postcode: String,
    #[serde(rename = "ผอ.สาขา")]
    pub manager: String,
    #[serde(rename = "เคาน์เตอร์ขาย")]
    pub sales_counter: String,
    #[serde(rename = "แคชเชียร์โครงสร้าง")]
    pub structure_cashier: String,
    #[serde(rename = "โทรศัพท์")]
    pub phone: String,
    #[serde(rename = "เวลาบริการ")]
    pub opening_hours: String,
    pub line: String,
    pub facebook: String,
    #[serde(rename = "เส้นทาง (Google Maps)")]
    pub maps_link: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(rename = "ทำเลเป็นแบบไหน")]
    pub location_type: String,
    #[serde(rename = "อยู่บนเส้นถนนแบบไหน")]
    pub road: String,
    #[serde(rename = "รอบๆมักเป็นอะไร")]
    pub surroundings: String,
    #[serde(rename = "สถานที่ใกล้เคียง")]
    pub nearby_places: String,
}

impl EnrichedBranch {
    fn assemble(record: &BranchRecord, province: String, summary: &LocationSummary) -> Self {
        let [manager, sales_counter, structure_cashier, phone, opening_hours] =
            branch::CONTACT_TITLES.map(|title| record.contact(title).to_string());

        Self {
            branch_code: record.branch_code.clone(),
            name: record.branch_name.clone(),
            address: record.branch_address.clone(),
            region: province::region_of(&province),
            province,
            postcode: record.postcode.clone(),
            manager,
            sales_counter,
            structure_cashier,
            phone,
            opening_hours,
            line: record.page_line.clone(),
            facebook: record.page_fb.clone(),
            maps_link: branch::maps_link(record.lat(), record.lon()),
            latitude: record.lat().to_string(),
            longitude: record.lon().to_string(),
            location_type: summary.location_type_line(),
            road: summary.road_description.clone(),
            surroundings: summary.poi_summary.clone(),
            nearby_places: summary.nearby_places_line(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub radius_m: u32,
    pub delay: Duration,
    pub offline: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            radius_m: crate::location::DEFAULT_RADIUS_M,
            delay: Duration::from_millis(crate::config::DEFAULT_DELAY_MS),
            offline: false,
        }
    }
}

/// Run counters, logged at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub cache_hits: usize,
    pub fetched: usize,
    pub skipped_offline: usize,
}

pub struct Pipeline<P: LocationProvider> {
    provider: P,
    cache: EnrichmentCache,
    options: PipelineOptions,
    stats: RunStats,
}

impl<P: LocationProvider> Pipeline<P> {
    pub fn new(provider: P, cache: EnrichmentCache, options: PipelineOptions) -> Self {
        Self {
            provider,
            cache,
            options,
            stats: RunStats::default(),
        }
    }

    pub fn cache(&self) -> &EnrichmentCache {
        &self.cache
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Location summary for a coordinate pair: cached, fetched, or (offline)
    /// the empty analysis.
    fn locate(&mut self, lat: &str, lon: &str) -> Result<LocationSummary> {
        if self.options.offline {
            return Ok(match self.cache.get(lat, lon) {
                Some(hit) => {
                    self.stats.cache_hits += 1;
                    hit.clone()
                }
                None => {
                    self.stats.skipped_offline += 1;
                    analyzer::analyze(None, &[])
                }
            });
        }

        let provider = &self.provider;
        let options = &self.options;
        let mut fetched = false;
        let summary = self.cache.get_or_compute(lat, lon, || {
            fetched = true;
            let geocode = provider.reverse_geocode(lat, lon);
            let places = provider.nearby_places(lat, lon, options.radius_m);
            if !options.delay.is_zero() {
                std::thread::sleep(options.delay);
            }
            analyzer::analyze(geocode.as_ref(), &places)
        })?;

        if fetched {
            self.stats.fetched += 1;
        } else {
            self.stats.cache_hits += 1;
        }
        Ok(summary)
    }

    /// Enrich one branch. Only cache persistence can fail.
    pub fn enrich(&mut self, record: &BranchRecord) -> Result<EnrichedBranch> {
        let province = province::resolve_province(&record.branch_address);
        let summary = self.locate(record.lat(), record.lon())?;
        Ok(EnrichedBranch::assemble(record, province, &summary))
    }

    /// Enrich every branch, in order.
    pub fn run(&mut self, records: &[BranchRecord]) -> Result<Vec<EnrichedBranch>> {
        let total = records.len();
        let mut out = Vec::with_capacity(total);

        for (i, record) in records.iter().enumerate() {
            log::info!("[{:02}/{}] {}", i + 1, total, record.branch_name);
            out.push(self.enrich(record)?);
        }

        log::info!(
            "Enriched {} branches ({} cached, {} fetched, {} skipped offline)",
            total,
            self.stats.cache_hits,
            self.stats.fetched,
            self.stats.skipped_offline,
        );
        Ok(out)
    }
}
