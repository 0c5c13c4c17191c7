//! Turns one reverse-geocode result and one nearby-search result into a
//! [`LocationSummary`].

use crate::location::types::{GeocodeResult, LocationSummary, NearbyPlace};
use crate::poi;
use crate::road::{self, NO_DATA};

const TOP_CATEGORIES: usize = 7;
const MAX_NEARBY_NAMES: usize = 10;

pub const ORDINARY_AREA: &str = "ย่านทั่วไป";

/// Location-type rules, evaluated in order. Every rule whose trigger
/// labels intersect the histogram contributes its phrase.
const LOCATION_RULES: &[(&[&str], &str)] = &[
    (&["ห้างสรรพสินค้า", "ซูเปอร์มาร์เก็ต"], "ย่านพาณิชย์/ใกล้ห้าง"),
    (&["ร้านฮาร์ดแวร์", "ร้านของตกแต่งบ้าน", "ร้านเฟอร์นิเจอร์"], "ย่านค้าวัสดุ/ตกแต่งบ้าน"),
    (&["ตลาด", "ร้านอาหาร", "ร้านสะดวกซื้อ"], "ย่านชุมชน/ตลาด"),
    (&["โรงเรียน", "มหาวิทยาลัย"], "ใกล้สถานศึกษา"),
    (&["โรงพยาบาล"], "ใกล้โรงพยาบาล"),
    (&["ปั๊มน้ำมัน"], "ใกล้ปั๊มน้ำมัน"),
    (&["ที่พัก/โรงแรม"], "ใกล้ที่พัก/โรงแรม"),
];

/// Category label → count, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoiHistogram {
    entries: Vec<(&'static str, usize)>,
}

impl PoiHistogram {
    pub fn add(&mut self, label: &'static str) {
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((label, 1)),
        }
    }

    pub fn count(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map_or(0, |(_, n)| *n)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| *l == label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by descending count; ties keep first-seen order.
    pub fn ranked(&self) -> Vec<(&'static str, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Histogram of primary labels plus the names of every place that had at
/// least one usable tag (duplicates kept).
pub fn tally_places(places: &[NearbyPlace]) -> (PoiHistogram, Vec<&str>) {
    let mut histogram = PoiHistogram::default();
    let mut names = Vec::new();

    for place in places {
        let usable = poi::usable_tags(&place.types);
        if usable.is_empty() {
            continue;
        }

        let label = poi::primary_label(&usable);
        if !label.is_empty() {
            histogram.add(label);
        }
        if !place.name.is_empty() {
            names.push(place.name.as_str());
        }
    }

    (histogram, names)
}

/// `"{road} ({class})"`, or the no-data label without a road.
pub fn describe_road(geocode: Option<&GeocodeResult>) -> String {
    match geocode.and_then(GeocodeResult::road_name) {
        Some(name) if !name.is_empty() => format!("{} ({})", name, road::classify_road(name)),
        _ => NO_DATA.to_string(),
    }
}

/// Qualitative tags for the categories present. Falls back to
/// [`ORDINARY_AREA`] when no rule fires.
pub fn location_types(histogram: &PoiHistogram) -> Vec<String> {
    let mut parts: Vec<String> = LOCATION_RULES
        .iter()
        .filter(|(triggers, _)| triggers.iter().any(|t| histogram.contains(t)))
        .map(|(_, phrase)| phrase.to_string())
        .collect();

    if parts.is_empty() {
        parts.push(ORDINARY_AREA.to_string());
    }
    parts
}

fn summarize(histogram: &PoiHistogram) -> String {
    if histogram.is_empty() {
        return NO_DATA.to_string();
    }
    histogram
        .ranked()
        .iter()
        .take(TOP_CATEGORIES)
        .map(|(label, count)| format!("{}({})", label, count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn unique_names(names: Vec<&str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if out.len() == MAX_NEARBY_NAMES {
            break;
        }
        if !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}

/// Summarize the surroundings of one coordinate pair. Pure: the same input
/// always gives the same summary.
pub fn analyze(geocode: Option<&GeocodeResult>, places: &[NearbyPlace]) -> LocationSummary {
    let road_description = describe_road(geocode);
    let (histogram, names) = tally_places(places);

    LocationSummary {
        location_type: location_types(&histogram),
        road_description,
        poi_summary: summarize(&histogram),
        nearby_places: unique_names(names),
    }
}
