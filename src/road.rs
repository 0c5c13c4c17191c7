//! Road-name → coarse road-type label.

use regex::Regex;
use std::sync::LazyLock;

static ALL_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid digits regex"));

/// Sentinel used wherever there is nothing to report.
pub const NO_DATA: &str = "ไม่พบข้อมูล";

pub const NATIONAL_HIGHWAY: &str = "ทางหลวงแผ่นดิน";
pub const EXPRESSWAY: &str = "ทางด่วน/มอเตอร์เวย์";
pub const MINOR_LANE: &str = "ซอย (ถนนย่อย)";
pub const ROAD: &str = "ถนน";
pub const NUMBERED_HIGHWAY: &str = "ทางหลวง/ถนนหมายเลข";

/// Classify a road name. Rules are substring tests on the raw string and
/// the first one that matches wins.
pub fn classify_road(name: &str) -> &'static str {
    if name.is_empty() {
        return NO_DATA;
    }
    if name.contains("ทางหลวง") {
        return NATIONAL_HIGHWAY;
    }

    let lower = name.to_lowercase();
    if name.contains("มอเตอร์เวย์") || name.contains("ทางด่วน") || lower.contains("expressway") {
        return EXPRESSWAY;
    }
    if name.contains("ซอย") {
        return MINOR_LANE;
    }
    if name.contains("ถนน") || lower.contains("road") {
        return ROAD;
    }

    // Unicode digits, so Thai numerals count too
    if ALL_DIGITS.is_match(name.trim()) {
        return NUMBERED_HIGHWAY;
    }
    ROAD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(classify_road(""), NO_DATA);
    }

    #[test]
    fn test_minor_lane() {
        assert_eq!(classify_road("ซอยสุขุมวิท 31"), MINOR_LANE);
    }

    #[test]
    fn test_highway_beats_other_markers() {
        assert_eq!(classify_road("ทางหลวงแผ่นดินหมายเลข 1 ถนนพหลโยธิน"), NATIONAL_HIGHWAY);
        assert_eq!(classify_road("ทางด่วนศรีรัช"), EXPRESSWAY);
        assert_eq!(classify_road("Burapha Withi EXPRESSWAY"), EXPRESSWAY);
        assert_eq!(classify_road("มอเตอร์เวย์ 7"), EXPRESSWAY);
    }

    #[test]
    fn test_lane_before_road() {
        assert_eq!(classify_road("ถนนรามคำแหง ซอย 24"), MINOR_LANE);
    }

    #[test]
    fn test_road_markers() {
        assert_eq!(classify_road("ถนนเพชรเกษม"), ROAD);
        assert_eq!(classify_road("Sukhumvit Road"), ROAD);
        assert_eq!(classify_road("RAMA IX ROAD"), ROAD);
    }

    #[test]
    fn test_numbered() {
        assert_eq!(classify_road("304"), NUMBERED_HIGHWAY);
        assert_eq!(classify_road(" 12 "), NUMBERED_HIGHWAY);
        assert_eq!(classify_road("๓๐๔"), NUMBERED_HIGHWAY);
        assert_eq!(classify_road("12A"), ROAD);
    }

    #[test]
    fn test_plain_name_defaults_to_road() {
        assert_eq!(classify_road("มิตรภาพ"), ROAD);
        assert_eq!(classify_road("   "), ROAD);
    }
}
