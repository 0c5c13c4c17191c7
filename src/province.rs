//! Province extraction from free-text Thai addresses and the
//! province → region lookup.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Reporting region a province belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "BKK&Metro")]
    BkkMetro,
    Central,
    Western,
    Eastern,
    Northern,
    Esan,
    Southern,
    Unknown,
}

impl Region {
    /// Order used for the region summary report.
    pub const REPORT_ORDER: [Region; 8] = [
        Region::BkkMetro,
        Region::Esan,
        Region::Eastern,
        Region::Western,
        Region::Northern,
        Region::Southern,
        Region::Central,
        Region::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::BkkMetro => "BKK&Metro",
            Self::Central => "Central",
            Self::Western => "Western",
            Self::Eastern => "Eastern",
            Self::Northern => "Northern",
            Self::Esan => "Esan",
            Self::Southern => "Southern",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─── Province table ─────────────────────────────────────────────

use Region::*;

const PROVINCE_REGION: &[(&str, Region)] = &[
    // BKK & Metro
    ("กรุงเทพมหานคร", BkkMetro), ("กรุงเทพฯ", BkkMetro),
    ("นนทบุรี", BkkMetro), ("ปทุมธานี", BkkMetro),
    ("สมุทรปราการ", BkkMetro), ("นครปฐม", BkkMetro),
    ("สมุทรสาคร", BkkMetro),
    // Central
    ("พระนครศรีอยุธยา", Central), ("ลพบุรี", Central),
    ("สิงห์บุรี", Central), ("ชัยนาท", Central),
    ("สระบุรี", Central), ("อ่างทอง", Central),
    ("สุพรรณบุรี", Central), ("นครนายก", Central),
    ("ฉะเชิงเทรา", Central), ("ปราจีนบุรี", Central),
    // Western
    ("กาญจนบุรี", Western), ("ราชบุรี", Western),
    ("สมุทรสงคราม", Western), ("เพชรบุรี", Western),
    ("ประจวบคีรีขันธ์", Western), ("ตาก", Western),
    // Eastern
    ("ชลบุรี", Eastern), ("ระยอง", Eastern),
    ("จันทบุรี", Eastern), ("ตราด", Eastern),
    ("สระแก้ว", Eastern),
    // Northern
    ("เชียงใหม่", Northern), ("เชียงราย", Northern),
    ("ลำปาง", Northern), ("ลำพูน", Northern),
    ("พะเยา", Northern), ("แพร่", Northern),
    ("น่าน", Northern), ("แม่ฮ่องสอน", Northern),
    ("อุตรดิตถ์", Northern), ("สุโขทัย", Northern),
    ("พิษณุโลก", Northern), ("พิจิตร", Northern),
    ("กำแพงเพชร", Northern), ("เพชรบูรณ์", Northern),
    ("นครสวรรค์", Northern), ("อุทัยธานี", Northern),
    // Esan
    ("นครราชสีมา", Esan), ("ขอนแก่น", Esan),
    ("อุดรธานี", Esan), ("อุบลราชธานี", Esan),
    ("เลย", Esan), ("หนองคาย", Esan),
    ("มหาสารคาม", Esan), ("กาฬสินธุ์", Esan),
    ("สกลนคร", Esan), ("นครพนม", Esan),
    ("ชัยภูมิ", Esan), ("ยโสธร", Esan),
    ("ร้อยเอ็ด", Esan), ("มุกดาหาร", Esan),
    ("สุรินทร์", Esan), ("ศรีสะเกษ", Esan),
    ("บุรีรัมย์", Esan), ("อำนาจเจริญ", Esan),
    ("หนองบัวลำภู", Esan), ("บึงกาฬ", Esan),
    // Southern
    ("นครศรีธรรมราช", Southern), ("สุราษฎร์ธานี", Southern),
    ("พัทลุง", Southern), ("สงขลา", Southern),
    ("ปัตตานี", Southern), ("ยะลา", Southern),
    ("นราธิวาส", Southern), ("กระบี่", Southern),
    ("ตรัง", Southern), ("พังงา", Southern),
    ("ภูเก็ต", Southern), ("ระนอง", Southern),
    ("ชุมพร", Southern), ("สตูล", Southern),
];

/// Province names for substring search: deduplicated, longest first.
///
/// Length is counted in chars, and the sort is stable so equal-length
/// names keep table order.
static PROVINCES_LONGEST_FIRST: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut seen = HashSet::new();
    let mut names: Vec<&'static str> = PROVINCE_REGION
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| seen.insert(*name))
        .collect();
    names.sort_by_key(|name| Reverse(name.chars().count()));
    names
});

static TRAILING_POSTCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\s*\d{5}['"]?\s*$"#).expect("valid postcode regex"));

static THAI_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ก-๛]+").expect("valid thai regex"));

static PROVINCE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^จังหว[ัับ][ด]?").expect("valid prefix regex"));

// ─── Lookup ─────────────────────────────────────────────────────

/// Extract the province from a free-text address.
///
/// Known province names are tried longest first so that a name containing
/// another name wins. When nothing in the table matches, the last run of
/// Thai text before the postcode is returned with any `จังหวัด` prefix
/// removed. That fallback is unvalidated and may yield a district name.
/// Returns an empty string when neither path finds anything.
pub fn resolve_province(address: &str) -> String {
    let clean = address.trim();

    if let Some(name) = PROVINCES_LONGEST_FIRST.iter().find(|name| clean.contains(**name)) {
        return (*name).to_string();
    }

    let no_postcode = TRAILING_POSTCODE.replace(clean, "");
    let no_postcode = no_postcode.trim();
    match THAI_RUN.find_iter(no_postcode).last() {
        Some(token) => PROVINCE_PREFIX.replace(token.as_str(), "").trim().to_string(),
        None => String::new(),
    }
}

/// Region for an exact province name; `Unknown` for anything not in the table.
pub fn region_of(province: &str) -> Region {
    PROVINCE_REGION
        .iter()
        .find(|(name, _)| *name == province)
        .map(|(_, region)| *region)
        .unwrap_or(Region::Unknown)
}

/// All canonical province names, in table order.
pub fn province_names() -> impl Iterator<Item = &'static str> {
    PROVINCE_REGION.iter().map(|(name, _)| *name)
}
