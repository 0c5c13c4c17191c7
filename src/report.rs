//! CSV export and province / region summaries.
//!
//! CSV files start with a UTF-8 BOM so spreadsheet tools pick up the Thai
//! text correctly.

use crate::error::Result;
use crate::pipeline::EnrichedBranch;
use crate::province::Region;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const BRANCHES_CSV: &str = "global_house_branches.csv";
pub const PROVINCE_SUMMARY_CSV: &str = "summary_province.csv";
pub const REGION_SUMMARY_CSV: &str = "summary_region.csv";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Serialize)]
struct ProvinceRow<'a> {
    #[serde(rename = "จังหวัด")]
    province: &'a str,
    #[serde(rename = "จำนวนสาขา")]
    count: usize,
}

#[derive(Serialize)]
struct RegionRow {
    #[serde(rename = "ภูมิภาค")]
    region: Region,
    #[serde(rename = "จำนวนสาขา")]
    count: usize,
}

// ─── Counting ───────────────────────────────────────────────────

/// Branches per province, most first; ties keep first appearance.
pub fn province_counts<'a, I>(branches: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a EnrichedBranch>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for b in branches {
        match counts.iter_mut().find(|(p, _)| *p == b.province) {
            Some((_, n)) => *n += 1,
            None => counts.push((b.province.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Branches per region in report order, regions without branches omitted.
pub fn region_counts(branches: &[EnrichedBranch]) -> Vec<(Region, usize)> {
    Region::REPORT_ORDER
        .iter()
        .map(|region| (*region, branches.iter().filter(|b| b.region == *region).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

// ─── Writers ────────────────────────────────────────────────────

fn bom_writer(path: &Path) -> Result<csv::Writer<File>> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;
    Ok(csv::Writer::from_writer(file))
}

pub fn write_branches_csv(path: &Path, branches: &[EnrichedBranch]) -> Result<()> {
    let mut writer = bom_writer(path)?;
    for b in branches {
        writer.serialize(b)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_province_summary(path: &Path, branches: &[EnrichedBranch]) -> Result<()> {
    let mut writer = bom_writer(path)?;
    for (province, count) in province_counts(branches) {
        writer.serialize(ProvinceRow { province: &province, count })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_region_summary(path: &Path, branches: &[EnrichedBranch]) -> Result<()> {
    let mut writer = bom_writer(path)?;
    for (region, count) in region_counts(branches) {
        writer.serialize(RegionRow { region, count })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write all three CSV files into `out_dir`, returning their paths.
pub fn write_all(out_dir: &Path, branches: &[EnrichedBranch]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    let branches_path = out_dir.join(BRANCHES_CSV);
    let province_path = out_dir.join(PROVINCE_SUMMARY_CSV);
    let region_path = out_dir.join(REGION_SUMMARY_CSV);

    write_branches_csv(&branches_path, branches)?;
    write_province_summary(&province_path, branches)?;
    write_region_summary(&region_path, branches)?;

    Ok(vec![branches_path, province_path, region_path])
}

// ─── Console summary ────────────────────────────────────────────

/// Per-province counts, per-region counts, then provinces within each region.
pub fn render_summary(branches: &[EnrichedBranch]) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();

    let _ = writeln!(out, "{}\nจังหวัดละกี่สาขา\n{}", rule, rule);
    for (province, count) in province_counts(branches) {
        let _ = writeln!(out, "  {}: {}", province, count);
    }

    let _ = writeln!(out, "\n{}\nแยกตาม ภูมิภาค\n{}", rule, rule);
    let regions = region_counts(branches);
    for (region, count) in &regions {
        let _ = writeln!(out, "  {}: {} สาขา", region, count);
    }

    let _ = writeln!(out, "\n{}\nProvince breakdown by Region\n{}", rule, rule);
    for (region, count) in &regions {
        let _ = writeln!(out, "\n{} ({} สาขา):", region, count);
        for (province, n) in province_counts(branches.iter().filter(|b| b.region == *region)) {
            let _ = writeln!(out, "    {}: {}", province, n);
        }
    }
    out
}
