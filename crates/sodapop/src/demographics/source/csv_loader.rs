use super::{DataSourceError, InMemoryRegionSource};
use crate::demographics::domain::{Region, RegionCode, SettlementType, YearRecord};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Imports a long-format statistics export (one row per region and year).
pub struct CsvRegionLoader;

impl CsvRegionLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<InMemoryRegionSource, DataSourceError> {
        let file = std::fs::File::open(path.as_ref())?;
        info!(path = %path.as_ref().display(), "loading region CSV export");
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<InMemoryRegionSource, DataSourceError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut source = InMemoryRegionSource::new();
        let mut rows = 0usize;
        let mut skipped_totals = 0usize;

        for (index, row) in csv_reader.deserialize::<RegionRow>().enumerate() {
            let row = row?;
            // Header is line 1.
            let line = index + 2;

            if is_total_row(&row.region_name) {
                warn!(
                    row = line,
                    name = %row.region_name,
                    code = %row.region_code,
                    "skipping statistical total row"
                );
                skipped_totals += 1;
                continue;
            }

            let code = RegionCode::parse(&row.region_code)
                .map_err(|source| DataSourceError::InvalidCode { row: line, source })?;
            let settlement = match row.settlement.as_deref() {
                None => SettlementType::default(),
                Some(value) => SettlementType::from_label(value).ok_or_else(|| {
                    DataSourceError::InvalidSettlement {
                        row: line,
                        value: value.to_string(),
                    }
                })?,
            };

            let record = row.record();
            if !record.is_conserved(1) {
                warn!(
                    region = %code,
                    year = row.year,
                    band_sum = record.band_sum(),
                    total = record.total_population,
                    "age bands do not partition the population"
                );
            }

            source.insert(
                Region::new(code, row.region_name, settlement).with_year(row.year, record),
            );
            rows += 1;
        }

        info!(
            regions = source.len(),
            rows, skipped_totals, "region CSV export loaded"
        );
        Ok(source)
    }
}

const TOTAL_MARKERS: [&str; 4] = ["소계", "합계", "전국", "전체"];

/// Names ending in `계` or containing one of [`TOTAL_MARKERS`] mark statistical
/// totals. A bare `계` only counts at the end, so `충남 계룡시` stays a real region.
fn is_total_row(name: &str) -> bool {
    let name = name.trim();
    name.ends_with('계') || TOTAL_MARKERS.iter().any(|marker| name.contains(marker))
}

#[derive(Debug, Deserialize)]
struct RegionRow {
    region_code: String,
    region_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    settlement: Option<String>,
    year: i32,
    total_population: u64,
    #[serde(default)]
    households: u64,
    children: u64,
    youth: u64,
    middle: u64,
    elderly: u64,
    young_old: u64,
    old_old: u64,
    #[serde(default)]
    single_households: u64,
    #[serde(default)]
    multicultural_households: u64,
    #[serde(default)]
    disabled: u64,
    #[serde(default)]
    basic_livelihood: u64,
    #[serde(default)]
    elderly_alone: u64,
}

impl RegionRow {
    fn record(&self) -> YearRecord {
        YearRecord {
            total_population: self.total_population,
            total_households: self.households,
            children: self.children,
            youth: self.youth,
            middle: self.middle,
            elderly: self.elderly,
            young_old: self.young_old,
            old_old: self.old_old,
            single_households: self.single_households,
            multicultural_households: self.multicultural_households,
            disabled: self.disabled,
            basic_livelihood: self.basic_livelihood,
            elderly_alone: self.elderly_alone,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
