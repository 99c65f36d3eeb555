use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Number of digits in a fully padded administrative H-Code.
pub const H_CODE_LEN: usize = 10;
const PROVINCE_PREFIX_LEN: usize = 2;
const MUNICIPALITY_PREFIX_LEN: usize = 5;

/// Administrative level encoded by an H-Code's zero padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminLevel {
    National,
    Province,
    Municipality,
    Neighborhood,
}

impl AdminLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::National => "전국",
            Self::Province => "시도",
            Self::Municipality => "시군구",
            Self::Neighborhood => "읍면동",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "national" | "전국" => Some(Self::National),
            "province" | "시도" => Some(Self::Province),
            "municipality" | "시군구" => Some(Self::Municipality),
            "neighborhood" | "읍면동" => Some(Self::Neighborhood),
            _ => None,
        }
    }
}

/// Hierarchical administrative region code (nation → province → municipality → neighborhood).
///
/// Codes are normalised to ten digits: shorter inputs are right-padded with
/// `0`, longer ones truncated. `"11680"` and `"1168000000"` are the same region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionCode(String);

impl RegionCode {
    pub fn parse(raw: &str) -> Result<Self, InvalidRegionCode> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidRegionCode(raw.to_string()));
        }

        let mut code: String = trimmed.chars().take(H_CODE_LEN).collect();
        while code.len() < H_CODE_LEN {
            code.push('0');
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn level(&self) -> AdminLevel {
        let digits = self.0.as_bytes();
        let zero_from = |start: usize| digits[start..].iter().all(|b| *b == b'0');

        if zero_from(0) {
            AdminLevel::National
        } else if zero_from(PROVINCE_PREFIX_LEN) {
            AdminLevel::Province
        } else if zero_from(MUNICIPALITY_PREFIX_LEN) {
            AdminLevel::Municipality
        } else {
            AdminLevel::Neighborhood
        }
    }

    /// True for nation- and province-level totals, which are excluded from
    /// municipality rankings.
    pub fn is_aggregate(&self) -> bool {
        matches!(self.level(), AdminLevel::National | AdminLevel::Province)
    }

    pub fn province_code(&self) -> RegionCode {
        self.padded_prefix(PROVINCE_PREFIX_LEN)
    }

    pub fn municipality_code(&self) -> RegionCode {
        self.padded_prefix(MUNICIPALITY_PREFIX_LEN)
    }

    /// Enclosing region one level up. Provinces and the nation have none.
    pub fn parent(&self) -> Option<RegionCode> {
        match self.level() {
            AdminLevel::Neighborhood => Some(self.municipality_code()),
            AdminLevel::Municipality => Some(self.province_code()),
            AdminLevel::Province | AdminLevel::National => None,
        }
    }

    /// Enclosing regions from the province down to the direct parent.
    pub fn ancestors(&self) -> Vec<RegionCode> {
        match self.level() {
            AdminLevel::Neighborhood => vec![self.province_code(), self.municipality_code()],
            AdminLevel::Municipality => vec![self.province_code()],
            AdminLevel::Province | AdminLevel::National => Vec::new(),
        }
    }

    pub fn is_child_of(&self, parent: &RegionCode) -> bool {
        self.parent().as_ref() == Some(parent)
    }

    fn padded_prefix(&self, len: usize) -> RegionCode {
        let mut code = self.0[..len].to_string();
        code.push_str(&"0".repeat(H_CODE_LEN - len));
        RegionCode(code)
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RegionCode {
    type Error = InvalidRegionCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RegionCode> for String {
    fn from(value: RegionCode) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("region code '{0}' must be a non-empty string of digits")]
pub struct InvalidRegionCode(pub String);

/// Settlement classifier. Only the synthetic generator reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementType {
    #[default]
    Urban,
    Suburban,
    Rural,
}

impl SettlementType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Urban => "도시",
            Self::Suburban => "도농복합",
            Self::Rural => "농어촌",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "urban" | "도시" => Some(Self::Urban),
            "suburban" | "도농복합" => Some(Self::Suburban),
            "rural" | "농어촌" => Some(Self::Rural),
            _ => None,
        }
    }
}

/// Raw counts for one region in one year.
///
/// `children + youth + middle + elderly` partitions `total_population`
/// (0–18, 19–34, 35–64, 65+) and `young_old + old_old` partitions `elderly`
/// (65–74, 75+).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRecord {
    pub total_population: u64,
    pub total_households: u64,
    pub children: u64,
    pub youth: u64,
    pub middle: u64,
    pub elderly: u64,
    pub young_old: u64,
    pub old_old: u64,
    #[serde(default)]
    pub single_households: u64,
    #[serde(default)]
    pub multicultural_households: u64,
    #[serde(default)]
    pub disabled: u64,
    #[serde(default)]
    pub basic_livelihood: u64,
    #[serde(default)]
    pub elderly_alone: u64,
}

impl YearRecord {
    /// Working-age population (19–64).
    pub fn productive(&self) -> u64 {
        self.youth.saturating_add(self.middle)
    }

    /// Sum of the four age bands. Saturates at `u64::MAX`.
    pub fn band_sum(&self) -> u64 {
        self.children
            .saturating_add(self.youth)
            .saturating_add(self.middle)
            .saturating_add(self.elderly)
    }

    /// Checks both partition invariants within `tolerance` people.
    pub fn is_conserved(&self, tolerance: u64) -> bool {
        self.band_sum().abs_diff(self.total_population) <= tolerance
            && self
                .young_old
                .saturating_add(self.old_old)
                .abs_diff(self.elderly)
                <= tolerance
    }

    /// Dependent population (0–18 and 65+).
    pub fn dependents(&self) -> u64 {
        self.children.saturating_add(self.elderly)
    }
}

/// An administrative region together with its yearly records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub code: RegionCode,
    pub name: String,
    pub settlement: SettlementType,
    /// Keyed by calendar year; iteration is always in ascending year order.
    pub data: BTreeMap<i32, YearRecord>,
}

impl Region {
    pub fn new(code: RegionCode, name: impl Into<String>, settlement: SettlementType) -> Self {
        Self {
            code,
            name: name.into(),
            settlement,
            data: BTreeMap::new(),
        }
    }

    pub fn with_year(mut self, year: i32, record: YearRecord) -> Self {
        self.data.insert(year, record);
        self
    }

    pub fn record(&self, year: i32) -> Option<&YearRecord> {
        self.data.get(&year)
    }

    pub fn years(&self) -> Vec<i32> {
        self.data.keys().copied().collect()
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.data.keys().next_back().copied()
    }
}
