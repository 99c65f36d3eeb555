use super::RegionDataSource;
use crate::demographics::domain::{Region, RegionCode};
use std::collections::HashMap;

/// Region store backed by a vector, preserving insertion order for rankings.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRegionSource {
    regions: Vec<Region>,
    index: HashMap<RegionCode, usize>,
}

impl InMemoryRegionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a region; an already tracked code has its year map merged, with
    /// the incoming records taking precedence.
    pub fn insert(&mut self, region: Region) {
        match self.index.get(&region.code) {
            Some(&position) => {
                let existing = &mut self.regions[position];
                existing.name = region.name;
                existing.settlement = region.settlement;
                existing.data.extend(region.data);
            }
            None => {
                self.index.insert(region.code.clone(), self.regions.len());
                self.regions.push(region);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl FromIterator<Region> for InMemoryRegionSource {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        let mut source = Self::new();
        for region in iter {
            source.insert(region);
        }
        source
    }
}

impl RegionDataSource for InMemoryRegionSource {
    fn region(&self, code: &RegionCode) -> Option<&Region> {
        self.index.get(code).map(|&position| &self.regions[position])
    }

    fn regions(&self) -> Box<dyn Iterator<Item = &Region> + '_> {
        Box::new(self.regions.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demographics::domain::{SettlementType, YearRecord};

    fn code(raw: &str) -> RegionCode {
        RegionCode::parse(raw).expect("valid code")
    }

    #[test]
    fn preserves_insertion_order_and_merges_years() {
        let mut source = InMemoryRegionSource::new();
        source.insert(
            Region::new(code("4883000000"), "경남 합천군", SettlementType::Rural)
                .with_year(2021, YearRecord::default()),
        );
        source.insert(Region::new(code("1168000000"), "서울 강남구", SettlementType::Urban));
        source.insert(
            Region::new(code("4883000000"), "경남 합천군", SettlementType::Rural)
                .with_year(2025, YearRecord::default()),
        );

        let names: Vec<&str> = source.regions().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["경남 합천군", "서울 강남구"]);
        assert_eq!(source.len(), 2);

        let merged = source.region(&code("48830")).expect("region tracked");
        assert_eq!(merged.years(), vec![2021, 2025]);
        assert!(source.region(&code("1100000000")).is_none());
    }

    #[test]
    fn children_and_siblings_follow_code_prefixes() {
        let source: InMemoryRegionSource = [
            ("1100000000", "서울특별시"),
            ("1168000000", "서울 강남구"),
            ("1165000000", "서울 서초구"),
            ("1168010100", "신사동"),
            ("4100000000", "경기도"),
            ("4111000000", "경기 수원시"),
        ]
        .into_iter()
        .map(|(raw, name)| Region::new(code(raw), name, SettlementType::Urban))
        .collect();

        let names = |regions: Vec<&Region>| -> Vec<String> {
            regions.into_iter().map(|r| r.name.clone()).collect()
        };
        assert_eq!(names(source.children(&code("11"))), vec!["서울 강남구", "서울 서초구"]);
        assert_eq!(names(source.children(&code("11680"))), vec!["신사동"]);
        assert!(source.children(&code("1168010100")).is_empty());

        assert_eq!(names(source.siblings(&code("11680"))), vec!["서울 서초구"]);
        assert_eq!(names(source.siblings(&code("11"))), vec!["경기도"]);
        assert!(source.siblings(&code("0")).is_empty());
    }
}
