use super::InMemoryRegionSource;
use crate::demographics::domain::{Region, RegionCode, SettlementType, YearRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::{Range, RangeInclusive};
use tracing::info;

const DEFAULT_REGIONS: [(&str, &str); 27] = [
    ("1100000000", "서울특별시"),
    ("1168000000", "서울 강남구"),
    ("1165000000", "서울 서초구"),
    ("1174000000", "서울 노원구"),
    ("1171000000", "서울 송파구"),
    ("2600000000", "부산광역시"),
    ("2626000000", "부산 해운대구"),
    ("2623000000", "부산 동래구"),
    ("2711000000", "대구 중구"),
    ("2800000000", "인천광역시"),
    ("4100000000", "경기도"),
    ("4111000000", "경기 수원시"),
    ("4113000000", "경기 성남시"),
    ("4115000000", "경기 고양시"),
    ("4117000000", "경기 용인시"),
    ("4119000000", "경기 안양시"),
    ("4121000000", "경기 부천시"),
    ("4273000000", "강원 홍천군"),
    ("4272000000", "강원 평창군"),
    ("4337000000", "충북 옥천군"),
    ("4372000000", "충북 영동군"),
    ("4461000000", "충남 계룡시"),
    ("4582000000", "전북 순창군"),
    ("4677000000", "전남 신안군"),
    ("4790000000", "경북 군위군"),
    ("4883000000", "경남 합천군"),
    ("5000000000", "제주특별자치도"),
];

/// A region the generator should fabricate data for.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticRegionSpec {
    pub code: RegionCode,
    pub name: String,
    pub settlement: SettlementType,
}

impl SyntheticRegionSpec {
    /// Infers the settlement type from the Korean suffix: `군` counties are
    /// rural, `구` districts urban, everything else suburban.
    pub fn new(code: RegionCode, name: impl Into<String>) -> Self {
        let name = name.into();
        let settlement = if name.ends_with('군') {
            SettlementType::Rural
        } else if name.ends_with('구') {
            SettlementType::Urban
        } else {
            SettlementType::Suburban
        };
        Self {
            code,
            name,
            settlement,
        }
    }

    pub fn defaults() -> Vec<Self> {
        DEFAULT_REGIONS
            .iter()
            .filter_map(|(code, name)| RegionCode::parse(code).ok().map(|c| Self::new(c, *name)))
            .collect()
    }
}

struct SettlementProfile {
    base_population: Range<u64>,
    base_aging_ratio: Range<f64>,
    aging_velocity: Range<f64>,
    population_change: Range<f64>,
}

impl SettlementProfile {
    fn for_type(settlement: SettlementType) -> Self {
        match settlement {
            SettlementType::Rural => Self {
                base_population: 15_000..50_000,
                base_aging_ratio: 25.0..40.0,
                aging_velocity: 3.0..8.0,
                population_change: -2.0..-0.5,
            },
            SettlementType::Urban => Self {
                base_population: 200_000..500_000,
                base_aging_ratio: 12.0..22.0,
                aging_velocity: 2.0..5.0,
                population_change: -1.0..1.0,
            },
            SettlementType::Suburban => Self {
                base_population: 500_000..3_000_000,
                base_aging_ratio: 15.0..25.0,
                aging_velocity: 2.5..5.5,
                population_change: -0.5..0.5,
            },
        }
    }
}

/// Seeded demo-data generator. The same seed, years and regions always
/// produce the same data, and every record partitions its population exactly.
#[derive(Debug, Clone)]
pub struct SyntheticRegionGenerator {
    seed: u64,
    years: RangeInclusive<i32>,
    regions: Vec<SyntheticRegionSpec>,
}

impl SyntheticRegionGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            years: 2021..=2025,
            regions: SyntheticRegionSpec::defaults(),
        }
    }

    pub fn with_years(mut self, years: RangeInclusive<i32>) -> Self {
        self.years = years;
        self
    }

    pub fn with_regions(mut self, regions: Vec<SyntheticRegionSpec>) -> Self {
        self.regions = regions;
        self
    }

    pub fn generate(&self) -> InMemoryRegionSource {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let source: InMemoryRegionSource = self
            .regions
            .iter()
            .map(|spec| self.generate_region(spec, &mut rng))
            .collect();

        info!(
            seed = self.seed,
            regions = source.len(),
            first_year = *self.years.start(),
            last_year = *self.years.end(),
            "generated synthetic region data"
        );
        source
    }

    fn generate_region(&self, spec: &SyntheticRegionSpec, rng: &mut StdRng) -> Region {
        let profile = SettlementProfile::for_type(spec.settlement);
        let base_population = rng.gen_range(profile.base_population.clone()) as f64;
        let base_aging = rng.gen_range(profile.base_aging_ratio.clone());
        let velocity = rng.gen_range(profile.aging_velocity.clone());
        let population_change = rng.gen_range(profile.population_change.clone());

        let mut region = Region::new(spec.code.clone(), spec.name.clone(), spec.settlement);
        for (step, year) in self.years.clone().enumerate() {
            let step = step as f64;
            let total = (base_population * (1.0 + population_change / 100.0 * step)).max(0.0);
            let aging_ratio = (base_aging * (1.0 + velocity / 100.0 * step)).min(60.0);
            let children_ratio = (18.0 - aging_ratio * 0.3 - step * 0.5).max(8.0);

            let record = fabricate_record(total as u64, aging_ratio, children_ratio, rng);
            region.data.insert(year, record);
        }
        region
    }
}

fn fabricate_record(total: u64, aging_ratio: f64, children_ratio: f64, rng: &mut StdRng) -> YearRecord {
    let portion = |whole: u64, share: f64| (whole as f64 * share) as u64;

    let elderly = portion(total, aging_ratio / 100.0);
    let young_old = portion(elderly, rng.gen_range(0.55..0.65));
    let children = portion(total, children_ratio / 100.0);
    let productive = total.saturating_sub(elderly + children);
    let youth = portion(productive, rng.gen_range(0.28..0.38));
    let households = portion(total, 1.0 / rng.gen_range(2.0..2.5));

    YearRecord {
        total_population: total,
        total_households: households,
        children,
        youth,
        middle: productive - youth,
        elderly,
        young_old,
        old_old: elderly - young_old,
        single_households: portion(households, rng.gen_range(0.28..0.40)),
        multicultural_households: portion(households, rng.gen_range(0.01..0.03)),
        disabled: portion(total, rng.gen_range(0.04..0.07)),
        basic_livelihood: portion(total, rng.gen_range(0.03..0.08)),
        elderly_alone: portion(elderly, rng.gen_range(0.18..0.28)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demographics::source::RegionDataSource;

    #[test]
    fn same_seed_produces_identical_data() {
        let first = SyntheticRegionGenerator::new(7).generate();
        let second = SyntheticRegionGenerator::new(7).generate();
        let left: Vec<&Region> = first.regions().collect();
        let right: Vec<&Region> = second.regions().collect();
        assert_eq!(left, right);
    }

    #[test]
    fn every_record_partitions_its_population() {
        let source = SyntheticRegionGenerator::new(42).generate();
        assert_eq!(source.len(), DEFAULT_REGIONS.len());
        for region in source.regions() {
            assert_eq!(region.years(), vec![2021, 2022, 2023, 2024, 2025]);
            for record in region.data.values() {
                assert!(record.is_conserved(0), "{} violates conservation", region.name);
                assert!(record.elderly > 0);
            }
        }
    }

    #[test]
    fn settlement_follows_name_suffix() {
        let specs = SyntheticRegionSpec::defaults();
        let find = |name: &str| {
            specs
                .iter()
                .find(|spec| spec.name == name)
                .map(|spec| spec.settlement)
        };
        assert_eq!(find("강원 홍천군"), Some(SettlementType::Rural));
        assert_eq!(find("서울 강남구"), Some(SettlementType::Urban));
        assert_eq!(find("경기 수원시"), Some(SettlementType::Suburban));
    }

    #[test]
    fn custom_year_range_is_respected() {
        let spec = SyntheticRegionSpec::new(
            RegionCode::parse("4677000000").expect("valid"),
            "전남 신안군",
        );
        let source = SyntheticRegionGenerator::new(1)
            .with_years(2018..=2020)
            .with_regions(vec![spec])
            .generate();
        let region = source.regions().next().expect("one region");
        assert_eq!(region.years(), vec![2018, 2019, 2020]);
    }
}
