use super::super::analysis::{analyze_region, RegionAnalysis};
use super::super::domain::{Region, RegionCode};
use super::super::urgency::UrgencyLevel;
use serde::Serialize;

/// One side of a two-region comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedRegion {
    pub code: RegionCode,
    pub name: String,
    pub population: u64,
    pub aging_ratio: f64,
    pub aging_velocity: f64,
    pub urgency_score: f64,
    pub urgency_level: UrgencyLevel,
}

impl ComparedRegion {
    fn new(region: &Region, analysis: &RegionAnalysis) -> Self {
        Self {
            code: region.code.clone(),
            name: region.name.clone(),
            population: analysis.record.total_population,
            aging_ratio: analysis.metrics.aging_ratio,
            aging_velocity: analysis.trend.aging_velocity,
            urgency_score: analysis.urgency.total,
            urgency_level: analysis.urgency.level,
        }
    }
}

/// Side-by-side reading of two regions for the same year.
///
/// On a tie the second region is named as more aged, faster aging and the
/// funding priority.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionComparison {
    pub year: i32,
    pub first: ComparedRegion,
    pub second: ComparedRegion,
    /// Absolute aging-ratio gap in percentage points.
    pub aging_ratio_gap: f64,
    pub more_aged: RegionCode,
    pub faster_aging: RegionCode,
    pub priority: RegionCode,
    pub brief: String,
}

/// Compares two regions in `year`. `None` when either lacks that year.
pub fn compare_regions(first: &Region, second: &Region, year: i32) -> Option<RegionComparison> {
    let first = ComparedRegion::new(first, &analyze_region(first, year)?);
    let second = ComparedRegion::new(second, &analyze_region(second, year)?);

    let pick = |first_wins: bool| {
        if first_wins {
            &first
        } else {
            &second
        }
    };
    let more_aged = pick(first.aging_ratio > second.aging_ratio);
    let faster = pick(first.aging_velocity > second.aging_velocity);
    let priority = pick(first.urgency_score > second.urgency_score);
    let aging_ratio_gap = (first.aging_ratio - second.aging_ratio).abs();

    let brief = brief(&first, &second, more_aged, faster, priority, aging_ratio_gap);
    let (more_aged, faster_aging, priority) = (
        more_aged.code.clone(),
        faster.code.clone(),
        priority.code.clone(),
    );

    Some(RegionComparison {
        year,
        first,
        second,
        aging_ratio_gap,
        more_aged,
        faster_aging,
        priority,
        brief,
    })
}

fn brief(
    first: &ComparedRegion,
    second: &ComparedRegion,
    more_aged: &ComparedRegion,
    faster: &ComparedRegion,
    priority: &ComparedRegion,
    gap: f64,
) -> String {
    let (a, b) = (&first.name, &second.name);
    let size = match first.population.cmp(&second.population) {
        std::cmp::Ordering::Greater => '>',
        std::cmp::Ordering::Less => '<',
        std::cmp::Ordering::Equal => '=',
    };

    let mut text = format!("## {a} vs {b} 비교 분석\n\n");
    text.push_str(&format!(
        "**인구 규모**: {a}({}명) {size} {b}({}명)\n\n",
        grouped(first.population),
        grouped(second.population)
    ));
    text.push_str(&format!(
        "**고령화율**: {a}({:.1}%) vs {b}({:.1}%)\n→ {}이(가) {gap:.1}%p 더 고령화됨\n\n",
        first.aging_ratio, second.aging_ratio, more_aged.name
    ));
    text.push_str(&format!(
        "**고령화 속도**: {a}({:.1}%/년) vs {b}({:.1}%/년)\n→ {}의 고령화가 더 빠르게 진행 중\n\n",
        first.aging_velocity, second.aging_velocity, faster.name
    ));
    text.push_str("### 정책적 시사점\n\n");
    text.push_str(&format!(
        "{}에 대한 우선적 복지자원 배분이 필요합니다.",
        priority.name
    ));
    text
}

/// `1234567` → `"1,234,567"`.
fn grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
