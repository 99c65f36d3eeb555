use super::domain::YearRecord;
use serde::Serialize;

/// Ratios derived from a single [`YearRecord`]. All values are percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub aging_ratio: f64,
    pub old_old_ratio: f64,
    /// Unbounded above; every other field lies in `[0, 100]`.
    pub dependency_ratio: f64,
    pub children_ratio: f64,
    pub youth_ratio: f64,
    pub middle_ratio: f64,
    pub elderly_ratio: f64,
    pub young_old_ratio: f64,
    pub old_old_share: f64,
    pub single_household_ratio: f64,
    pub multicultural_household_ratio: f64,
    pub elderly_alone_ratio: f64,
    pub disability_ratio: f64,
    pub basic_livelihood_ratio: f64,
}

/// Derives the ratio set for one year. A zero denominator yields 0 for the
/// affected ratios instead of NaN or infinity.
pub fn compute_metrics(record: &YearRecord) -> Metrics {
    let total = record.total_population;
    let households = record.total_households;
    let elderly_ratio = share(record.elderly, total);

    Metrics {
        aging_ratio: elderly_ratio,
        old_old_ratio: share(record.old_old, record.elderly),
        dependency_ratio: ratio(record.dependents(), record.productive()),
        children_ratio: share(record.children, total),
        youth_ratio: share(record.youth, total),
        middle_ratio: share(record.middle, total),
        elderly_ratio,
        young_old_ratio: share(record.young_old, total),
        old_old_share: share(record.old_old, total),
        single_household_ratio: share(record.single_households, households),
        multicultural_household_ratio: share(record.multicultural_households, households),
        elderly_alone_ratio: share(record.elderly_alone, record.elderly),
        disability_ratio: share(record.disabled, total),
        basic_livelihood_ratio: share(record.basic_livelihood, total),
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64 * 100.0
}

/// Part-of-whole percentage; clamped because inconsistent source counts can
/// report a part larger than its whole.
fn share(part: u64, whole: u64) -> f64 {
    ratio(part, whole).min(100.0)
}
