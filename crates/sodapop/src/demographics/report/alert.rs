use super::super::analysis::RegionAnalysis;
use super::super::domain::{Region, RegionCode};
use super::super::urgency::UrgencyLevel;
use super::narrative::detect_anomalies;
use super::views::Anomaly;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Stable,
    Warning,
    Alert,
}

impl AlertLevel {
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Stable => "✅",
            Self::Warning => "⚠️",
            Self::Alert => "🚨",
        }
    }
}

/// Short notification text for dashboards when a region's structure shifts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendAlert {
    pub region_code: RegionCode,
    pub region_name: String,
    pub year: i32,
    pub level: AlertLevel,
    pub anomalies: Vec<Anomaly>,
    pub message: String,
}

/// Builds the alert for one analysed region-year.
///
/// Without anomalies the alert is [`AlertLevel::Stable`]. Otherwise it is an
/// [`AlertLevel::Alert`] at high or critical urgency and a warning below that.
pub fn trend_alert(region: &Region, analysis: &RegionAnalysis) -> TrendAlert {
    let anomalies = detect_anomalies(&analysis.metrics, &analysis.trend);
    let urgency = analysis.urgency.level;
    let level = match (anomalies.is_empty(), urgency) {
        (true, _) => AlertLevel::Stable,
        (false, UrgencyLevel::Critical | UrgencyLevel::High) => AlertLevel::Alert,
        (false, _) => AlertLevel::Warning,
    };

    let message = if anomalies.is_empty() {
        format!("{} {}: 인구구조 안정적 추이", level.marker(), region.name)
    } else {
        let mut text = format!("{} {} 인구구조 변동 감지\n\n", level.marker(), region.name);
        for anomaly in &anomalies {
            text.push_str(&format!("• {}\n", anomaly.description()));
        }
        text.push_str(&format!("\n권장 조치: {}", urgency.guidance()));
        text
    };

    TrendAlert {
        region_code: region.code.clone(),
        region_name: region.name.clone(),
        year: analysis.year,
        level,
        anomalies,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demographics::analysis::analyze_region;
    use crate::demographics::domain::{SettlementType, YearRecord};

    fn record(total: u64, children: u64, youth: u64, middle: u64, elderly: u64, old_old: u64) -> YearRecord {
        YearRecord {
            total_population: total,
            total_households: total / 2,
            children,
            youth,
            middle,
            elderly,
            young_old: elderly - old_old,
            old_old,
            ..YearRecord::default()
        }
    }

    fn region(raw: &str, name: &str) -> Region {
        Region::new(RegionCode::parse(raw).expect("valid"), name, SettlementType::Rural)
    }

    #[test]
    fn super_aged_high_urgency_region_raises_alert() {
        let gunwi = region("4772000000", "경북 군위군")
            .with_year(2025, record(23_000, 1_500, 1_800, 9_700, 10_000, 5_500));
        let analysis = analyze_region(&gunwi, 2025).expect("2025 analysed");
        let alert = trend_alert(&gunwi, &analysis);

        assert_eq!(alert.level, AlertLevel::Alert);
        assert_eq!(alert.anomalies, vec![Anomaly::SuperAged]);
        assert!(alert.message.starts_with("🚨 경북 군위군 인구구조 변동 감지"));
        assert!(alert.message.contains("• 초고령사회 진입 (고령화율 20% 초과)"));
        assert!(alert.message.ends_with(analysis.urgency.level.guidance()));
    }

    #[test]
    fn quiet_region_reads_as_stable() {
        let gyeryong = region("4425000000", "충남 계룡시")
            .with_year(2021, record(44_000, 9_400, 8_400, 20_700, 5_500, 1_900))
            .with_year(2025, record(45_000, 9_000, 8_000, 21_500, 6_500, 2_300));
        let analysis = analyze_region(&gyeryong, 2025).expect("2025 analysed");
        let alert = trend_alert(&gyeryong, &analysis);

        assert_eq!(alert.level, AlertLevel::Stable);
        assert!(alert.anomalies.is_empty());
        assert_eq!(alert.message, "✅ 충남 계룡시: 인구구조 안정적 추이");
    }

    #[test]
    fn anomalies_below_high_urgency_only_warn() {
        // Shrinking population with a low elderly share.
        let shrinking = region("4681000000", "전남 가상군")
            .with_year(2021, record(50_000, 12_000, 12_000, 21_000, 5_000, 1_500))
            .with_year(2025, record(44_000, 10_000, 10_000, 19_000, 5_000, 1_500));
        let analysis = analyze_region(&shrinking, 2025).expect("2025 analysed");
        assert!(analysis.urgency.level < UrgencyLevel::High);

        let alert = trend_alert(&shrinking, &analysis);
        assert_eq!(alert.level, AlertLevel::Warning);
        assert!(alert.anomalies.contains(&Anomaly::PopulationCliff));
        assert!(alert.message.starts_with("⚠️"));
    }
}
