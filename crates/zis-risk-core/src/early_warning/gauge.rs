use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::feed::RatioReadings;
use super::rules::EarlyWarningConfig;
use crate::types::Percent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GaugeZone {
    Good,
    Warning,
    Critical,
}

/// Static shape of one ratio gauge. The good threshold comes from the
/// early-warning configuration so banner and gauge agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeSpec {
    pub label: String,
    pub unit: String,
    pub max_value: Percent,
    pub warning_threshold: Percent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    pub rha: GaugeSpec,
    pub acr: GaugeSpec,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        GaugeConfig {
            rha: GaugeSpec {
                label: "Rasio Hak Amil (RHA)".to_string(),
                unit: "%".to_string(),
                max_value: dec!(25),
                warning_threshold: dec!(15),
            },
            acr: GaugeSpec {
                label: "Saldo Kas Mengendap (ACR)".to_string(),
                unit: "%".to_string(),
                max_value: dec!(20),
                warning_threshold: dec!(15),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeReading {
    pub label: String,
    pub unit: String,
    /// Reading rounded to one decimal place.
    pub value: Percent,
    pub max_value: Percent,
    pub good_threshold: Percent,
    pub warning_threshold: Percent,
    pub zone: GaugeZone,
    /// Share of the dial filled, 0..=100.
    pub fill_pct: Percent,
}

/// `value <= good` is Good, `value <= warning` is Warning, anything above is Critical.
pub fn gauge_zone(value: Decimal, good: Decimal, warning: Decimal) -> GaugeZone {
    if value <= good {
        GaugeZone::Good
    } else if value <= warning {
        GaugeZone::Warning
    } else {
        GaugeZone::Critical
    }
}

fn read_gauge(spec: &GaugeSpec, good_threshold: Decimal, raw: Decimal) -> GaugeReading {
    let value = raw.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    let fill_pct = if spec.max_value <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        value
            .checked_div(spec.max_value)
            .and_then(|f| f.checked_mul(dec!(100)))
            .unwrap_or(if value > Decimal::ZERO { dec!(100) } else { Decimal::ZERO })
            .max(Decimal::ZERO)
            .min(dec!(100))
            .round_dp(2)
    };
    GaugeReading {
        label: spec.label.clone(),
        unit: spec.unit.clone(),
        value,
        max_value: spec.max_value,
        good_threshold,
        warning_threshold: spec.warning_threshold,
        zone: gauge_zone(value, good_threshold, spec.warning_threshold),
        fill_pct,
    }
}

/// RHA and ACR gauges, in that order.
pub fn ratio_gauges(
    readings: &RatioReadings,
    thresholds: &EarlyWarningConfig,
    gauges: &GaugeConfig,
) -> Vec<GaugeReading> {
    vec![
        read_gauge(&gauges.rha, thresholds.rha_good_threshold, readings.rha),
        read_gauge(&gauges.acr, thresholds.acr_good_threshold, readings.acr),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_boundaries_inclusive() {
        assert_eq!(gauge_zone(dec!(12.5), dec!(12.5), dec!(15)), GaugeZone::Good);
        assert_eq!(gauge_zone(dec!(12.6), dec!(12.5), dec!(15)), GaugeZone::Warning);
        assert_eq!(gauge_zone(dec!(15), dec!(12.5), dec!(15)), GaugeZone::Warning);
        assert_eq!(gauge_zone(dec!(15.1), dec!(12.5), dec!(15)), GaugeZone::Critical);
    }

    #[test]
    fn test_default_gauges() {
        let g = ratio_gauges(
            &RatioReadings::default(),
            &EarlyWarningConfig::default(),
            &GaugeConfig::default(),
        );
        assert_eq!(g.len(), 2);
        assert_eq!(g[0].value, dec!(14.8));
        assert_eq!(g[0].zone, GaugeZone::Warning);
        assert_eq!(g[0].fill_pct, dec!(59.2));
        assert_eq!(g[1].value, dec!(8.5));
        assert_eq!(g[1].zone, GaugeZone::Good);
        assert_eq!(g[1].good_threshold, dec!(10));
    }

    #[test]
    fn test_fill_clamped() {
        let spec = GaugeConfig::default().acr;
        let r = read_gauge(&spec, dec!(10), dec!(35));
        assert_eq!(r.fill_pct, dec!(100));
        assert_eq!(r.zone, GaugeZone::Critical);
    }

    #[test]
    fn test_fill_saturates_for_tiny_dial() {
        let spec = GaugeSpec {
            max_value: Decimal::new(1, 28),
            ..GaugeConfig::default().rha
        };
        let r = read_gauge(&spec, dec!(10), dec!(14.8));
        assert_eq!(r.fill_pct, dec!(100));
        assert_eq!(r.zone, GaugeZone::Warning);
    }
}
