pub mod feed;
pub mod gauge;
pub mod rules;

#[cfg(feature = "simulation")]
pub use feed::SimulatedRatioFeed;
pub use feed::{FixedRatioFeed, RatioFeed, RatioReadings, ReplayRatioFeed};
pub use gauge::{gauge_zone, ratio_gauges, GaugeConfig, GaugeReading, GaugeSpec, GaugeZone};
pub use rules::{
    assess_early_warnings, evaluate_rules, evaluate_warnings, EarlyWarning, EarlyWarningConfig,
    EarlyWarningInput, EarlyWarningOutput, WarningRule,
};
