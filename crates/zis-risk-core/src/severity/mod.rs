pub mod classifier;

pub use classifier::{
    classify, classify_pair, severity_grid, tier_for, ClassifyInput, SeverityCellStyle, SeverityTier,
    IMPACT_AXIS, LIKELIHOOD_AXIS,
};
