pub mod stats;

pub use stats::{
    summarize_zis, Ashnaf, AshnafDistribution, FundCollection, FundShare, FundType, ZisStats,
    ZisStatsData, ZisSummary, ZisTrackingInput,
};
