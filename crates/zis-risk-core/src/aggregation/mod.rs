pub mod counts;
pub mod kpi;
pub mod matrix;

pub use counts::{
    count_by_category_and_status, count_open_by_category, count_open_critical, high_priority,
    CategoryStatusCounts,
};
pub use kpi::{build_kpis, Kpi, KpiConfig, KpiTrend};
pub use matrix::{bucket_by_matrix_cell, RiskMatrix, SeverityCell};
