pub mod snapshot;

pub use snapshot::{
    build_dashboard, build_snapshot, DashboardConfig, DashboardInput, DashboardSnapshot,
};
