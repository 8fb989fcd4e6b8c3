pub mod controller;

pub use controller::RiskStore;
