pub mod config;
pub mod coordinator;

pub use config::ChartConfig;
pub use coordinator::*;
