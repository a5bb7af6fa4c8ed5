pub mod config;
pub mod counters;
pub mod host;
pub mod integration;
pub mod manager;
pub mod pool;
pub mod report;
pub mod seen;

pub use config::Config;
pub use counters::Counters;
pub use host::{DimensionSnapshot, HostUnit, PlayerSnapshot, ServerSnapshot};
pub use integration::{ClaimEnricher, IntegrationRegistry, MetadataEnricher};
pub use manager::{Credentials, WebMap};
pub use pool::WorkerPool;
pub use report::{human_readable, Stats};
pub use seen::SeenSet;
