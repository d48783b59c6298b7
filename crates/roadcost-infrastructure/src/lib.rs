pub mod config_service;
pub mod paths;

pub use config_service::{ConfigService, apply_target_override};
pub use paths::{PathError, RoadcostPaths};
