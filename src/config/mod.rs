//! Configuration loading and management for the rule engine.
//!
//! This module loads the policy metadata and rule thresholds from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use ems_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ems").unwrap();
//! println!("Loaded policy: {}", config.policy().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AttendanceRules, LeaveRules, PayrollRules, PolicyMetadata, RuleConfig};
