//! Application state for the EMS engine API.

use std::sync::Arc;

use crate::config::{ConfigLoader, RuleConfig};

/// Shared application state.
///
/// Holds the loaded rule configuration; it is read-only once the server is
/// running.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Shorthand for the loaded rule thresholds.
    pub fn rules(&self) -> &RuleConfig {
        self.config.rules()
    }
}
