//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rule
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::types::{PolicyMetadata, RuleConfig};

/// Loads and provides access to the rule configuration.
///
/// # Directory Structure
///
/// ```text
/// config/ems/
/// ├── policy.yaml   # Policy metadata
/// └── rules.yaml    # Attendance, leave and payroll thresholds
/// ```
///
/// # Example
///
/// ```no_run
/// use ems_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ems").unwrap();
/// println!("Loaded policy: {}", loader.policy().name);
/// println!("Daily rate divisor: {}", loader.rules().payroll.daily_rate_divisor);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: PolicyMetadata,
    rules: RuleConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A threshold is out of range (e.g. a zero daily rate divisor)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PolicyMetadata>(&path.join("policy.yaml"))?;
        let rules = Self::load_yaml::<RuleConfig>(&path.join("rules.yaml"))?;
        Self::validate(&rules)?;

        info!(
            policy = %policy.code,
            version = %policy.version,
            "Loaded rule configuration"
        );

        Ok(Self { policy, rules })
    }

    /// Builds a loader around an in-memory rule set.
    pub fn with_rules(rules: RuleConfig) -> EngineResult<Self> {
        Self::validate(&rules)?;
        Ok(Self {
            policy: PolicyMetadata::default(),
            rules,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();
        debug!(path = %path_str, "Reading configuration file");

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(rules: &RuleConfig) -> EngineResult<()> {
        let payroll = &rules.payroll;
        if payroll.daily_rate_divisor <= Decimal::ZERO {
            return Err(invalid(
                "payroll.daily_rate_divisor",
                "must be greater than zero",
            ));
        }
        if payroll.late_day_fraction < Decimal::ZERO || payroll.late_day_fraction > Decimal::ONE {
            return Err(invalid(
                "payroll.late_day_fraction",
                "must be between 0 and 1",
            ));
        }
        if payroll.anomaly_threshold < Decimal::ZERO {
            return Err(invalid("payroll.anomaly_threshold", "must not be negative"));
        }
        if payroll.significant_deduction_rate < Decimal::ZERO {
            return Err(invalid(
                "payroll.significant_deduction_rate",
                "must not be negative",
            ));
        }
        if rules.leave.min_available_teammates == 0 {
            return Err(invalid(
                "leave.min_available_teammates",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Returns the policy metadata.
    pub fn policy(&self) -> &PolicyMetadata {
        &self.policy
    }

    /// Returns the rule thresholds.
    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/ems"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scratch_dir(files: &[(&str, &str)]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ems-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        for (name, content) in files {
            fs::write(dir.join(name), content).unwrap();
        }
        dir
    }

    const POLICY: &str = "code: test\nname: Test policy\nversion: \"1\"\n";

    #[test]
    fn test_load_valid_configuration() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.policy().code, "ems-default");
        assert_eq!(loader.rules(), &RuleConfig::default());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("./config/does_not_exist");
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            other => panic!("expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_rules_file_returns_error() {
        let dir = scratch_dir(&[("policy.yaml", POLICY)]);
        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::ConfigNotFound { path }) if path.contains("rules.yaml")));
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir(&[
            ("policy.yaml", POLICY),
            ("rules.yaml", "attendance: [not, a, map"),
        ]);
        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_load_custom_thresholds() {
        let dir = scratch_dir(&[
            ("policy.yaml", POLICY),
            (
                "rules.yaml",
                "payroll:\n  daily_rate_divisor: \"20\"\n  anomaly_threshold: \"0.25\"\n",
            ),
        ]);
        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(loader.policy().name, "Test policy");
        assert_eq!(loader.rules().payroll.daily_rate_divisor, dec("20"));
        assert_eq!(loader.rules().payroll.anomaly_threshold, dec("0.25"));
        assert_eq!(loader.rules().payroll.late_day_fraction, dec("0.5"));
    }

    #[test]
    fn test_zero_divisor_is_rejected() {
        let mut rules = RuleConfig::default();
        rules.payroll.daily_rate_divisor = Decimal::ZERO;
        let result = ConfigLoader::with_rules(rules);
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfig { field, .. }) if field == "payroll.daily_rate_divisor"
        ));
    }

    #[test]
    fn test_late_fraction_above_one_is_rejected() {
        let mut rules = RuleConfig::default();
        rules.payroll.late_day_fraction = dec("1.5");
        assert!(ConfigLoader::with_rules(rules).is_err());
    }

    #[test]
    fn test_with_rules_uses_builtin_metadata() {
        let loader = ConfigLoader::with_rules(RuleConfig::default()).unwrap();
        assert_eq!(loader.policy().version, "builtin");
    }
}
