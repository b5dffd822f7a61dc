//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::SalaryConfiguration;

use super::types::{PayrollConfig, PayrollRules, SalariesConfig};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/payroll/
/// ├── rules.yaml     # Late threshold, deduction fractions, history window
/// └── salaries.yaml  # Salary configuration per technician
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll").unwrap();
/// if let Some(salary) = loader.salary_for("tech_001") {
///     println!("Monthly salary: {}", salary.monthly_salary);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either file is missing (`ConfigNotFound`)
    /// - Either file contains invalid YAML or an out-of-range rule (`ConfigParseError`)
    /// - A technician's salary breaks its invariants (`InvalidSalaryConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules_path = path.join("rules.yaml");
        let rules = Self::load_yaml::<PayrollRules>(&rules_path)?;
        if let Some(message) = rules.check() {
            return Err(EngineError::ConfigParseError {
                path: rules_path.display().to_string(),
                message,
            });
        }

        let salaries_path = path.join("salaries.yaml");
        let salaries = Self::load_yaml::<SalariesConfig>(&salaries_path)?;
        for (technician_id, salary) in &salaries.technicians {
            salary.validate().map_err(|err| match err {
                EngineError::InvalidSalaryConfig { field, message } => {
                    EngineError::InvalidSalaryConfig {
                        field: format!("{}.{}", technician_id, field),
                        message,
                    }
                }
                other => other,
            })?;
        }

        info!(
            path = %path.display(),
            technicians = salaries.technicians.len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(rules, salaries.technicians),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
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

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the shared payroll rules.
    pub fn rules(&self) -> &PayrollRules {
        self.config.rules()
    }

    /// Gets a technician's salary configuration.
    ///
    /// `None` means the technician has never been configured; callers must
    /// not substitute a zero salary.
    pub fn salary_for(&self, technician_id: &str) -> Option<&SalaryConfiguration> {
        self.config.salary_for(technician_id)
    }
}
