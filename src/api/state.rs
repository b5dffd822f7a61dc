//! Application state for the payroll engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the payroll rules and salary configurations loaded at startup.
/// Handlers only read from it.
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PayrollConfig, PayrollRules};
    use crate::models::SalaryConfiguration;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_config() {
        let mut salaries = BTreeMap::new();
        salaries.insert(
            "tech_001".to_string(),
            SalaryConfiguration::new(Decimal::new(30000, 0), Decimal::ZERO),
        );
        let loader =
            ConfigLoader::from_config(PayrollConfig::new(PayrollRules::default(), salaries));
        let state = AppState::new(loader);
        let other = state.clone();
        assert!(std::ptr::eq(state.config(), other.config()));
        assert!(other.config().salary_for("tech_001").is_some());
        assert!(other.config().salary_for("tech_002").is_none());
    }
}
