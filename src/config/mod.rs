//! Configuration loading and management for the payroll engine.
//!
//! This module loads the shared payroll rules and the per-technician salary
//! configurations from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll").unwrap();
//! println!("Late after: {}", config.rules().late_threshold);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_HISTORY_WINDOW_MONTHS, DEFAULT_LATE_THRESHOLD, DEFAULT_REFERENCE_MONTH_DAYS,
    PayrollConfig, PayrollRules, SalariesConfig,
};
