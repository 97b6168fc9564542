//! Salary table configuration.
//!
//! This module loads the role grades, capability grades and organizations
//! that populate employee views from a directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/salary_table").unwrap();
//! println!("Loaded salary table: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CapabilityGradesConfig, OrganizationsConfig, RoleGradesConfig, SalaryTable,
    SalaryTableMetadata,
};
