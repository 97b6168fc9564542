//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a salary table
//! from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{CapabilityGrade, Organization, RoleGrade};

use super::types::{
    CapabilityGradesConfig, OrganizationsConfig, RoleGradesConfig, SalaryTable,
    SalaryTableMetadata,
};

/// Loads and provides access to a salary table.
///
/// # Directory Structure
///
/// ```text
/// config/salary_table/
/// ├── table.yaml              # Table metadata
/// ├── role_grades.yaml        # Role rank -> amount
/// ├── capability_grades.yaml  # Capability rank code -> amount
/// └── organizations.yaml      # Organization code -> name
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/salary_table").unwrap();
///
/// let role = loader.role_grade("A3").unwrap();
/// let capability = loader.capability_grade("PL").unwrap();
/// println!("{} + {} = {}", role.amount, capability.amount, role.amount + capability.amount);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    table: SalaryTable,
}

impl ConfigLoader {
    /// Loads the salary table from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/salary_table")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<SalaryTableMetadata>(&path.join("table.yaml"))?;
        let roles = Self::load_yaml::<RoleGradesConfig>(&path.join("role_grades.yaml"))?;
        let capabilities =
            Self::load_yaml::<CapabilityGradesConfig>(&path.join("capability_grades.yaml"))?;
        let organizations =
            Self::load_yaml::<OrganizationsConfig>(&path.join("organizations.yaml"))?;

        info!(
            table = %metadata.name,
            version = %metadata.version,
            role_grades = roles.role_grades.len(),
            capability_grades = capabilities.capability_grades.len(),
            organizations = organizations.organizations.len(),
            "Loaded salary table"
        );

        let table = SalaryTable::new(
            metadata,
            roles.role_grades,
            capabilities.capability_grades,
            organizations.organizations,
        );

        Ok(Self { table })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying salary table.
    pub fn table(&self) -> &SalaryTable {
        &self.table
    }

    /// Returns the table metadata.
    pub fn metadata(&self) -> &SalaryTableMetadata {
        self.table.metadata()
    }

    /// Gets a role grade by its rank.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use salary_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/salary_table")?;
    /// let grade = loader.role_grade("A3")?;
    /// assert_eq!(grade.amount, 250_000);
    /// # Ok::<(), salary_engine::error::EngineError>(())
    /// ```
    pub fn role_grade(&self, rank: &str) -> EngineResult<RoleGrade> {
        self.table
            .role_grades()
            .get(rank)
            .map(|&amount| RoleGrade {
                rank: rank.to_string(),
                amount,
            })
            .ok_or_else(|| EngineError::GradeNotFound {
                grade: "role".to_string(),
                rank: rank.to_string(),
            })
    }

    /// Gets a capability grade by its rank code.
    ///
    /// The rank classification (and so the fixed allowance and overtime
    /// exemption) is derived from the code.
    pub fn capability_grade(&self, code: &str) -> EngineResult<CapabilityGrade> {
        self.table
            .capability_grades()
            .get(code)
            .map(|&amount| CapabilityGrade::new(code, amount))
            .ok_or_else(|| EngineError::GradeNotFound {
                grade: "capability".to_string(),
                rank: code.to_string(),
            })
    }

    /// Gets an organization by its code.
    pub fn organization(&self, code: &str) -> EngineResult<Organization> {
        self.table
            .organizations()
            .get(code)
            .map(|name| Organization {
                code: code.to_string(),
                name: name.clone(),
            })
            .ok_or_else(|| EngineError::OrganizationNotFound {
                code: code.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CapabilityRank;

    fn config_path() -> &'static str {
        "./config/salary_table"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().name, "Standard Salary Table");
        assert_eq!(loader.metadata().currency, "JPY");
    }

    #[test]
    fn test_get_role_grade() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let grade = loader.role_grade("A3").unwrap();
        assert_eq!(grade.rank, "A3");
        assert_eq!(grade.amount, 250_000);
    }

    #[test]
    fn test_get_capability_grade_derives_rank() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let pl = loader.capability_grade("PL").unwrap();
        assert_eq!(pl.amount, 110_000);
        assert_eq!(pl.rank(), CapabilityRank::Pl);

        let se = loader.capability_grade("SE").unwrap();
        assert_eq!(se.rank(), CapabilityRank::Other);
    }

    #[test]
    fn test_unknown_role_grade_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.role_grade("Z9") {
            Err(EngineError::GradeNotFound { grade, rank }) => {
                assert_eq!(grade, "role");
                assert_eq!(rank, "Z9");
            }
            other => panic!("Expected GradeNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_capability_grade_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.capability_grade("XX") {
            Err(EngineError::GradeNotFound { grade, .. }) => assert_eq!(grade, "capability"),
            other => panic!("Expected GradeNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_get_organization() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let organization = loader.organization("DEV2").unwrap();
        assert_eq!(organization.code, "DEV2");
        assert_eq!(organization.name, "Development Group 2");

        assert!(matches!(
            loader.organization("OPS"),
            Err(EngineError::OrganizationNotFound { .. })
        ));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("table.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let dir = std::env::temp_dir().join(format!("salary-table-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("table.yaml"), "name: [unterminated").unwrap();

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).unwrap();

        match result {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("table.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
