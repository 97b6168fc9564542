//! Configuration types for the salary table.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;
use std::collections::HashMap;

/// Metadata about the salary table.
#[derive(Debug, Clone, Deserialize)]
pub struct SalaryTableMetadata {
    /// The human-readable name of the table.
    pub name: String,
    /// The version or effective date of the table.
    pub version: String,
    /// The currency all amounts are denominated in (e.g., "JPY").
    pub currency: String,
}

/// Role grades configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleGradesConfig {
    /// Map of role rank to fixed monthly amount.
    pub role_grades: HashMap<String, i64>,
}

/// Capability grades configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CapabilityGradesConfig {
    /// Map of capability rank code to fixed monthly amount.
    pub capability_grades: HashMap<String, i64>,
}

/// Organizations configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationsConfig {
    /// Map of organization code to display name.
    pub organizations: HashMap<String, String>,
}

/// The complete salary table loaded from YAML files.
#[derive(Debug, Clone)]
pub struct SalaryTable {
    metadata: SalaryTableMetadata,
    role_grades: HashMap<String, i64>,
    capability_grades: HashMap<String, i64>,
    organizations: HashMap<String, String>,
}

impl SalaryTable {
    /// Creates a new SalaryTable from its component parts.
    pub fn new(
        metadata: SalaryTableMetadata,
        role_grades: HashMap<String, i64>,
        capability_grades: HashMap<String, i64>,
        organizations: HashMap<String, String>,
    ) -> Self {
        Self {
            metadata,
            role_grades,
            capability_grades,
            organizations,
        }
    }

    /// Returns the table metadata.
    pub fn metadata(&self) -> &SalaryTableMetadata {
        &self.metadata
    }

    /// Returns all role grade amounts by rank.
    pub fn role_grades(&self) -> &HashMap<String, i64> {
        &self.role_grades
    }

    /// Returns all capability grade amounts by rank code.
    pub fn capability_grades(&self) -> &HashMap<String, i64> {
        &self.capability_grades
    }

    /// Returns all organization names by code.
    pub fn organizations(&self) -> &HashMap<String, String> {
        &self.organizations
    }
}
