//! Configuration system
//!
//! ```yaml
//! package_name: shapes
//! license_header: |
//!   // Copyright 2024 Example Corp.
//! type_mappings:
//!   BigDecimal: float64
//!   Instant: time.Time
//! ```
//!
//! Loading never fails the run: a missing, unreadable or malformed document
//! falls back to `MigrationConfig::default()`.

mod io;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub use io::DEFAULT_CONFIG_FILE;

/// Package clause used when none is configured
pub const DEFAULT_PACKAGE: &str = "main";

/// Translation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Go package clause of the emitted file
    pub package_name: String,

    /// Text prepended verbatim to the output
    pub license_header: Option<String>,

    /// Java type name → Go type expression, checked before built-in rules
    pub type_mappings: FxHashMap<String, String>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            package_name: DEFAULT_PACKAGE.to_string(),
            license_header: None,
            type_mappings: FxHashMap::default(),
        }
    }
}

impl MigrationConfig {
    pub fn with_package(mut self, name: impl Into<String>) -> Self {
        self.package_name = name.into();
        self
    }

    pub fn with_license_header(mut self, header: impl Into<String>) -> Self {
        self.license_header = Some(header.into());
        self
    }

    pub fn with_type_mapping(mut self, java: impl Into<String>, go: impl Into<String>) -> Self {
        self.type_mappings.insert(java.into(), go.into());
        self
    }
}

/// Failure policy of a translation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Any failure aborts translation
    Strict,
    /// Failures become diagnostics plus placeholder output
    #[default]
    Tolerant,
}

impl Mode {
    pub fn is_strict(&self) -> bool {
        matches!(self, Mode::Strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MigrationConfig::default();
        assert_eq!(config.package_name, "main");
        assert!(config.license_header.is_none());
        assert!(config.type_mappings.is_empty());
        assert_eq!(Mode::default(), Mode::Tolerant);
    }

    #[test]
    fn test_builder_helpers() {
        let config = MigrationConfig::default()
            .with_package("shapes")
            .with_type_mapping("BigDecimal", "float64");
        assert_eq!(config.package_name, "shapes");
        assert_eq!(config.type_mappings["BigDecimal"], "float64");
    }
}
