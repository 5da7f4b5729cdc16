//! Configuration I/O (YAML loading)

use std::path::Path;

use tracing::{debug, warn};

use super::MigrationConfig;

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "java2go.yaml";

impl MigrationConfig {
    /// Load from a YAML file, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_yaml_str(&text),
            Err(e) => {
                warn!("cannot read config {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse a YAML document, falling back to defaults when malformed
    pub fn from_yaml_str(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::default();
        }
        match serde_yaml::from_str::<MigrationConfig>(text) {
            Ok(mut config) => {
                if config.package_name.trim().is_empty() {
                    config.package_name = super::DEFAULT_PACKAGE.to_string();
                }
                config.license_header = config
                    .license_header
                    .map(|h| h.replace("\r\n", "\n").replace('\r', "\n"));
                config
            }
            Err(e) => {
                warn!("malformed config: {}; using defaults", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_loading() {
        let yaml_content = r#"
package_name: shapes
license_header: "// Copyright\r\n// Example"
type_mappings:
  BigDecimal: float64
  Instant: time.Time
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = MigrationConfig::load(temp_file.path());
        assert_eq!(config.package_name, "shapes");
        assert_eq!(
            config.license_header.as_deref(),
            Some("// Copyright\n// Example")
        );
        assert_eq!(config.type_mappings["Instant"], "time.Time");
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = MigrationConfig::load("/definitely/not/here/java2go.yaml");
        assert_eq!(config, MigrationConfig::default());
    }

    #[test]
    fn test_malformed_yaml_falls_back() {
        let config = MigrationConfig::from_yaml_str("package_name: [unterminated");
        assert_eq!(config, MigrationConfig::default());

        let config = MigrationConfig::from_yaml_str("type_mappings: 42");
        assert_eq!(config, MigrationConfig::default());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = MigrationConfig::from_yaml_str("license_header: \"// MIT\"");
        assert_eq!(config.package_name, "main");
        assert_eq!(config.license_header.as_deref(), Some("// MIT"));
    }
}
